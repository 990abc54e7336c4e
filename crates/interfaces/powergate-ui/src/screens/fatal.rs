use crate::theme::*;
use crate::utils::{cmd_button, ButtonKind};
use eframe::egui;
use egui_taffy::taffy::prelude::length;
use egui_taffy::{taffy, TuiBuilderLogic};

/// Shown when the gate stops on a status error. Returns true on retry.
pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, message: &str) -> bool {
    let mut retry = false;
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        flex_grow: 1.0,
        gap: length(10.0),
        justify_content: Some(taffy::JustifyContent::Center),
        align_items: Some(taffy::AlignItems::Center),
        ..Default::default()
    })
    .add(|tui| {
        tui.label(
            egui::RichText::new("BACKEND UNAVAILABLE")
                .size(16.0)
                .strong()
                .color(COL_DANGER),
        );
        tui.colored_label(COL_TEXT_DIM, message);
        retry = tui
            .ui(|ui| cmd_button(ui, "RETRY", ButtonKind::Outline, true))
            .clicked();
    });
    retry
}
