use crate::theme::*;
use eframe::egui;
use egui_taffy::taffy::prelude::length;
use egui_taffy::{taffy, TuiBuilderLogic};
use powergate_app_core::viewmodel::CoverVm;

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, vm: &CoverVm) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        flex_grow: 1.0,
        gap: length(10.0),
        justify_content: Some(taffy::JustifyContent::Center),
        align_items: Some(taffy::AlignItems::Center),
        ..Default::default()
    })
    .add(|tui| {
        if vm.busy {
            tui.ui_add(egui::Spinner::new().size(28.0));
        }
        tui.label(
            egui::RichText::new(&vm.title)
                .size(16.0)
                .extra_letter_spacing(2.0)
                .strong()
                .color(COL_TEXT),
        );
        tui.colored_label(COL_TEXT_DIM, vm.detail.as_str());
    });
}
