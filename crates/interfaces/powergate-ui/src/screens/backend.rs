use crate::theme::*;
use crate::utils::{cmd_button, section_label, ButtonKind};
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

#[derive(Debug, Default)]
pub struct BackendResponse {
    pub restart: bool,
    pub shutdown: bool,
    pub dismiss_error: bool,
}

/// Application content while the backend is running.
pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    action_error: Option<&str>,
    actions_enabled: bool,
) -> BackendResponse {
    let mut resp = BackendResponse::default();

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(8.0),
        padding: length(12.0),
        size: taffy::Size {
            width: percent(1.),
            height: auto(),
        },
        ..Default::default()
    })
    .add(|tui| {
        tui.ui(|ui| section_label(ui, "BACKEND"));
        tui.label(
            egui::RichText::new("The backend is running.")
                .size(12.0)
                .color(COL_TEXT),
        );

        if let Some(err) = action_error {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                justify_content: Some(taffy::JustifyContent::SpaceBetween),
                align_items: Some(taffy::AlignItems::Center),
                padding: length(6.0),
                ..Default::default()
            })
            .bg_add(
                TuiBackground::new()
                    .with_background_color(COL_BG_DARK)
                    .with_border_color(COL_DANGER)
                    .with_border_width(1.0),
                |tui| {
                    tui.colored_label(COL_DANGER, err);
                    resp.dismiss_error = tui
                        .ui(|ui| cmd_button(ui, "DISMISS", ButtonKind::Outline, true))
                        .clicked();
                },
            );
        }

        tui.separator();
        tui.ui(|ui| section_label(ui, "POWER"));

        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            gap: length(8.0),
            ..Default::default()
        })
        .add(|tui| {
            resp.restart = tui
                .ui(|ui| cmd_button(ui, "RESTART", ButtonKind::Primary, actions_enabled))
                .clicked();
            resp.shutdown = tui
                .ui(|ui| cmd_button(ui, "SHUT DOWN", ButtonKind::Danger, actions_enabled))
                .clicked();
        });
    });

    resp
}
