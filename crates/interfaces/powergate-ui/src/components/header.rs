use crate::theme::*;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use powergate_app_core::viewmodel::HeaderVm;

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, vm: &HeaderVm) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Center),
        padding: length(6.0),
        size: taffy::Size {
            width: percent(1.),
            height: percent(1.),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(8.0),
                ..Default::default()
            })
            .add(|tui| {
                tui.label(
                    egui::RichText::new("POWERGATE")
                        .family(egui::FontFamily::Monospace)
                        .size(12.0)
                        .extra_letter_spacing(2.0)
                        .strong()
                        .color(COL_TEXT),
                );
                tui.label(
                    egui::RichText::new(&vm.backend_url)
                        .family(egui::FontFamily::Monospace)
                        .size(10.0)
                        .color(COL_TEXT_DIM),
                );
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                if let Some(probe) = &vm.probe_label {
                    tui.label(egui::RichText::new(probe).color(COL_DANGER).size(10.0));
                }
                if let Some(seen) = &vm.last_seen {
                    tui.label(
                        egui::RichText::new(format!("SEEN {seen}"))
                            .color(COL_TEXT_DIM)
                            .size(10.0),
                    );
                }
                tui.label(
                    egui::RichText::new(&vm.status_label)
                        .color(tone_color(vm.tone))
                        .size(10.0),
                );
            });
        },
    );
}
