use crate::theme::*;
use eframe::egui;
use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Danger,
    Outline,
}

pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(COL_TEXT_DIM)
            .family(egui::FontFamily::Monospace)
            .strong(),
    );
}

pub fn cmd_button(
    ui: &mut egui::Ui,
    label: &str,
    kind: ButtonKind,
    enabled: bool,
) -> egui::Response {
    let (stroke_col, text_col) = match kind {
        ButtonKind::Primary => (COL_ACCENT, COL_BG_DARK),
        ButtonKind::Danger => (COL_DANGER, COL_DANGER),
        ButtonKind::Outline => (COL_ACCENT, COL_ACCENT),
    };

    let text = egui::RichText::new(label)
        .size(11.0)
        .color(if enabled { text_col } else { COL_TEXT_DIM });

    let btn = egui::Button::new(text)
        .min_size(egui::vec2(96.0, 24.0))
        .fill(if enabled && kind == ButtonKind::Primary {
            COL_ACCENT
        } else {
            Color32::TRANSPARENT
        })
        .stroke(egui::Stroke::new(
            1.0,
            if enabled { stroke_col } else { COL_BORDER },
        ));

    ui.add_enabled(enabled, btn)
}
