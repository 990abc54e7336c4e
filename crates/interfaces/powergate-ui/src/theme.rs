use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle, Visuals};
use powergate_app_core::viewmodel::Tone;

pub const COL_BG: Color32 = Color32::from_rgb(5, 5, 5);
pub const COL_BG_DARK: Color32 = Color32::from_rgb(10, 10, 10);
pub const COL_BORDER: Color32 = Color32::from_rgb(32, 32, 32);
pub const COL_TEXT: Color32 = Color32::from_rgb(229, 231, 235);
pub const COL_TEXT_DIM: Color32 = Color32::from_rgb(160, 160, 160);
pub const COL_ACCENT: Color32 = Color32::from_rgb(125, 211, 252);
pub const COL_WARN: Color32 = Color32::from_rgb(250, 204, 21);
pub const COL_DANGER: Color32 = Color32::from_rgb(225, 29, 72);
pub const COL_SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

/// Colour of the header status readout.
pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Ok => COL_SUCCESS,
        Tone::Busy => COL_WARN,
        Tone::Warn => COL_ACCENT,
        Tone::Error => COL_DANGER,
    }
}

pub fn setup(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = COL_BG;
    visuals.panel_fill = COL_BG;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, COL_BORDER);
    visuals.widgets.hovered.bg_fill = COL_ACCENT.linear_multiply(0.1);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, COL_ACCENT);
    ctx.set_visuals(visuals);

    // Cover screens size their own headings; body text stays small.
    let mono = |size| FontId::new(size, FontFamily::Monospace);
    ctx.style_mut(|style| {
        style.text_styles = [
            (TextStyle::Heading, mono(16.0)),
            (TextStyle::Body, mono(12.0)),
            (TextStyle::Monospace, mono(11.0)),
            (TextStyle::Button, mono(11.0)),
            (TextStyle::Small, mono(9.0)),
        ]
        .into();
        style.spacing.item_spacing = egui::vec2(6.0, 8.0);
    });
}
