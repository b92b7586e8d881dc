use egui::{Color32, RichText, Ui};

pub(crate) mod wizard;

pub(crate) const PALETTE_INK: Color32 = Color32::from_rgb(16, 18, 22);
pub(crate) const PALETTE_SLATE: Color32 = Color32::from_rgb(42, 49, 58);
pub(crate) const PALETTE_TEAL: Color32 = Color32::from_rgb(61, 165, 141);
pub(crate) const PALETTE_AMBER: Color32 = Color32::from_rgb(235, 172, 71);

/// Numbered step heading used by the wizard flow.
pub(crate) fn step_heading(ui: &mut Ui, step: usize, title: &str) {
    ui.add_space(14.0);
    ui.heading(
        RichText::new(format!("Step {} · {}", step, title))
            .color(Color32::WHITE)
            .strong(),
    );
    ui.add_space(6.0);
}

/// Dimmed caption line under a heading or widget.
pub(crate) fn caption(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(12.0).color(Color32::GRAY));
}

/// Amber notice for recoverable degradations (relaxed filters, fallbacks).
pub(crate) fn notice(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(PALETTE_AMBER));
}

/// Red warning for dead-ends the user has to resolve upstream.
pub(crate) fn warning(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(Color32::LIGHT_RED));
}
