//! Shared UI components.

use eframe::egui::{self, Button, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    /// Brand green of the HRnet logo.
    pub const PRIMARY: Color32 = Color32::from_rgb(0x93, 0xAD, 0x18);
    pub const PRIMARY_DARK: Color32 = Color32::from_rgb(0x61, 0x6F, 0x1D);
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Filled button in the brand color.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        Button::new(RichText::new(label).size(15.0).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(120.0, 32.0)),
    )
}

/// Regular button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.add(Button::new(RichText::new(format!("{icon} {text}")).size(14.0)).min_size(egui::vec2(0.0, 28.0)))
}

/// Group related form fields under an uppercase legend.
pub fn fieldset<R>(ui: &mut Ui, legend: &str, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    ui.add_space(20.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(legend.to_uppercase()).strong().color(colors::PRIMARY_DARK));
        ui.add(egui::Separator::default().horizontal().grow(4.0));
    });
    ui.add_space(8.0);
    add_contents(ui)
}
