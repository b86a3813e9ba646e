//! Style & theme section of the control panel

use eframe::egui;

use crate::color::{format_hex, parse_hex};
use crate::config::{Animation, OverlayConfig, OverlayPosition, Theme};
use crate::fonts::{self, FontLibrary};
use crate::gui::constants::*;

pub fn ui(ui: &mut egui::Ui, config: &mut OverlayConfig, fonts: &FontLibrary) {
    ui.group(|ui| {
        ui.label(egui::RichText::new("Style & Theme").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Theme:");
            egui::ComboBox::from_id_salt("overlay_theme")
                .selected_text(config.theme.label())
                .show_ui(ui, |ui| {
                    for theme in Theme::ALL {
                        ui.selectable_value(&mut config.theme, theme, theme.label());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Font:");

            if let Some(error) = fonts.load_error() {
                ui.colored_label(egui::Color32::RED, "⚠")
                    .on_hover_text(format!("Failed to load fonts: {}", error));
            }

            egui::ComboBox::from_id_salt("overlay_font_family")
                .selected_text(&config.font_family)
                .width(160.0)
                .show_ui(ui, |ui| {
                    for family in fonts::AVAILABLE_FONTS {
                        ui.selectable_value(
                            &mut config.font_family,
                            family.to_string(),
                            *family,
                        );
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Animation:");
            egui::ComboBox::from_id_salt("overlay_animation")
                .selected_text(config.animation.label())
                .show_ui(ui, |ui| {
                    for animation in Animation::ALL {
                        ui.selectable_value(&mut config.animation, animation, animation.label());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Position:");
            egui::ComboBox::from_id_salt("overlay_position")
                .selected_text(config.position.label())
                .show_ui(ui, |ui| {
                    for position in OverlayPosition::ALL {
                        ui.selectable_value(&mut config.position, position, position.label());
                    }
                });
        });

        ui.add_space(ITEM_SPACING);

        color_row(ui, "Primary Color:", &mut config.primary_color);
        color_row(ui, "Secondary Color:", &mut config.secondary_color);
    });
}

fn color_row(ui: &mut egui::Ui, label: &str, field: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        let text_edit = egui::TextEdit::singleline(field).desired_width(100.0);
        ui.add(text_edit);

        // Color picker button - parses hex string, shows picker, updates string
        if let Some(mut color) = parse_hex(field) {
            if ui.color_edit_button_srgba(&mut color).changed() {
                *field = format_hex(color);
            }
        }
    });
}
