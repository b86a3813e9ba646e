//! Content slot list: ten reusable presets with one active
//!
//! Selection funnels through `OverlayConfig::select_slot`; the text edits
//! mutate slot fields in place and are immediately visible on the stage when
//! the edited slot is the active one.

use eframe::egui;

use crate::config::OverlayConfig;
use crate::gui::constants::*;

pub fn ui(ui: &mut egui::Ui, config: &mut OverlayConfig) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(format!("Content Slots ({})", config.slots().len())).strong());
        ui.add_space(ITEM_SPACING);

        let active = config.active_slot_id();
        let mut selected = None;

        egui::ScrollArea::vertical()
            .id_salt("slot_list")
            .max_height(280.0)
            .show(ui, |ui| {
                for slot in config.slots_mut() {
                    let is_active = slot.id == active;
                    ui.horizontal(|ui| {
                        if ui.radio(is_active, format!("{}", slot.id)).clicked() && !is_active {
                            selected = Some(slot.id);
                        }
                        ui.vertical(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut slot.headline)
                                    .hint_text(format!("Headline {}", slot.id))
                                    .desired_width(f32::INFINITY),
                            );
                            ui.add(
                                egui::TextEdit::singleline(&mut slot.subheadline)
                                    .hint_text("Sub-Headline")
                                    .desired_width(f32::INFINITY),
                            );
                        });
                    });
                    ui.add_space(ITEM_SPACING / 2.0);
                }
            });

        if let Some(id) = selected {
            config.select_slot(id);
        }
    });
}
