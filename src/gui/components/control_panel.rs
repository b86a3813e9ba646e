//! Control panel: the editing surface for the whole overlay
//!
//! Mutations apply to the configuration as the widgets change; anything the
//! host shell must act on (broadcast toggle, generation trigger) is returned
//! as an action instead of mutated in place.

use std::time::Instant;

use eframe::egui;

use crate::config::OverlayConfig;
use crate::fonts::FontLibrary;
use crate::gui::components::{slot_editor, style_settings};
use crate::gui::constants::*;

/// What the host shell should do after this frame's panel pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    None,
    ToggleBroadcast,
    Generate { topic: String },
}

/// Local UI state that is not part of the overlay configuration
pub struct PanelState {
    topic: String,
    /// Disables the generate trigger while a request is outstanding
    pub generating: bool,
    copied_at: Option<Instant>,
    exe_path: String,
}

impl PanelState {
    pub fn new() -> Self {
        let exe_path = std::env::current_exe()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| "lower-third-studio".to_string());

        Self {
            topic: String::new(),
            generating: false,
            copied_at: None,
            exe_path,
        }
    }

    fn copied_recently(&self) -> bool {
        self.copied_at
            .is_some_and(|at| at.elapsed().as_secs_f32() < COPY_FEEDBACK_SECS)
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn ui(
    ui: &mut egui::Ui,
    config: &mut OverlayConfig,
    state: &mut PanelState,
    fonts: &FontLibrary,
) -> PanelAction {
    let mut action = PanelAction::None;

    ui.add_space(ITEM_SPACING);
    ui.heading("Lower Third Studio");
    ui.weak("Window-capture overlay for OBS / vMix");
    ui.add_space(SECTION_SPACING);

    egui::ScrollArea::vertical()
        .id_salt("control_panel")
        .show(ui, |ui| {
            // Master control
            ui.group(|ui| {
                ui.label(egui::RichText::new("Master Control").strong());
                ui.add_space(ITEM_SPACING);

                let (label, fill) = if config.is_visible {
                    ("HIDE OVERLAY", ON_AIR)
                } else {
                    ("SHOW OVERLAY", OFF_AIR)
                };
                let button = egui::Button::new(
                    egui::RichText::new(label).strong().color(egui::Color32::WHITE),
                )
                .fill(fill)
                .min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add(button).clicked() {
                    config.toggle_visible();
                }

                ui.add_space(ITEM_SPACING / 2.0);
                ui.checkbox(&mut config.preview_mode, "Preview mode (force visible here)");
            });

            ui.add_space(SECTION_SPACING);

            // Broadcast window launch command
            ui.group(|ui| {
                ui.label(egui::RichText::new("Broadcast Window").strong());
                ui.weak("Run this command and capture the window in your streaming software.");
                ui.add_space(ITEM_SPACING / 2.0);

                let command = broadcast_command(&state.exe_path, config);
                ui.label(egui::RichText::new(&command).monospace().small());
                ui.add_space(ITEM_SPACING / 2.0);

                ui.horizontal(|ui| {
                    let copy_label = if state.copied_recently() { "OK" } else { "COPY" };
                    if ui.button(copy_label).clicked() {
                        ui.ctx().copy_text(command);
                        state.copied_at = Some(Instant::now());
                    }
                    if ui.button("Launch Broadcast View").clicked() {
                        action = PanelAction::ToggleBroadcast;
                    }
                });
            });

            ui.add_space(SECTION_SPACING);

            // AI generator
            ui.group(|ui| {
                ui.label(egui::RichText::new("AI Content Generator").strong());
                ui.weak("Generates text for the currently selected slot.");
                ui.add_space(ITEM_SPACING / 2.0);

                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut state.topic)
                            .hint_text("Topic (e.g. Tech News, Speedrun)")
                            .desired_width(220.0),
                    );

                    let can_generate = !state.generating && !state.topic.trim().is_empty();
                    let label = if state.generating { "..." } else { "Gen" };
                    if ui.add_enabled(can_generate, egui::Button::new(label)).clicked() {
                        action = PanelAction::Generate {
                            topic: state.topic.trim().to_string(),
                        };
                    }
                });
            });

            ui.add_space(SECTION_SPACING);

            slot_editor::ui(ui, config);

            ui.add_space(SECTION_SPACING);

            // Extras & widgets
            ui.group(|ui| {
                ui.label(egui::RichText::new("Extras & Widgets").strong());
                ui.add_space(ITEM_SPACING);

                ui.label("Running text (ticker):");
                ui.add(
                    egui::TextEdit::multiline(&mut config.ticker_text)
                        .desired_rows(2)
                        .hint_text("Enter text to scroll at the bottom...")
                        .desired_width(f32::INFINITY),
                );

                ui.add_space(ITEM_SPACING / 2.0);
                ui.horizontal(|ui| {
                    ui.checkbox(&mut config.show_live_badge, "Live badge");
                    ui.checkbox(&mut config.show_clock, "Clock");
                });
            });

            ui.add_space(SECTION_SPACING);

            style_settings::ui(ui, config, fonts);
            ui.add_space(SECTION_SPACING);
        });

    action
}

/// The shareable launch command: current executable plus flags reproducing
/// this session's appearance and content, always in broadcast mode
pub fn broadcast_command(exe_path: &str, config: &OverlayConfig) -> String {
    let mut parts = vec![quote(exe_path), "--broadcast".to_string()];

    parts.push("--theme".to_string());
    parts.push(config.theme.to_string());
    parts.push("--animation".to_string());
    parts.push(config.animation.to_string());
    parts.push("--position".to_string());
    parts.push(config.position.to_string());
    parts.push("--font".to_string());
    parts.push(quote(&config.font_family));
    parts.push("--primary-color".to_string());
    parts.push(quote(&config.primary_color));
    parts.push("--secondary-color".to_string());
    parts.push(quote(&config.secondary_color));
    parts.push("--headline".to_string());
    parts.push(quote(config.headline()));
    parts.push("--subheadline".to_string());
    parts.push(quote(config.subheadline()));
    parts.push("--ticker".to_string());
    parts.push(quote(&config.ticker_text));

    if !config.show_live_badge {
        parts.push("--no-live-badge".to_string());
    }
    if !config.show_clock {
        parts.push("--no-clock".to_string());
    }

    parts.join(" ")
}

/// Shell-quote an argument for the launch command
fn quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '\n', '"', '\'']) {
        arg.to_string()
    } else {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Animation, SlotField, Theme};

    #[test]
    fn test_command_contains_broadcast_exactly_once() {
        let mut config = OverlayConfig::new();
        assert_eq!(
            broadcast_command("studio", &config).matches("--broadcast").count(),
            1
        );

        config.theme = Theme::Gaming;
        config.animation = Animation::Fade;
        config.show_live_badge = false;
        config.show_clock = false;
        config.ticker_text.clear();
        assert_eq!(
            broadcast_command("studio", &config).matches("--broadcast").count(),
            1
        );
    }

    #[test]
    fn test_command_reproduces_session_appearance() {
        let mut config = OverlayConfig::new();
        config.theme = Theme::News;
        config.primary_color = "#ff0000".to_string();
        config.edit_slot(1, SlotField::Headline, "Jane Roe".to_string());

        let command = broadcast_command("/opt/studio/lower-third-studio", &config);
        assert!(command.starts_with("/opt/studio/lower-third-studio --broadcast"));
        assert!(command.contains("--theme news"));
        assert!(command.contains("--primary-color #ff0000"));
        assert!(command.contains("--headline \"Jane Roe\""));
    }

    #[test]
    fn test_command_flags_disabled_widgets() {
        let mut config = OverlayConfig::new();
        let command = broadcast_command("studio", &config);
        assert!(!command.contains("--no-live-badge"));
        assert!(!command.contains("--no-clock"));

        config.show_live_badge = false;
        config.show_clock = false;
        let command = broadcast_command("studio", &config);
        assert!(command.contains("--no-live-badge"));
        assert!(command.contains("--no-clock"));
    }

    #[test]
    fn test_quote_wraps_only_when_needed() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("#6366f1"), "#6366f1");
        assert_eq!(quote("two words"), "\"two words\"");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
