//! Host shell: owns the configuration and broadcast mode, wires keyboard
//! shortcuts and generation outcomes, and composes panel + stage

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{debug, info, warn};

use crate::cli::{self, Args};
use crate::config::OverlayConfig;
use crate::fonts::FontLibrary;
use crate::generate::{GenerationOutcome, GenerationRequest, spawn_generation};
use crate::gui::components::control_panel::{self, PanelAction, PanelState};
use crate::gui::constants::*;
use crate::overlay::{self, ClockWidget, animation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    ToggleVisibility,
    ExitBroadcast,
}

/// Keyboard shortcut dispatch for one frame
///
/// Space toggles overlay visibility unless a text widget wants the keyboard,
/// in which case the keystroke belongs to that widget. Escape only acts
/// while broadcast mode is on.
pub(crate) fn key_action(
    space_pressed: bool,
    escape_pressed: bool,
    wants_text_input: bool,
    broadcast_mode: bool,
) -> Option<KeyAction> {
    if escape_pressed && broadcast_mode {
        return Some(KeyAction::ExitBroadcast);
    }
    if space_pressed && !wants_text_input {
        return Some(KeyAction::ToggleVisibility);
    }
    None
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum OutcomeDisposition {
    Applied,
    Stale,
    Failed(String),
}

/// Settle one generation outcome against the latest outstanding request
///
/// Only the outcome matching the most recent request id is applied, and it
/// writes the slot captured at request time; anything else is discarded so a
/// slow response can never overwrite newer edits. Failures leave the
/// configuration untouched.
pub(crate) fn settle_outcome(
    config: &mut OverlayConfig,
    latest_request: &mut Option<u64>,
    outcome: GenerationOutcome,
) -> OutcomeDisposition {
    if *latest_request != Some(outcome.request.id) {
        debug!(request_id = outcome.request.id, "Discarding stale generation outcome");
        return OutcomeDisposition::Stale;
    }
    *latest_request = None;

    match outcome.result {
        Ok(content) => {
            info!(
                slot_id = outcome.request.slot_id,
                headline = %content.headline,
                "Applying generated content"
            );
            config.apply_generated(outcome.request.slot_id, &content);
            OutcomeDisposition::Applied
        }
        Err(err) => OutcomeDisposition::Failed(err.to_string()),
    }
}

pub struct StudioApp {
    config: OverlayConfig,
    broadcast_mode: bool,
    fonts: FontLibrary,
    panel: PanelState,
    clock: Option<ClockWidget>,
    started: Instant,
    outcome_tx: Sender<GenerationOutcome>,
    outcome_rx: Receiver<GenerationOutcome>,
    next_request_id: u64,
    latest_request: Option<u64>,
    alert: Option<String>,
}

impl StudioApp {
    fn new(cc: &CreationContext<'_>, args: Args) -> Self {
        info!(broadcast = args.broadcast, "Initializing studio");

        let fonts = FontLibrary::load(&cc.egui_ctx);
        let config = cli::build_config(&args);
        let clock = config.show_clock.then(ClockWidget::new);
        let (outcome_tx, outcome_rx) = mpsc::channel();

        Self {
            config,
            broadcast_mode: args.broadcast,
            fonts,
            panel: PanelState::new(),
            clock,
            started: Instant::now(),
            outcome_tx,
            outcome_rx,
            next_request_id: 0,
            latest_request: None,
            alert: None,
        }
    }

    fn start_generation(&mut self, topic: String) {
        self.next_request_id += 1;
        let request = GenerationRequest {
            id: self.next_request_id,
            slot_id: self.config.active_slot_id(),
        };
        self.latest_request = Some(request.id);
        self.panel.generating = true;
        spawn_generation(topic, request, self.outcome_tx.clone());
    }

    fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match settle_outcome(&mut self.config, &mut self.latest_request, outcome) {
                OutcomeDisposition::Applied => self.panel.generating = false,
                OutcomeDisposition::Failed(message) => {
                    warn!(message = %message, "Generation failed");
                    self.panel.generating = false;
                    self.alert = Some(message);
                }
                OutcomeDisposition::Stale => {}
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (space, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::Escape),
            )
        });
        match key_action(space, escape, ctx.wants_keyboard_input(), self.broadcast_mode) {
            Some(KeyAction::ToggleVisibility) => self.config.toggle_visible(),
            Some(KeyAction::ExitBroadcast) => {
                info!("Exiting broadcast mode");
                self.broadcast_mode = false;
            }
            None => {}
        }
    }

    /// Construct the clock when its toggle turns on and drop it when the
    /// toggle turns off; refreshing happens only while mounted
    fn sync_clock(&mut self) {
        match (&mut self.clock, self.config.show_clock) {
            (None, true) => self.clock = Some(ClockWidget::new()),
            (Some(_), false) => self.clock = None,
            (Some(clock), true) => {
                clock.refresh();
            }
            (None, false) => {}
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let mut dismissed = false;
        if let Some(message) = &self.alert {
            egui::Window::new("Generation Failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Failed to generate content. Please check the API key or try again.");
                    ui.add_space(ITEM_SPACING);
                    ui.label(egui::RichText::new(message).small().weak());
                    ui.add_space(ITEM_SPACING);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
        }
        if dismissed {
            self.alert = None;
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        // Ticker scroll and badge pulse animate continuously; a mounted
        // clock only needs to catch the next second
        if self.config.ticker_active() || self.config.show_live_badge {
            ctx.request_repaint();
        } else if self.clock.is_some() {
            ctx.request_repaint_after(Duration::from_millis(CLOCK_POLL_MS));
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_outcomes();
        self.handle_keys(ctx);
        self.sync_clock();

        if !self.broadcast_mode {
            let action = egui::SidePanel::right("control_panel")
                .exact_width(PANEL_WIDTH)
                .resizable(false)
                .show(ctx, |ui| {
                    control_panel::ui(ui, &mut self.config, &mut self.panel, &self.fonts)
                })
                .inner;

            match action {
                PanelAction::ToggleBroadcast => {
                    info!("Entering broadcast mode");
                    self.broadcast_mode = true;
                }
                PanelAction::Generate { topic } => self.start_generation(topic),
                PanelAction::None => {}
            }
        }

        let progress = ctx.animate_bool_with_time(
            egui::Id::new("overlay_visibility"),
            self.config.effective_visibility(),
            animation::TRANSITION_SECS,
        );
        let elapsed = self.started.elapsed().as_secs_f32();

        let stage_frame = if self.broadcast_mode {
            egui::Frame::NONE
        } else {
            egui::Frame::NONE.fill(STAGE_BACKGROUND)
        };
        egui::CentralPanel::default()
            .frame(stage_frame)
            .show(ctx, |ui| {
                if !self.broadcast_mode {
                    ui.painter().text(
                        ui.max_rect().min + egui::vec2(16.0, 16.0),
                        egui::Align2::LEFT_TOP,
                        "PREVIEW",
                        egui::FontId::proportional(24.0),
                        egui::Color32::from_white_alpha(40),
                    );
                }
                overlay::draw(
                    ui,
                    &self.config,
                    &self.fonts,
                    progress,
                    elapsed,
                    self.clock.as_ref(),
                );
            });

        if self.broadcast_mode {
            egui::Area::new(egui::Id::new("exit_broadcast"))
                .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
                .show(ctx, |ui| {
                    if ui.button("Exit Broadcast Mode (Esc)").clicked() {
                        self.broadcast_mode = false;
                    }
                });
        }

        self.show_alert(ctx);
        self.schedule_repaint(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Broadcast mode paints no background so capture software can key it
        if self.broadcast_mode {
            egui::Rgba::TRANSPARENT.to_array()
        } else {
            egui::Rgba::from(STAGE_BACKGROUND).to_array()
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Lower Third Studio")
            .with_transparent(true),
        ..Default::default()
    };

    eframe::run_native(
        "Lower Third Studio",
        options,
        Box::new(|cc| Ok(Box::new(StudioApp::new(cc, args)))),
    )
    .map_err(|err| anyhow!("Failed to launch studio window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{GeneratedContent, GenerationError};

    fn ok_outcome(id: u64, slot_id: u32) -> GenerationOutcome {
        GenerationOutcome {
            request: GenerationRequest { id, slot_id },
            result: Ok(GeneratedContent {
                headline: "Tech Desk".to_string(),
                subheadline: "Daily AI Briefing".to_string(),
            }),
        }
    }

    #[test]
    fn test_space_toggles_only_outside_text_inputs() {
        assert_eq!(
            key_action(true, false, false, false),
            Some(KeyAction::ToggleVisibility)
        );
        // Focus inside a text widget: the keystroke belongs to the widget
        assert_eq!(key_action(true, false, true, false), None);
    }

    #[test]
    fn test_escape_exits_broadcast_only_when_active() {
        assert_eq!(
            key_action(false, true, false, true),
            Some(KeyAction::ExitBroadcast)
        );
        assert_eq!(key_action(false, true, false, false), None);
    }

    #[test]
    fn test_escape_wins_over_space_in_broadcast_mode() {
        assert_eq!(
            key_action(true, true, false, true),
            Some(KeyAction::ExitBroadcast)
        );
    }

    #[test]
    fn test_matching_outcome_applies_to_captured_slot() {
        let mut config = OverlayConfig::new();
        config.is_visible = false;
        let mut latest = Some(3);

        // Slot 2 was active at request time; slot 5 is active now
        config.select_slot(5);
        let disposition = settle_outcome(&mut config, &mut latest, ok_outcome(3, 2));

        assert_eq!(disposition, OutcomeDisposition::Applied);
        assert_eq!(latest, None);
        assert_eq!(config.slots()[1].headline, "Tech Desk");
        assert_eq!(config.slots()[1].subheadline, "Daily AI Briefing");
        // The currently active slot keeps its own text
        assert_eq!(config.headline(), "Headline 5");
        assert!(config.is_visible);
    }

    #[test]
    fn test_failed_outcome_leaves_config_untouched() {
        let mut config = OverlayConfig::new();
        config.is_visible = false;
        let before = config.clone();
        let mut latest = Some(1);

        let outcome = GenerationOutcome {
            request: GenerationRequest { id: 1, slot_id: 1 },
            result: Err(GenerationError::EmptyResponse),
        };
        let disposition = settle_outcome(&mut config, &mut latest, outcome);

        assert!(matches!(disposition, OutcomeDisposition::Failed(_)));
        assert_eq!(config, before);
        assert_eq!(latest, None);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut config = OverlayConfig::new();
        let before = config.clone();
        let mut latest = Some(9);

        let disposition = settle_outcome(&mut config, &mut latest, ok_outcome(4, 1));

        assert_eq!(disposition, OutcomeDisposition::Stale);
        assert_eq!(config, before);
        // The outstanding request is still awaited
        assert_eq!(latest, Some(9));
    }

    #[test]
    fn test_outcome_with_no_request_outstanding_is_stale() {
        let mut config = OverlayConfig::new();
        let mut latest = None;
        let disposition = settle_outcome(&mut config, &mut latest, ok_outcome(1, 1));
        assert_eq!(disposition, OutcomeDisposition::Stale);
    }
}
