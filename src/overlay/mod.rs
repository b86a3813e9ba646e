//! Render engine: maps the overlay configuration to painted output
//!
//! Pure apart from the clock widget's cached time text: the same
//! configuration, visibility progress and elapsed scalars always paint the
//! same shapes.

pub mod animation;
pub mod themes;
pub mod widgets;

use eframe::egui::{self, pos2};

pub use widgets::ClockWidget;

use crate::config::OverlayConfig;
use crate::fonts::FontLibrary;

const WIDGET_MARGIN: f32 = 32.0;

/// Paint the whole stage: widget stack, main graphic and ticker
///
/// `progress` is the linear visibility progress (0 hidden, 1 shown) and
/// `elapsed` is seconds since app start, driving the ticker scroll and the
/// badge pulse phase.
pub fn draw(
    ui: &egui::Ui,
    config: &OverlayConfig,
    fonts: &FontLibrary,
    progress: f32,
    elapsed: f32,
    clock: Option<&ClockWidget>,
) {
    let stage = ui.max_rect();
    let painter = ui.painter();

    widgets::draw_widget_stack(
        painter,
        pos2(stage.max.x - WIDGET_MARGIN, stage.min.y + WIDGET_MARGIN),
        config,
        fonts,
        clock,
        elapsed,
    );

    let effect = animation::effect(config.animation, progress);
    themes::draw_lower_third(painter, stage, config, fonts, &effect);

    // The ticker appears and disappears with effective visibility directly,
    // without the show/hide transition
    if config.ticker_active() {
        widgets::draw_ticker(painter, stage, config, fonts, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use eframe::egui::{Pos2, Rect, vec2};

    /// Render one frame headless and return a structural fingerprint of the
    /// painted shapes
    fn render_stage(progress: f32, configure: impl FnOnce(&mut OverlayConfig)) -> String {
        let mut config = OverlayConfig::new();
        configure(&mut config);
        let fonts = FontLibrary::fallback_only();

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(1280.0, 720.0))),
            ..Default::default()
        };
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                draw(ui, &config, &fonts, progress, 0.0, None);
            });
        });
        format!("{:?}", output.shapes)
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let first = render_stage(1.0, |_| {});
        let second = render_stage(1.0, |_| {});
        assert_eq!(first, second);
    }

    #[test]
    fn test_four_themes_paint_distinct_trees() {
        let trees: Vec<String> = Theme::ALL
            .iter()
            .map(|theme| render_stage(1.0, |config| config.theme = *theme))
            .collect();

        for i in 0..trees.len() {
            for j in (i + 1)..trees.len() {
                assert_ne!(
                    trees[i], trees[j],
                    "themes {} and {} painted identical trees",
                    Theme::ALL[i].label(),
                    Theme::ALL[j].label()
                );
            }
        }
    }

    #[test]
    fn test_hidden_overlay_suppresses_graphic_and_ticker() {
        // With the overlay hidden, changing the headline or the ticker text
        // must not change the painted output at all
        let hidden = |headline: &'static str, ticker: &'static str| {
            render_stage(0.0, move |config| {
                config.is_visible = false;
                config.show_live_badge = false;
                config.show_clock = false;
                config.edit_slot(1, crate::config::SlotField::Headline, headline.to_string());
                config.ticker_text = ticker.to_string();
            })
        };
        assert_eq!(hidden("One", "Alpha"), hidden("Two", "Beta"));
    }

    #[test]
    fn test_preview_mode_restores_ticker() {
        let preview = |ticker: &'static str| {
            render_stage(1.0, move |config| {
                config.is_visible = false;
                config.preview_mode = true;
                config.show_live_badge = false;
                config.ticker_text = ticker.to_string();
            })
        };
        assert_ne!(preview("Alpha"), preview("A much longer ticker line"));
    }

    #[test]
    fn test_live_badge_ignores_overlay_visibility() {
        let render = |badge: bool| {
            render_stage(0.0, move |config| {
                config.is_visible = false;
                config.ticker_text.clear();
                config.show_live_badge = badge;
            })
        };
        assert_ne!(render(true), render(false));
    }

    #[test]
    fn test_typewriter_at_zero_reveal_paints_nothing() {
        let render = |animation: crate::config::Animation| {
            render_stage(0.0, move |config| {
                config.is_visible = false;
                config.animation = animation;
                config.show_live_badge = false;
                config.ticker_text.clear();
            })
        };
        // Hidden fade and hidden typewriter both collapse to an empty stage
        assert_eq!(
            render(crate::config::Animation::Typewriter),
            render(crate::config::Animation::Fade)
        );
    }
}
