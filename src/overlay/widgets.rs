//! Always-on widgets: live badge, clock and ticker
//!
//! Each widget is gated solely by its own toggle; only the ticker also
//! requires the overlay to be effectively visible.

use chrono::{DateTime, Local};
use eframe::egui::{self, Color32, CornerRadius, FontId, Pos2, Rect, pos2, vec2};

use crate::color;
use crate::config::OverlayConfig;
use crate::fonts::FontLibrary;

/// Live badge pulse period in seconds
pub const PULSE_PERIOD: f32 = 2.0;

/// Ticker scroll speed in pixels per second, independent of content length
pub const TICKER_SPEED: f32 = 120.0;

const WIDGET_PADDING: f32 = 10.0;
const TICKER_HEIGHT: f32 = 36.0;

/// Pulse wave for the badge indicator dot: 1.0 at the start of each period,
/// 0.0 halfway through
pub fn pulse(elapsed: f32) -> f32 {
    0.5 + 0.5 * (std::f32::consts::TAU * elapsed / PULSE_PERIOD).cos()
}

/// Left edge of the scrolling ticker text relative to the panel's left edge
///
/// The text enters from the right, travels until it is fully off the left
/// edge, then loops; one loop covers panel width plus text width at the
/// fixed speed.
pub fn ticker_x(elapsed: f32, panel_width: f32, text_width: f32) -> f32 {
    let span = panel_width + text_width;
    if span <= 0.0 {
        return panel_width;
    }
    panel_width - (elapsed * TICKER_SPEED) % span
}

/// Time/date readout with its own cached text, refreshed once per second
///
/// The host shell constructs the widget when the clock toggle turns on and
/// drops it when the toggle turns off, so no refresh happens while hidden.
pub struct ClockWidget {
    time_text: String,
    date_text: String,
    last_stamp: i64,
}

impl ClockWidget {
    pub fn new() -> Self {
        let mut widget = Self {
            time_text: String::new(),
            date_text: String::new(),
            last_stamp: 0,
        };
        widget.set_from(Local::now());
        widget
    }

    fn set_from(&mut self, now: DateTime<Local>) {
        self.time_text = now.format("%H:%M:%S").to_string();
        self.date_text = now.format("%d %b %Y").to_string().to_uppercase();
        self.last_stamp = now.timestamp();
    }

    /// Update the cached text if the wall clock has moved to a new second;
    /// returns whether anything changed
    pub fn refresh(&mut self) -> bool {
        let now = Local::now();
        if now.timestamp() != self.last_stamp {
            self.set_from(now);
            true
        } else {
            false
        }
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Paint anchored to `top_right`; returns the painted height
    pub fn draw(
        &self,
        painter: &egui::Painter,
        top_right: Pos2,
        fonts: &FontLibrary,
        config: &OverlayConfig,
    ) -> f32 {
        let family = fonts.family(&config.font_family);
        let accent = color::parse_or(&config.primary_color, crate::config::DEFAULT_PRIMARY);

        let time_galley = painter.layout_no_wrap(
            self.time_text.clone(),
            FontId::new(20.0, family.clone()),
            Color32::WHITE,
        );
        let date_galley = painter.layout_no_wrap(
            self.date_text.clone(),
            FontId::new(11.0, family),
            Color32::from_white_alpha(180),
        );

        let inner_width = time_galley.size().x.max(date_galley.size().x);
        let inner_height = time_galley.size().y + 4.0 + date_galley.size().y;
        let panel = Rect::from_min_size(
            pos2(
                top_right.x - inner_width - 2.0 * WIDGET_PADDING,
                top_right.y,
            ),
            vec2(
                inner_width + 2.0 * WIDGET_PADDING,
                inner_height + 2.0 * WIDGET_PADDING,
            ),
        );

        painter.rect_filled(panel, CornerRadius::same(6), Color32::from_black_alpha(204));
        // Accent strip along the left edge
        painter.rect_filled(
            Rect::from_min_size(panel.min, vec2(4.0, panel.height())),
            CornerRadius::ZERO,
            accent,
        );

        let text_right = panel.max.x - WIDGET_PADDING;
        painter.galley(
            pos2(
                text_right - time_galley.size().x,
                panel.min.y + WIDGET_PADDING,
            ),
            time_galley.clone(),
            Color32::WHITE,
        );
        painter.galley(
            pos2(
                text_right - date_galley.size().x,
                panel.min.y + WIDGET_PADDING + time_galley.size().y + 4.0,
            ),
            date_galley,
            Color32::from_white_alpha(180),
        );

        panel.height()
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint the live badge anchored to `top_right`; returns the painted height
pub fn draw_live_badge(painter: &egui::Painter, top_right: Pos2, elapsed: f32) -> f32 {
    let label = painter.layout_no_wrap(
        "LIVE".to_string(),
        FontId::new(14.0, egui::FontFamily::Proportional),
        Color32::WHITE,
    );

    let dot_radius = 4.0;
    let badge_height = label.size().y + 2.0 * WIDGET_PADDING;
    let badge_width = 2.0 * WIDGET_PADDING + 2.0 * dot_radius + 8.0 + label.size().x;
    let badge = Rect::from_min_size(
        pos2(top_right.x - badge_width, top_right.y),
        vec2(badge_width, badge_height),
    );

    painter.rect_filled(badge, CornerRadius::same(6), Color32::from_rgb(220, 38, 38));

    let phase = pulse(elapsed);
    let dot_center = pos2(badge.min.x + WIDGET_PADDING + dot_radius, badge.center().y);
    painter.circle_filled(
        dot_center,
        dot_radius * (0.9 + 0.1 * phase),
        Color32::WHITE.gamma_multiply(0.5 + 0.5 * phase),
    );

    painter.galley(
        pos2(
            dot_center.x + dot_radius + 8.0,
            badge.center().y - label.size().y / 2.0,
        ),
        label,
        Color32::WHITE,
    );

    badge.height()
}

/// Paint the full-width scrolling banner along the bottom of the stage
pub fn draw_ticker(
    painter: &egui::Painter,
    stage: Rect,
    config: &OverlayConfig,
    fonts: &FontLibrary,
    elapsed: f32,
) {
    let accent = color::parse_or(&config.primary_color, crate::config::DEFAULT_PRIMARY);
    let band = Rect::from_min_max(
        pos2(stage.min.x, stage.max.y - TICKER_HEIGHT),
        stage.max,
    );

    painter.rect_filled(band, CornerRadius::ZERO, Color32::from_black_alpha(204));
    // Accent border along the top edge
    painter.rect_filled(
        Rect::from_min_size(band.min, vec2(band.width(), 2.0)),
        CornerRadius::ZERO,
        accent,
    );

    let galley = painter.layout_no_wrap(
        config.ticker_text.clone(),
        FontId::new(16.0, fonts.family(&config.font_family)),
        Color32::WHITE,
    );
    let x = band.min.x + ticker_x(elapsed, band.width(), galley.size().x);
    let y = band.center().y - galley.size().y / 2.0;

    let clipped = painter.with_clip_rect(band);
    clipped.galley(pos2(x, y), galley, Color32::WHITE);
}

/// Paint the enabled widgets stacked below `top_right`; returns nothing the
/// caller needs, the stack is self-contained
pub fn draw_widget_stack(
    painter: &egui::Painter,
    top_right: Pos2,
    config: &OverlayConfig,
    fonts: &FontLibrary,
    clock: Option<&ClockWidget>,
    elapsed: f32,
) {
    const WIDGET_GAP: f32 = 12.0;
    let mut cursor = top_right;

    if config.show_live_badge {
        let height = draw_live_badge(painter, cursor, elapsed);
        cursor.y += height + WIDGET_GAP;
    }
    if let Some(clock) = clock {
        clock.draw(painter, cursor, fonts, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pulse_period_and_range() {
        assert!((pulse(0.0) - 1.0).abs() < 1e-5);
        assert!(pulse(PULSE_PERIOD / 2.0).abs() < 1e-5);
        assert!((pulse(PULSE_PERIOD) - 1.0).abs() < 1e-5);

        for step in 0..40 {
            let value = pulse(step as f32 * 0.1);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_ticker_enters_from_right_edge() {
        assert_eq!(ticker_x(0.0, 800.0, 300.0), 800.0);
    }

    #[test]
    fn test_ticker_loops_over_panel_plus_text() {
        // Span of 960 px makes the loop period exactly 8 s
        let (panel, text) = (600.0, 360.0);
        let period = (panel + text) / TICKER_SPEED;
        assert!((ticker_x(period, panel, text) - panel).abs() < 1e-2);

        // Just before the wrap the text is almost fully off the left edge
        let near_end = ticker_x(period - 0.01, panel, text);
        assert!(near_end < -text + TICKER_SPEED * 0.02);
    }

    #[test]
    fn test_ticker_speed_is_independent_of_text_length() {
        let dt = 0.5;
        let short = ticker_x(0.0, 800.0, 100.0) - ticker_x(dt, 800.0, 100.0);
        let long = ticker_x(0.0, 800.0, 2000.0) - ticker_x(dt, 800.0, 2000.0);
        assert!((short - TICKER_SPEED * dt).abs() < 1e-3);
        assert!((short - long).abs() < 1e-3);
    }

    #[test]
    fn test_clock_formats_cached_text() {
        let mut widget = ClockWidget::new();
        let stamp = Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        widget.set_from(stamp);
        assert_eq!(widget.time_text(), "14:05:09");
        assert_eq!(widget.date_text(), "07 MAR 2024");
    }

    #[test]
    fn test_clock_refresh_only_on_new_second() {
        let mut widget = ClockWidget::new();

        // Once settled on the current second, refresh is a no-op
        widget.refresh();
        assert!(!widget.refresh());

        widget.last_stamp -= 1;
        assert!(widget.refresh());
    }
}
