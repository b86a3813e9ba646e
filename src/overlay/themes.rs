//! Theme painters for the main lower-third graphic
//!
//! Four visual treatments over the same (headline, subheadline) pair. Every
//! color is multiplied by the animation opacity and the whole graphic is
//! clipped to the animation's reveal fraction before painting.

use eframe::egui::{
    self, Color32, CornerRadius, FontId, Pos2, Rect, Shape, Stroke, Vec2, pos2, vec2,
};

use super::animation::AnimationEffect;
use crate::color;
use crate::config::{DEFAULT_PRIMARY, DEFAULT_SECONDARY, OverlayConfig, OverlayPosition, Theme};
use crate::fonts::FontLibrary;

/// Horizontal stage margin in pixels
pub const MARGIN_X: f32 = 48.0;

/// Gap between the graphic and the bottom of the stage, leaving room for the
/// ticker band
pub const MARGIN_BOTTOM: f32 = 64.0;

const GAMING_SKEW: f32 = 0.2126; // tan(12 deg)

struct Palette {
    primary: Color32,
    secondary: Color32,
    opacity: f32,
}

impl Palette {
    fn from_config(config: &OverlayConfig, opacity: f32) -> Self {
        Self {
            primary: color::parse_or(&config.primary_color, DEFAULT_PRIMARY),
            secondary: color::parse_or(&config.secondary_color, DEFAULT_SECONDARY),
            opacity,
        }
    }

    fn fade(&self, color: Color32) -> Color32 {
        color.gamma_multiply(self.opacity)
    }
}

/// Top-left corner for a graphic of `size`, anchored to the configured
/// bottom position and displaced by the animation offset
fn anchor_origin(stage: Rect, position: OverlayPosition, size: Vec2, offset_y: f32) -> Pos2 {
    let y = stage.max.y - MARGIN_BOTTOM - size.y + offset_y;
    let x = match position {
        OverlayPosition::BottomLeft => stage.min.x + MARGIN_X,
        OverlayPosition::BottomCenter => stage.center().x - size.x / 2.0,
        OverlayPosition::BottomRight => stage.max.x - MARGIN_X - size.x,
    };
    pos2(x, y)
}

/// Paint the lower third for the configured theme
pub fn draw_lower_third(
    painter: &egui::Painter,
    stage: Rect,
    config: &OverlayConfig,
    fonts: &FontLibrary,
    effect: &AnimationEffect,
) {
    if effect.opacity <= 0.0 || effect.reveal <= 0.0 {
        return;
    }

    let family = fonts.family(&config.font_family);
    let palette = Palette::from_config(config, effect.opacity);

    match config.theme {
        Theme::Modern => draw_modern(painter, stage, config, family, &palette, effect),
        Theme::News => draw_news(painter, stage, config, family, &palette, effect),
        Theme::Minimal => draw_minimal(painter, stage, config, family, &palette, effect),
        Theme::Gaming => draw_gaming(painter, stage, config, family, &palette, effect),
    }
}

/// Clip to the revealed fraction of the graphic, growing from its left edge
fn reveal_painter(
    painter: &egui::Painter,
    origin: Pos2,
    size: Vec2,
    reveal: f32,
) -> egui::Painter {
    // Slack covers the gaming theme's skew overhang and shadow offsets
    let slack = 24.0;
    let clip = Rect::from_min_size(
        pos2(origin.x, origin.y - slack),
        vec2((size.x + slack) * reveal, size.y + 2.0 * slack),
    );
    painter.with_clip_rect(clip.intersect(painter.clip_rect()))
}

fn draw_modern(
    painter: &egui::Painter,
    stage: Rect,
    config: &OverlayConfig,
    family: egui::FontFamily,
    palette: &Palette,
    effect: &AnimationEffect,
) {
    let headline = painter.layout_no_wrap(
        config.headline().to_string(),
        FontId::new(26.0, family.clone()),
        palette.fade(Color32::from_rgb(17, 24, 39)),
    );
    let subheadline = painter.layout_no_wrap(
        config.subheadline().to_uppercase(),
        FontId::new(14.0, family),
        palette.fade(palette.secondary),
    );

    let (pad_x, pad_y) = (24.0, 12.0);
    let bar_width = 8.0;
    let card_width = headline.size().x.max(subheadline.size().x) + 2.0 * pad_x;
    let height = headline.size().y + 4.0 + subheadline.size().y + 2.0 * pad_y;
    let size = vec2(bar_width + card_width, height);

    let origin = anchor_origin(stage, config.position, size, effect.offset_y);
    let painter = reveal_painter(painter, origin, size, effect.reveal);

    // Accent bar flush against the card's left edge
    painter.rect_filled(
        Rect::from_min_size(origin, vec2(bar_width, height)),
        CornerRadius::ZERO,
        palette.fade(palette.primary),
    );
    let card = Rect::from_min_size(pos2(origin.x + bar_width, origin.y), vec2(card_width, height));
    painter.rect_filled(
        card,
        CornerRadius {
            nw: 0,
            ne: 8,
            sw: 0,
            se: 8,
        },
        palette.fade(Color32::WHITE),
    );

    let text_x = card.min.x + pad_x;
    painter.galley(
        pos2(text_x, card.min.y + pad_y),
        headline.clone(),
        Color32::PLACEHOLDER,
    );
    painter.galley(
        pos2(text_x, card.min.y + pad_y + headline.size().y + 4.0),
        subheadline,
        Color32::PLACEHOLDER,
    );
}

fn draw_news(
    painter: &egui::Painter,
    stage: Rect,
    config: &OverlayConfig,
    family: egui::FontFamily,
    palette: &Palette,
    effect: &AnimationEffect,
) {
    let headline = painter.layout_no_wrap(
        config.headline().to_uppercase(),
        FontId::new(24.0, family.clone()),
        palette.fade(Color32::WHITE),
    );
    let subheadline = painter.layout_no_wrap(
        config.subheadline().to_uppercase(),
        FontId::new(16.0, family),
        palette.fade(Color32::BLACK),
    );

    let (indent, overlap) = (16.0, 4.0);
    let top_band = vec2(headline.size().x + 48.0, headline.size().y + 16.0);
    let bottom_band = vec2(subheadline.size().x + 32.0, subheadline.size().y + 8.0);
    let size = vec2(
        top_band.x.max(indent + bottom_band.x),
        top_band.y + bottom_band.y - overlap,
    );

    let origin = anchor_origin(stage, config.position, size, effect.offset_y);
    let painter = reveal_painter(painter, origin, size, effect.reveal);

    // Stacked bands, the lower one indented to suggest layering
    let top_rect = Rect::from_min_size(origin, top_band);
    painter.rect_filled(top_rect, CornerRadius::ZERO, palette.fade(palette.primary));
    painter.galley(
        pos2(top_rect.min.x + 24.0, top_rect.center().y - headline.size().y / 2.0),
        headline,
        Color32::PLACEHOLDER,
    );

    let bottom_rect = Rect::from_min_size(
        pos2(origin.x + indent, top_rect.max.y - overlap),
        bottom_band,
    );
    painter.rect_filled(
        bottom_rect,
        CornerRadius::ZERO,
        palette.fade(palette.secondary),
    );
    painter.galley(
        pos2(
            bottom_rect.min.x + 16.0,
            bottom_rect.center().y - subheadline.size().y / 2.0,
        ),
        subheadline,
        Color32::PLACEHOLDER,
    );
}

fn draw_minimal(
    painter: &egui::Painter,
    stage: Rect,
    config: &OverlayConfig,
    family: egui::FontFamily,
    palette: &Palette,
    effect: &AnimationEffect,
) {
    let headline = painter.layout_no_wrap(
        config.headline().to_string(),
        FontId::new(24.0, family.clone()),
        palette.fade(Color32::WHITE),
    );
    let subheadline = painter.layout_no_wrap(
        config.subheadline().to_uppercase(),
        FontId::new(12.0, family),
        palette.fade(palette.primary),
    );

    let (pad_x, pad_y) = (24.0, 16.0);
    let border_width = 4.0;
    let size = vec2(
        border_width + headline.size().x.max(subheadline.size().x) + 2.0 * pad_x,
        headline.size().y + 4.0 + subheadline.size().y + 2.0 * pad_y,
    );

    let origin = anchor_origin(stage, config.position, size, effect.offset_y);
    let painter = reveal_painter(painter, origin, size, effect.reveal);

    let panel = Rect::from_min_size(origin, size);
    painter.rect_filled(
        panel,
        CornerRadius {
            nw: 0,
            ne: 12,
            sw: 0,
            se: 12,
        },
        palette.fade(Color32::from_white_alpha(26)),
    );
    painter.rect_filled(
        Rect::from_min_size(origin, vec2(border_width, size.y)),
        CornerRadius::ZERO,
        palette.fade(Color32::WHITE),
    );

    let text_x = panel.min.x + border_width + pad_x;
    painter.galley(
        pos2(text_x, panel.min.y + pad_y),
        headline.clone(),
        Color32::PLACEHOLDER,
    );
    painter.galley(
        pos2(text_x, panel.min.y + pad_y + headline.size().y + 4.0),
        subheadline,
        Color32::PLACEHOLDER,
    );
}

fn draw_gaming(
    painter: &egui::Painter,
    stage: Rect,
    config: &OverlayConfig,
    family: egui::FontFamily,
    palette: &Palette,
    effect: &AnimationEffect,
) {
    let headline_text = config.headline().to_string();
    let headline = painter.layout_no_wrap(
        headline_text.clone(),
        FontId::new(28.0, family.clone()),
        palette.fade(Color32::WHITE),
    );
    let shadow = painter.layout_no_wrap(
        headline_text,
        FontId::new(28.0, family.clone()),
        palette.fade(palette.primary),
    );
    let subheadline = painter.layout_no_wrap(
        config.subheadline().to_uppercase(),
        FontId::new(14.0, family),
        palette.fade(Color32::from_rgb(209, 213, 219)),
    );

    let (pad_x, pad_y) = (32.0, 16.0);
    let border_width = 6.0;
    let size = vec2(
        border_width + headline.size().x.max(subheadline.size().x) + 2.0 * pad_x,
        headline.size().y + 4.0 + subheadline.size().y + 2.0 * pad_y,
    );

    let origin = anchor_origin(stage, config.position, size, effect.offset_y);
    let painter = reveal_painter(painter, origin, size, effect.reveal);

    // Skewed dark panel: top edge leans right of the bottom edge
    let skew = GAMING_SKEW * size.y;
    let panel = Rect::from_min_size(origin, size);
    painter.add(Shape::convex_polygon(
        vec![
            pos2(panel.min.x + skew, panel.min.y),
            pos2(panel.max.x + skew, panel.min.y),
            pos2(panel.max.x, panel.max.y),
            pos2(panel.min.x, panel.max.y),
        ],
        palette.fade(Color32::from_black_alpha(204)),
        Stroke::NONE,
    ));
    painter.add(Shape::convex_polygon(
        vec![
            pos2(panel.min.x + skew, panel.min.y),
            pos2(panel.min.x + skew + border_width, panel.min.y),
            pos2(panel.min.x + border_width, panel.max.y),
            pos2(panel.min.x, panel.max.y),
        ],
        palette.fade(palette.primary),
        Stroke::NONE,
    ));

    let text_x = panel.min.x + border_width + pad_x;
    let headline_pos = pos2(text_x, panel.min.y + pad_y);
    // Offset copy in the primary color stands in for the text shadow
    painter.galley(headline_pos + vec2(2.0, 2.0), shadow, Color32::PLACEHOLDER);
    painter.galley(headline_pos, headline.clone(), Color32::PLACEHOLDER);
    painter.galley(
        pos2(text_x, panel.min.y + pad_y + headline.size().y + 4.0),
        subheadline,
        Color32::PLACEHOLDER,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1280.0, 720.0))
    }

    #[test]
    fn test_anchor_rests_above_bottom_margin() {
        let size = vec2(300.0, 100.0);
        let origin = anchor_origin(stage(), OverlayPosition::BottomLeft, size, 0.0);
        assert_eq!(origin.x, MARGIN_X);
        assert_eq!(origin.y, 720.0 - MARGIN_BOTTOM - size.y);
    }

    #[test]
    fn test_anchor_positions_are_distinct() {
        let size = vec2(300.0, 100.0);
        let left = anchor_origin(stage(), OverlayPosition::BottomLeft, size, 0.0);
        let center = anchor_origin(stage(), OverlayPosition::BottomCenter, size, 0.0);
        let right = anchor_origin(stage(), OverlayPosition::BottomRight, size, 0.0);

        assert!(left.x < center.x && center.x < right.x);
        assert_eq!(center.x, 1280.0 / 2.0 - size.x / 2.0);
        assert_eq!(right.x, 1280.0 - MARGIN_X - size.x);
    }

    #[test]
    fn test_animation_offset_pushes_graphic_down() {
        let size = vec2(300.0, 100.0);
        let at_rest = anchor_origin(stage(), OverlayPosition::BottomLeft, size, 0.0);
        let sliding = anchor_origin(stage(), OverlayPosition::BottomLeft, size, 32.0);
        assert_eq!(sliding.y - at_rest.y, 32.0);
    }
}
