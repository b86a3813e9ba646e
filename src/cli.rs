//! Command-line arguments
//!
//! `--broadcast` selects the clean capture view at startup; the remaining
//! flags seed the session's appearance and content so a relaunched broadcast
//! window matches the editing session it was copied from. Unknown theme,
//! animation and position names degrade to the defaults instead of failing.

use clap::Parser;

use crate::config::{Animation, OverlayConfig, OverlayPosition, SlotField, Theme};

#[derive(Parser, Debug, Default)]
#[command(name = "lower-third-studio", about = "Lower third overlay studio for streamers")]
pub struct Args {
    /// Start in broadcast mode (clean output for window capture)
    #[arg(long)]
    pub broadcast: bool,

    /// Overlay theme: modern, news, minimal or gaming
    #[arg(long)]
    pub theme: Option<String>,

    /// Show/hide animation: fade, slide or typewriter
    #[arg(long)]
    pub animation: Option<String>,

    /// Overlay position: bottom-left, bottom-center or bottom-right
    #[arg(long)]
    pub position: Option<String>,

    /// Overlay font family
    #[arg(long)]
    pub font: Option<String>,

    /// Primary accent color (hex)
    #[arg(long)]
    pub primary_color: Option<String>,

    /// Secondary color (hex)
    #[arg(long)]
    pub secondary_color: Option<String>,

    /// Headline for the active slot
    #[arg(long)]
    pub headline: Option<String>,

    /// Subheadline for the active slot
    #[arg(long)]
    pub subheadline: Option<String>,

    /// Ticker text (empty disables the ticker)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Hide the live badge
    #[arg(long)]
    pub no_live_badge: bool,

    /// Hide the clock
    #[arg(long)]
    pub no_clock: bool,
}

/// Build the session configuration from the default one plus the seed flags
pub fn build_config(args: &Args) -> OverlayConfig {
    let mut config = OverlayConfig::new();

    if let Some(theme) = &args.theme {
        config.theme = Theme::from_name(theme);
    }
    if let Some(animation) = &args.animation {
        config.animation = Animation::from_name(animation);
    }
    if let Some(position) = &args.position {
        config.position = OverlayPosition::from_name(position);
    }
    if let Some(font) = &args.font {
        config.font_family = font.clone();
    }
    if let Some(color) = &args.primary_color {
        config.primary_color = color.clone();
    }
    if let Some(color) = &args.secondary_color {
        config.secondary_color = color.clone();
    }

    let active = config.active_slot_id();
    if let Some(headline) = &args.headline {
        config.edit_slot(active, SlotField::Headline, headline.clone());
    }
    if let Some(subheadline) = &args.subheadline {
        config.edit_slot(active, SlotField::Subheadline, subheadline.clone());
    }

    if let Some(ticker) = &args.ticker {
        config.ticker_text = ticker.clone();
    }
    config.show_live_badge = !args.no_live_badge;
    config.show_clock = !args.no_clock;

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_config() {
        let config = build_config(&Args::default());
        assert_eq!(config, OverlayConfig::new());
    }

    #[test]
    fn test_seed_flags_apply() {
        let args = Args {
            theme: Some("gaming".to_string()),
            animation: Some("fade".to_string()),
            position: Some("bottom-right".to_string()),
            font: Some("Oswald".to_string()),
            primary_color: Some("#ff0000".to_string()),
            headline: Some("Jane Roe".to_string()),
            subheadline: Some("Speedrunner".to_string()),
            ticker: Some(String::new()),
            no_clock: true,
            ..Args::default()
        };
        let config = build_config(&args);

        assert_eq!(config.theme, Theme::Gaming);
        assert_eq!(config.animation, Animation::Fade);
        assert_eq!(config.position, OverlayPosition::BottomRight);
        assert_eq!(config.font_family, "Oswald");
        assert_eq!(config.primary_color, "#ff0000");
        assert_eq!(config.headline(), "Jane Roe");
        assert_eq!(config.subheadline(), "Speedrunner");
        assert!(config.ticker_text.is_empty());
        assert!(config.show_live_badge);
        assert!(!config.show_clock);
    }

    #[test]
    fn test_unknown_names_degrade_to_defaults() {
        let args = Args {
            theme: Some("vaporwave".to_string()),
            animation: Some("spin".to_string()),
            position: Some("top-center".to_string()),
            ..Args::default()
        };
        let config = build_config(&args);

        assert_eq!(config.theme, Theme::Modern);
        assert_eq!(config.animation, Animation::Slide);
        assert_eq!(config.position, OverlayPosition::BottomLeft);
    }

    #[test]
    fn test_parse_broadcast_flag() {
        let args = Args::parse_from(["lower-third-studio", "--broadcast"]);
        assert!(args.broadcast);

        let args = Args::parse_from(["lower-third-studio"]);
        assert!(!args.broadcast);
    }

    #[test]
    fn test_parse_value_flags() {
        let args = Args::parse_from([
            "lower-third-studio",
            "--theme",
            "news",
            "--primary-color",
            "#123456",
            "--no-live-badge",
        ]);
        assert_eq!(args.theme.as_deref(), Some("news"));
        assert_eq!(args.primary_color.as_deref(), Some("#123456"));
        assert!(args.no_live_badge);
    }
}
