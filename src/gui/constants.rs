//! GUI-specific constants for layout, colors and intervals

use eframe::egui;

/// Studio window dimensions
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 720.0;
pub const WINDOW_MIN_WIDTH: f32 = 960.0;
pub const WINDOW_MIN_HEIGHT: f32 = 540.0;

/// Control panel width
pub const PANEL_WIDTH: f32 = 360.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Stage background while editing; broadcast mode paints no background
pub const STAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 24, 27);

/// On-air button colors
pub const ON_AIR: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
pub const OFF_AIR: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);

/// How long the copy button acknowledges a copied command
pub const COPY_FEEDBACK_SECS: f32 = 2.0;

/// Clock refresh polling interval while the clock is mounted
pub const CLOCK_POLL_MS: u64 = 250;
