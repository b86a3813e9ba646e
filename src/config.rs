//! Overlay configuration and the content slot store
//!
//! A single `OverlayConfig` instance is owned by the host shell and passed by
//! mutable reference to the control surface and the renderer. Independent
//! scalar fields are edited directly by the form widgets; everything touching
//! the slot store goes through the named methods below.

use std::fmt;

use tracing::debug;

use crate::generate::GeneratedContent;

/// Number of reusable content slots; fixed for the whole session
pub const SLOT_COUNT: usize = 10;

/// Default accent color (indigo)
pub const DEFAULT_PRIMARY: &str = "#6366f1";

/// Default secondary color (light gray)
pub const DEFAULT_SECONDARY: &str = "#f3f4f6";

pub type SlotId = u32;

/// One reusable (headline, subheadline) preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSlot {
    pub id: SlotId,
    pub headline: String,
    pub subheadline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Modern,
    News,
    Minimal,
    Gaming,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Modern, Theme::News, Theme::Minimal, Theme::Gaming];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Modern => "Modern",
            Theme::News => "News",
            Theme::Minimal => "Minimal",
            Theme::Gaming => "Gaming",
        }
    }

    /// Parse a theme name; unknown names fall back to the default theme
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "modern" => Theme::Modern,
            "news" => Theme::News,
            "minimal" => Theme::Minimal,
            "gaming" => Theme::Gaming,
            other => {
                debug!(name = other, "Unknown theme name, using default");
                Theme::default()
            }
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Modern => "modern",
            Theme::News => "news",
            Theme::Minimal => "minimal",
            Theme::Gaming => "gaming",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    Fade,
    #[default]
    Slide,
    Typewriter,
}

impl Animation {
    pub const ALL: [Animation; 3] = [Animation::Fade, Animation::Slide, Animation::Typewriter];

    pub fn label(self) -> &'static str {
        match self {
            Animation::Fade => "Fade",
            Animation::Slide => "Slide",
            Animation::Typewriter => "Typewriter",
        }
    }

    /// Parse an animation name; unknown names fall back to the default
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "fade" => Animation::Fade,
            "slide" => Animation::Slide,
            "typewriter" => Animation::Typewriter,
            other => {
                debug!(name = other, "Unknown animation name, using default");
                Animation::default()
            }
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Animation::Fade => "fade",
            Animation::Slide => "slide",
            Animation::Typewriter => "typewriter",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPosition {
    #[default]
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl OverlayPosition {
    pub const ALL: [OverlayPosition; 3] = [
        OverlayPosition::BottomLeft,
        OverlayPosition::BottomCenter,
        OverlayPosition::BottomRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OverlayPosition::BottomLeft => "Bottom left",
            OverlayPosition::BottomCenter => "Bottom center",
            OverlayPosition::BottomRight => "Bottom right",
        }
    }

    /// Parse a position name; unknown names fall back to the default
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "bottom-left" | "left" => OverlayPosition::BottomLeft,
            "bottom-center" | "center" => OverlayPosition::BottomCenter,
            "bottom-right" | "right" => OverlayPosition::BottomRight,
            other => {
                debug!(name = other, "Unknown position name, using default");
                OverlayPosition::default()
            }
        }
    }
}

impl fmt::Display for OverlayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverlayPosition::BottomLeft => "bottom-left",
            OverlayPosition::BottomCenter => "bottom-center",
            OverlayPosition::BottomRight => "bottom-right",
        })
    }
}

/// Editable field of a content slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    Headline,
    Subheadline,
}

/// Session configuration for the whole overlay
///
/// The active headline/subheadline are derived from the active slot via
/// [`OverlayConfig::headline`] and [`OverlayConfig::subheadline`] rather than
/// stored twice, so slot edits can never drift out of sync with the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    pub theme: Theme,
    pub animation: Animation,
    pub position: OverlayPosition,
    /// Family name from the fixed list offered by the font selector
    pub font_family: String,
    /// Hex color strings; any string is accepted and the renderer falls back
    /// to the defaults when parsing fails
    pub primary_color: String,
    pub secondary_color: String,
    /// The on-air toggle
    pub is_visible: bool,
    /// Forces visibility in the editor without touching `is_visible`
    pub preview_mode: bool,
    pub ticker_text: String,
    pub show_live_badge: bool,
    pub show_clock: bool,
    slots: Vec<ContentSlot>,
    active_slot_id: SlotId,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        let slots = (1..=SLOT_COUNT as SlotId)
            .map(|id| ContentSlot {
                id,
                headline: if id == 1 {
                    "John Doe".to_string()
                } else {
                    format!("Headline {id}")
                },
                subheadline: if id == 1 {
                    "Software Engineer & Streamer".to_string()
                } else {
                    format!("Subheadline Description {id}")
                },
            })
            .collect();

        Self {
            theme: Theme::default(),
            animation: Animation::default(),
            position: OverlayPosition::default(),
            font_family: crate::fonts::DEFAULT_FONT.to_string(),
            primary_color: DEFAULT_PRIMARY.to_string(),
            secondary_color: DEFAULT_SECONDARY.to_string(),
            is_visible: true,
            preview_mode: false,
            ticker_text: "Welcome to the stream! Don't forget to follow and subscribe for more content."
                .to_string(),
            show_live_badge: true,
            show_clock: true,
            slots,
            active_slot_id: 1,
        }
    }

    pub fn slots(&self) -> &[ContentSlot] {
        &self.slots
    }

    /// Mutable field access to the slots; the slice view keeps the set itself
    /// fixed (no slot can be added, removed or reordered)
    pub fn slots_mut(&mut self) -> &mut [ContentSlot] {
        &mut self.slots
    }

    pub fn active_slot_id(&self) -> SlotId {
        self.active_slot_id
    }

    pub fn active_slot(&self) -> &ContentSlot {
        self.slots
            .iter()
            .find(|slot| slot.id == self.active_slot_id)
            .unwrap_or(&self.slots[0])
    }

    /// Headline shown by the overlay, derived from the active slot
    pub fn headline(&self) -> &str {
        &self.active_slot().headline
    }

    /// Subheadline shown by the overlay, derived from the active slot
    pub fn subheadline(&self) -> &str {
        &self.active_slot().subheadline
    }

    /// Make the slot with `id` active; selecting an unknown id is ignored
    pub fn select_slot(&mut self, id: SlotId) {
        if self.slots.iter().any(|slot| slot.id == id) {
            self.active_slot_id = id;
        } else {
            debug!(id, "Ignoring selection of unknown slot");
        }
    }

    /// Overwrite one field of the slot with `id`; unknown ids are ignored
    pub fn edit_slot(&mut self, id: SlotId, field: SlotField, value: String) {
        match self.slots.iter_mut().find(|slot| slot.id == id) {
            Some(slot) => match field {
                SlotField::Headline => slot.headline = value,
                SlotField::Subheadline => slot.subheadline = value,
            },
            None => debug!(id, "Ignoring edit of unknown slot"),
        }
    }

    /// Write a generation result into the slot that was active when the
    /// request was issued, and bring the overlay on air
    pub fn apply_generated(&mut self, slot_id: SlotId, content: &GeneratedContent) {
        if !self.slots.iter().any(|slot| slot.id == slot_id) {
            debug!(slot_id, "Ignoring generated content for unknown slot");
            return;
        }
        self.edit_slot(slot_id, SlotField::Headline, content.headline.clone());
        self.edit_slot(slot_id, SlotField::Subheadline, content.subheadline.clone());
        self.is_visible = true;
    }

    pub fn toggle_visible(&mut self) {
        self.is_visible = !self.is_visible;
    }

    /// Shown if on air or forced visible by preview mode
    pub fn effective_visibility(&self) -> bool {
        self.is_visible || self.preview_mode
    }

    /// The ticker renders only while the overlay is effectively visible and
    /// has text to scroll
    pub fn ticker_active(&self) -> bool {
        self.effective_visibility() && !self.ticker_text.is_empty()
    }
}
