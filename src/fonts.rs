//! Overlay font discovery via fontconfig
//!
//! Resolve the fixed list of overlay font families to files at startup and
//! register them with egui; anything unresolved falls back to the default
//! proportional font.

use std::collections::BTreeSet;
use std::ffi::CString;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use fontconfig::{Fontconfig, Pattern};
use tracing::{debug, info, warn};

/// Font families offered by the control panel
pub const AVAILABLE_FONTS: &[&str] = &["Inter", "Playfair Display", "Roboto", "Oswald"];

pub const DEFAULT_FONT: &str = "Inter";

/// Find the font file for a family name via fontconfig
///
/// Fontconfig does fuzzy matching and may return a fallback for a family
/// that is not installed, so the matched family is verified against the
/// request before the path is accepted.
fn find_font_path(family: &str) -> Result<PathBuf> {
    let fc = Fontconfig::new().context("Failed to initialize fontconfig")?;

    let mut pattern = Pattern::new(&fc);
    let family_cstr =
        CString::new(family).with_context(|| format!("Invalid family name: {}", family))?;
    pattern.add_string(fontconfig::FC_FAMILY, &family_cstr);

    let matched = pattern.font_match();

    if let Some(matched_family) = matched.get_string(fontconfig::FC_FAMILY) {
        if !matched_family.eq_ignore_ascii_case(family) {
            warn!(
                requested = family,
                matched = matched_family,
                "Fontconfig returned different font family - requested font may not be installed"
            );
            return Err(anyhow::anyhow!(
                "Font '{}' not found - fontconfig returned family '{}' instead",
                family,
                matched_family
            ));
        }
    }

    let file_path = matched
        .filename()
        .with_context(|| format!("No font file found for '{}'", family))?;

    let path = PathBuf::from(file_path);
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Font file path '{}' does not exist",
            path.display()
        ));
    }

    debug!(family, path = %path.display(), "Resolved font path");
    Ok(path)
}

/// The overlay families that resolved at startup
///
/// Families that failed to resolve stay selectable in the UI but render with
/// egui's default proportional font.
pub struct FontLibrary {
    registered: BTreeSet<String>,
    load_error: Option<String>,
}

impl FontLibrary {
    /// Resolve every family in [`AVAILABLE_FONTS`] and register the font data
    /// with the egui context
    pub fn load(ctx: &egui::Context) -> Self {
        let mut definitions = egui::FontDefinitions::default();
        let mut registered = BTreeSet::new();
        let mut load_error = None;

        for family in AVAILABLE_FONTS {
            match find_font_path(family).and_then(|path| {
                std::fs::read(&path)
                    .with_context(|| format!("Failed to read font file: {}", path.display()))
            }) {
                Ok(bytes) => {
                    definitions.font_data.insert(
                        family.to_string(),
                        Arc::new(egui::FontData::from_owned(bytes)),
                    );
                    definitions.families.insert(
                        egui::FontFamily::Name((*family).into()),
                        vec![family.to_string()],
                    );
                    registered.insert(family.to_string());
                }
                Err(err) => {
                    warn!(family, error = ?err, "Font unavailable, falling back to default");
                    if load_error.is_none() {
                        load_error = Some(err.to_string());
                    }
                }
            }
        }

        info!(
            count = registered.len(),
            total = AVAILABLE_FONTS.len(),
            "Registered overlay fonts"
        );
        ctx.set_fonts(definitions);

        Self {
            registered,
            load_error,
        }
    }

    /// A library with nothing resolved; every family falls back to the
    /// default proportional font
    pub fn fallback_only() -> Self {
        Self {
            registered: BTreeSet::new(),
            load_error: None,
        }
    }

    /// The egui family to shape text with for a configured family name
    pub fn family(&self, name: &str) -> egui::FontFamily {
        if self.registered.contains(name) {
            egui::FontFamily::Name(name.into())
        } else {
            egui::FontFamily::Proportional
        }
    }

    /// First resolution failure, for the control panel's warning icon
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_library_uses_proportional() {
        let library = FontLibrary::fallback_only();
        for family in AVAILABLE_FONTS {
            assert_eq!(library.family(family), egui::FontFamily::Proportional);
        }
        assert!(library.load_error().is_none());
    }

    #[test]
    fn test_registered_family_is_named() {
        let mut registered = BTreeSet::new();
        registered.insert("Inter".to_string());
        let library = FontLibrary {
            registered,
            load_error: None,
        };
        assert_eq!(library.family("Inter"), egui::FontFamily::Name("Inter".into()));
        assert_eq!(library.family("Oswald"), egui::FontFamily::Proportional);
    }
}
