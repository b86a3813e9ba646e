//! Hex color parsing for the configuration's free-form color fields

use eframe::egui;

/// Parse hex color string - supports both #RRGGBB and #AARRGGBB formats
pub fn parse_hex(hex: &str) -> Option<egui::Color32> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        6 => {
            // RGB format - assume full opacity
            let rr = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let gg = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let bb = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(egui::Color32::from_rgba_unmultiplied(rr, gg, bb, 255))
        }
        8 => {
            // ARGB format
            let aa = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let rr = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let gg = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let bb = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(egui::Color32::from_rgba_unmultiplied(rr, gg, bb, aa))
        }
        _ => None,
    }
}

/// Parse a color field, falling back to a known-good default string when the
/// field holds something unparseable
pub fn parse_or(hex: &str, fallback: &str) -> egui::Color32 {
    parse_hex(hex)
        .or_else(|| parse_hex(fallback))
        .unwrap_or(egui::Color32::WHITE)
}

/// Format egui Color32 to hex string (#AARRGGBB or #RRGGBB)
pub fn format_hex(color: egui::Color32) -> String {
    if color.a() == 255 {
        // Full opacity - use shorter RGB format
        format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
    } else {
        // Has transparency - use ARGB format
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            color.a(),
            color.r(),
            color.g(),
            color.b()
        )
    }
}
