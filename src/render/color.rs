//! CSS color strings to egui colors and back.

use eframe::egui::Color32;

/// Parses the subset of CSS colors a label color can reasonably hold.
///
/// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` and a few
/// named colors. Returns `None` for anything else.
pub fn parse_css_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_function(args);
    }

    named_color(&lower)
}

/// Formats a color as `#rrggbb` (alpha dropped).
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let [r, g, b, a] = match hex.len() {
        3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
        4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

fn parse_rgb_function(args: &str) -> Option<Color32> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let channel = |part: &str| -> Option<u8> {
        match part.strip_suffix('%') {
            Some(percent) => percent
                .parse::<f32>()
                .ok()
                .map(|p| (p.clamp(0.0, 100.0) * 2.55).round() as u8),
            None => part.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8),
        }
    };
    let alpha = |part: &str| -> Option<u8> {
        match part.strip_suffix('%') {
            Some(percent) => percent
                .parse::<f32>()
                .ok()
                .map(|p| (p.clamp(0.0, 100.0) * 2.55).round() as u8),
            None => part.parse::<f32>().ok().map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8),
        }
    };

    match parts.as_slice() {
        [r, g, b] => Some(Color32::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => Some(Color32::from_rgba_unmultiplied(
            channel(r)?,
            channel(g)?,
            channel(b)?,
            alpha(a)?,
        )),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color32> {
    let color = match name {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "lime" => Color32::from_rgb(0, 255, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "cyan" | "aqua" => Color32::from_rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color32::from_rgb(255, 0, 255),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "transparent" => Color32::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}
