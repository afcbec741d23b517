//! # UI Common Components
//!
//! Shared styling for the form panel and the diagram canvas.

use eframe::egui::{Color32, Frame, Stroke};

/// Centralized color palette for the dark theme.
pub struct UiColors;

impl UiColors {
    /// Canvas background behind the controller (RGB: 20, 20, 20)
    pub const CANVAS_BG: Color32 = Color32::from_rgb(20, 20, 20);

    /// Background of nested form sections (RGB: 25, 25, 25)
    pub const INNER_BG: Color32 = Color32::from_rgb(25, 25, 25);

    /// Border color for component separation (RGB: 60, 60, 60)
    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 60);

    /// Positive status, e.g. all images loaded (RGB: 50, 200, 20) - Green
    pub const ACTIVE: Color32 = Color32::from_rgb(50, 200, 20);

    /// Negative status, e.g. a rejected code (RGB: 200, 50, 20) - Red
    pub const INACTIVE: Color32 = Color32::from_rgb(200, 50, 20);

    /// Secondary text such as the loading notice (RGB: 140, 140, 140)
    pub const TEXT_DIM: Color32 = Color32::from_rgb(140, 140, 140);
}

/// Creates a styled frame with consistent margins and border.
pub fn create_frame(bg_color: Color32, border_color: Color32) -> Frame {
    Frame::new()
        .stroke(Stroke::new(1.0, border_color))
        .fill(bg_color)
        .inner_margin(4)
        .outer_margin(2)
}
