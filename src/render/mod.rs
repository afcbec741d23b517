//! # Diagram Renderer
//!
//! Draws the controller and the annotations of every labelled control onto a
//! [`Surface`].
//!
//! ## Frame Structure
//! 1. Skip the frame if any image is missing (nothing is drawn, not even the clear).
//! 2. Clear the surface and draw the base image centred, scaled by the state's scale.
//! 3. Walk [`DRAW_ORDER`]: shared base images when any member is labelled, then
//!    per labelled control its overlay, its arrow and its wrapped label text.
//!
//! Rendering is stateless: the same state on the same canvas size issues the same
//! draw calls.

pub mod color;
pub mod egui_surface;

use crate::assets::ImageId;
use crate::layout::{LayoutEntry, LayoutItem, Overlay, RelPoint, TextAnchor, DRAW_ORDER};
use crate::state::ControllerState;
use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

pub use color::{parse_css_color, to_hex};
pub use egui_surface::EguiSurface;

/// Scale the overlay image sizes in the layout table are expressed at.
pub const OVERLAY_REFERENCE_SCALE: f32 = 0.4;

/// D-pad highlight side length as a fraction of the base image width.
const DPAD_HIGHLIGHT_FRACTION: f32 = 0.015;

/// Primitive drawing operations the renderer needs.
///
/// Coordinates are canvas pixels with the origin at the top-left corner.
pub trait Surface {
    fn size(&self) -> Vec2;

    /// Pixel size of an image, `None` while it is not available.
    fn image_size(&self, image: ImageId) -> Option<Vec2>;

    fn clear(&mut self);

    fn draw_image(&mut self, image: ImageId, rect: Rect);

    /// Strokes an open polyline.
    fn stroke_path(&mut self, points: &[Pos2], stroke: Stroke);

    fn fill_gradient_rounded_rect(&mut self, rect: Rect, radius: f32, gradient: LinearGradient);

    fn measure_text(&self, text: &str, font: &FontId) -> f32;

    fn fill_text(&mut self, pos: Pos2, align: Align2, text: &str, font: &FontId, color: Color32);
}

/// Two-stop linear gradient between `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub from: Pos2,
    pub to: Pos2,
    pub start: Color32,
    pub end: Color32,
}

impl LinearGradient {
    /// Color at `pos`, projected onto the gradient axis and clamped to the stops.
    pub fn color_at(&self, pos: Pos2) -> Color32 {
        let axis = self.to - self.from;
        let length_sq = axis.length_sq();
        let t = if length_sq > 0.0 {
            ((pos - self.from).dot(axis) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let start = self.start.to_srgba_unmultiplied();
        let end = self.end.to_srgba_unmultiplied();
        let mix = |i: usize| (start[i] as f32 + (end[i] as f32 - start[i] as f32) * t).round() as u8;
        Color32::from_rgba_unmultiplied(mix(0), mix(1), mix(2), mix(3))
    }
}

/// Tunable drawing constants.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// Label font size in points
    pub font_size: f32,
    /// Vertical advance between wrapped label lines
    pub line_height: f32,
    /// Length of each arrowhead stroke
    pub arrow_head_length: f32,
    /// Arrow line width
    pub stroke_width: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 12.0,
            arrow_head_length: 10.0,
            stroke_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// Images were not ready, nothing was drawn
    Skipped,
}

/// Maps controller-relative points to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center: Pos2,
    unit: Vec2,
}

impl Projection {
    pub fn new(canvas: Vec2, base_size: Vec2, scale: f32) -> Self {
        Self {
            center: (canvas / 2.0).to_pos2(),
            unit: base_size * scale / 2.0,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn project(&self, point: RelPoint) -> Pos2 {
        self.center + vec2(point.x * self.unit.x, point.y * self.unit.y)
    }
}

pub struct Renderer {
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Draws one complete frame.
    pub fn render(&self, state: &ControllerState, surface: &mut impl Surface) -> FrameOutcome {
        let Some(base_size) = images_ready(&*surface) else {
            return FrameOutcome::Skipped;
        };

        let scale = state.scale();
        let color = parse_css_color(state.color()).unwrap_or(Color32::BLACK);
        let projection = Projection::new(surface.size(), base_size, scale);

        surface.clear();
        surface.draw_image(
            ImageId::Base,
            Rect::from_center_size(projection.center(), base_size * scale),
        );

        for item in DRAW_ORDER.iter() {
            match item {
                LayoutItem::Shared(shared) => {
                    if shared.is_shown(|control| state.is_shown(control)) {
                        draw_overlay_image(surface, &projection, shared.image, shared.at, shared.scale, scale);
                    }
                }
                LayoutItem::Entry(entry) => {
                    let label = state.label(entry.control);
                    if label.is_empty() {
                        continue;
                    }
                    self.draw_entry(surface, &projection, entry, label, scale, base_size, color);
                }
            }
        }

        FrameOutcome::Drawn
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_entry(
        &self,
        surface: &mut impl Surface,
        projection: &Projection,
        entry: &LayoutEntry,
        label: &str,
        scale: f32,
        base_size: Vec2,
        color: Color32,
    ) {
        match entry.overlay {
            Overlay::Image { image, at, scale: image_scale } => {
                draw_overlay_image(surface, projection, image, at, image_scale, scale);
            }
            Overlay::DpadHighlight { at, direction } => {
                let side = base_size.x * DPAD_HIGHLIGHT_FRACTION * scale / OVERLAY_REFERENCE_SCALE;
                let center = projection.project(at);
                let offset = vec2(direction.x, direction.y) * side / 2.0;
                surface.fill_gradient_rounded_rect(
                    Rect::from_center_size(center, Vec2::splat(side)),
                    side / 4.0,
                    LinearGradient {
                        from: center + offset,
                        to: center - offset,
                        start: Color32::WHITE,
                        end: Color32::TRANSPARENT,
                    },
                );
            }
        }

        let points: Vec<Pos2> = entry.arrow.iter().map(|p| projection.project(*p)).collect();
        self.draw_arrow(surface, &points, color);

        let anchor = projection.project(entry.text_at);
        let font = FontId::proportional(self.settings.font_size);
        let max_width = entry
            .max_width
            .map(|policy| policy.evaluate(surface.size().x, anchor.x));
        let lines = wrap_lines(label, max_width, |text| surface.measure_text(text, &font));
        let align = match entry.anchor {
            TextAnchor::Left => Align2::LEFT_CENTER,
            TextAnchor::Right => Align2::RIGHT_CENTER,
        };

        for (i, line) in lines.iter().enumerate() {
            let pos = anchor + vec2(0.0, self.settings.line_height * i as f32);
            surface.fill_text(pos, align, line, &font, color);
        }
    }

    fn draw_arrow(&self, surface: &mut impl Surface, points: &[Pos2], color: Color32) {
        let [.., from, to] = points else {
            return;
        };
        let stroke = Stroke::new(self.settings.stroke_width, color);
        let [left, right] = arrow_head(*from, *to, self.settings.arrow_head_length);

        let mut shaft = points.to_vec();
        shaft.push(left);
        surface.stroke_path(&shaft, stroke);
        surface.stroke_path(&[*to, right], stroke);
    }
}

/// Returns the base image size once every image is available.
fn images_ready(surface: &impl Surface) -> Option<Vec2> {
    if ImageId::ALL.iter().any(|id| surface.image_size(*id).is_none()) {
        return None;
    }
    surface.image_size(ImageId::Base)
}

fn draw_overlay_image(
    surface: &mut impl Surface,
    projection: &Projection,
    image: ImageId,
    at: RelPoint,
    image_scale: f32,
    scale: f32,
) {
    let Some(size) = surface.image_size(image) else {
        return;
    };
    let size = size * image_scale * scale / OVERLAY_REFERENCE_SCALE;
    surface.draw_image(image, Rect::from_center_size(projection.project(at), size));
}

/// End points of the two arrowhead strokes for a segment ending at `to`.
pub fn arrow_head(from: Pos2, to: Pos2, length: f32) -> [Pos2; 2] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let stroke_end = |theta: f32| pos2(to.x - length * theta.cos(), to.y - length * theta.sin());
    [stroke_end(angle - PI / 6.0), stroke_end(angle + PI / 6.0)]
}

/// Greedy word wrap on single spaces.
///
/// A word joins the current line while `line + " " + word` measures strictly less
/// than `max_width`. Without a limit the text stays on one line.
pub fn wrap_lines(text: &str, max_width: Option<f32>, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let Some(max_width) = max_width else {
        return vec![text.to_owned()];
    };

    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or_default().to_owned();
    let mut lines = Vec::new();

    for word in words {
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    lines.push(current);
    lines
}

/// Outline of a rounded rectangle, clockwise from the top-right corner.
pub fn rounded_rect_outline(rect: Rect, radius: f32, segments: usize) -> Vec<Pos2> {
    let radius = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let corners = [
        (pos2(rect.max.x - radius, rect.min.y + radius), -PI / 2.0),
        (pos2(rect.max.x - radius, rect.max.y - radius), 0.0),
        (pos2(rect.min.x + radius, rect.max.y - radius), PI / 2.0),
        (pos2(rect.min.x + radius, rect.min.y + radius), PI),
    ];

    let mut outline = Vec::with_capacity(4 * (segments + 1));
    for (center, start) in corners {
        for step in 0..=segments {
            let theta = start + (PI / 2.0) * step as f32 / segments.max(1) as f32;
            outline.push(center + radius * vec2(theta.cos(), theta.sin()));
        }
    }
    outline
}
