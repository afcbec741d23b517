//! [`Surface`] implementation on top of an egui [`Painter`].

use super::{rounded_rect_outline, LinearGradient, Surface};
use crate::assets::{AssetStore, ImageId};
use eframe::egui::{
    pos2, Align2, Color32, CornerRadius, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2,
};

/// Corner arc resolution of the gradient highlight.
const CORNER_SEGMENTS: usize = 6;

/// Paints into a rectangle of an egui painter.
///
/// Renderer coordinates are relative to `rect.min`.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    assets: &'a AssetStore,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, assets: &'a AssetStore, background: Color32) -> Self {
        Self {
            painter,
            rect,
            assets,
            background,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.rect.min.to_vec2()
    }
}

impl Surface for EguiSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn image_size(&self, image: ImageId) -> Option<Vec2> {
        self.assets.size(image)
    }

    fn clear(&mut self) {
        self.painter
            .rect_filled(self.rect, CornerRadius::ZERO, self.background);
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect) {
        let Some(texture) = self.assets.texture(image) else {
            return;
        };
        self.painter.image(
            texture.id(),
            rect.translate(self.rect.min.to_vec2()),
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    fn stroke_path(&mut self, points: &[Pos2], stroke: Stroke) {
        let points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter.line(points, stroke);
    }

    fn fill_gradient_rounded_rect(&mut self, rect: Rect, radius: f32, gradient: LinearGradient) {
        let mut mesh = Mesh::default();
        let center = rect.center();
        mesh.colored_vertex(self.to_screen(center), gradient.color_at(center));

        let outline = rounded_rect_outline(rect, radius, CORNER_SEGMENTS);
        for point in &outline {
            mesh.colored_vertex(self.to_screen(*point), gradient.color_at(*point));
        }

        let count = outline.len() as u32;
        for i in 0..count {
            mesh.add_triangle(0, 1 + i, 1 + (i + 1) % count);
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn measure_text(&self, text: &str, font: &FontId) -> f32 {
        self.painter
            .layout_no_wrap(text.to_owned(), font.clone(), Color32::WHITE)
            .size()
            .x
    }

    fn fill_text(&mut self, pos: Pos2, align: Align2, text: &str, font: &FontId, color: Color32) {
        self.painter
            .text(self.to_screen(pos), align, text, font.clone(), color);
    }
}
