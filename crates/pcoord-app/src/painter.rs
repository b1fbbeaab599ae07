//! Scene replay onto an egui painter

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Stroke, Vec2};
use pcoord_core::Point;
use pcoord_render::{
    categorical_color, Element, Group, GroupKey, Renderer, RendererCapabilities, Rgba,
};

fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Paints scene elements inside a widget rect
pub struct EguiRenderer<'a> {
    painter: &'a Painter,
    origin: Pos2,
    text_color: Color32,
    grid_color: Color32,
    series_color: Color32,
}

impl<'a> EguiRenderer<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, visuals: &egui::Visuals) -> Self {
        Self {
            painter,
            origin,
            text_color: visuals.text_color(),
            grid_color: visuals.weak_text_color().gamma_multiply(0.5),
            series_color: to_color32(categorical_color(0)),
        }
    }

    fn pos(&self, point: Point) -> Pos2 {
        self.origin + Vec2::new(point.x as f32, point.y as f32)
    }

    fn line_stroke(&self, element: &Element) -> Stroke {
        if element.has_class("ct-mean") {
            Stroke::new(3.0, self.text_color)
        } else if element.has_class("ct-grid") {
            Stroke::new(1.0, self.grid_color)
        } else {
            Stroke::new(1.5, self.series_color)
        }
    }
}

impl Renderer for EguiRenderer<'_> {
    fn begin_frame(&mut self, _width: f64, _height: f64, _class: &str) {}

    fn end_frame(&mut self) {}

    fn begin_group(&mut self, group: &Group) {
        if let Some(GroupKey::Series(index)) = group.key {
            self.series_color = to_color32(categorical_color(index));
        }
    }

    fn end_group(&mut self) {}

    fn draw_line(&mut self, start: Point, end: Point, element: &Element) {
        let stroke = self.line_stroke(element);
        self.painter.line_segment([self.pos(start), self.pos(end)], stroke);
    }

    fn draw_rect(&mut self, min: Point, max: Point, element: &Element) {
        let rect = Rect::from_min_max(self.pos(min), self.pos(max));
        let fill = if element.has_class("ct-ruler") {
            self.text_color
        } else {
            to_color32(categorical_color(0).with_alpha(90))
        };
        self.painter.rect_filled(rect, Rounding::ZERO, fill);
    }

    fn draw_text(&mut self, text: &str, position: Point, element: &Element) {
        let size = if element.has_class("ct-histogram-label") { 9.0 } else { 11.0 };
        self.painter.text(
            self.pos(position),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(size),
            self.text_color,
        );
    }

    fn capabilities(&self) -> RendererCapabilities {
        RendererCapabilities {
            name: "egui",
            retains_hidden_groups: false,
        }
    }
}
