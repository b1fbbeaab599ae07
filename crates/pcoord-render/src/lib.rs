//! Rendering abstraction layer
//!
//! Charts lay themselves out into a retained [`Scene`]. A scene is then
//! replayed into any [`Renderer`]: the SVG writer in this crate, or an
//! immediate-mode painter supplied by a host application.

pub mod palette;
pub mod scene;
pub mod svg;

pub use pcoord_core::Point;
pub use palette::{alpha_numerate, categorical_color, default_stylesheet, Rgba};
pub use scene::{Element, Group, GroupKey, Scene, Shape};
pub use svg::SvgRenderer;

/// Trait for renderers
pub trait Renderer {
    /// Begin a new frame
    fn begin_frame(&mut self, width: f64, height: f64, class: &str);

    /// End the current frame
    fn end_frame(&mut self);

    /// Open a group; every element until `end_group` belongs to it
    fn begin_group(&mut self, group: &Group);

    /// Close the current group
    fn end_group(&mut self);

    /// Draw a line
    fn draw_line(&mut self, start: Point, end: Point, element: &Element);

    /// Draw a rectangle
    fn draw_rect(&mut self, min: Point, max: Point, element: &Element);

    /// Draw text anchored at its top-left corner
    fn draw_text(&mut self, text: &str, position: Point, element: &Element);

    /// Get renderer capabilities
    fn capabilities(&self) -> RendererCapabilities;
}

/// Renderer capabilities
#[derive(Debug, Clone)]
pub struct RendererCapabilities {
    pub name: &'static str,
    /// Hidden groups are still emitted (and toggled by presentation)
    pub retains_hidden_groups: bool,
}
