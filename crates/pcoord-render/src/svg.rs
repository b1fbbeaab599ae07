//! SVG document writer

use std::fmt::Write;

use pcoord_core::Point;

use crate::{palette, Element, Group, Renderer, RendererCapabilities};

/// Namespace used for `ct:` attributes
pub const CT_NAMESPACE: &str = "urn:pcoord:ct";

/// Writes a scene as a standalone SVG document
pub struct SvgRenderer {
    output: String,
    stylesheet: Option<String>,
    depth: usize,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            stylesheet: Some(palette::default_stylesheet()),
            depth: 0,
        }
    }

    /// Replace the embedded stylesheet, or embed none
    pub fn with_stylesheet(mut self, stylesheet: Option<String>) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// The document written so far
    pub fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
    }

    fn write_attributes(&mut self, class: &str, attributes: &[(String, String)]) {
        if !class.is_empty() {
            let _ = write!(self.output, " class=\"{}\"", escape(class));
        }
        for (name, value) in attributes {
            let _ = write!(self.output, " {}=\"{}\"", escape(name), escape(value));
        }
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SvgRenderer {
    fn begin_frame(&mut self, width: f64, height: f64, class: &str) {
        self.output.clear();
        let _ = writeln!(
            self.output,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:ct=\"{}\" width=\"{}\" height=\"{}\" class=\"{}\">",
            CT_NAMESPACE,
            num(width),
            num(height),
            escape(class)
        );
        self.depth = 1;
        if let Some(css) = self.stylesheet.take() {
            self.indent();
            let _ = writeln!(self.output, "<style>\n{}</style>", css);
            self.stylesheet = Some(css);
        }
    }

    fn end_frame(&mut self) {
        self.depth = 0;
        self.output.push_str("</svg>\n");
    }

    fn begin_group(&mut self, group: &Group) {
        self.indent();
        self.output.push_str("<g");
        self.write_attributes(&group.class, &group.attributes);
        if group.hidden {
            self.output.push_str(" style=\"display: none\"");
        }
        self.output.push_str(">\n");
        self.depth += 1;
    }

    fn end_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.output.push_str("</g>\n");
    }

    fn draw_line(&mut self, start: Point, end: Point, element: &Element) {
        self.indent();
        let _ = write!(
            self.output,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            num(start.x),
            num(start.y),
            num(end.x),
            num(end.y)
        );
        self.write_attributes(&element.class, &element.attributes);
        self.output.push_str("/>\n");
    }

    fn draw_rect(&mut self, min: Point, max: Point, element: &Element) {
        self.indent();
        let _ = write!(
            self.output,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            num(min.x),
            num(min.y),
            num(max.x - min.x),
            num(max.y - min.y)
        );
        self.write_attributes(&element.class, &element.attributes);
        self.output.push_str("/>\n");
    }

    fn draw_text(&mut self, text: &str, position: Point, element: &Element) {
        self.indent();
        let _ = write!(self.output, "<text x=\"{}\" y=\"{}\"", num(position.x), num(position.y));
        self.write_attributes(&element.class, &element.attributes);
        let _ = writeln!(self.output, ">{}</text>", escape(text));
    }

    fn capabilities(&self) -> RendererCapabilities {
        RendererCapabilities {
            name: "svg",
            retains_hidden_groups: true,
        }
    }
}

/// Format a coordinate with at most three decimals
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
