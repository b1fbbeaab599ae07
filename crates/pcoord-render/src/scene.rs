//! Retained draw commands produced by a render pass

use pcoord_core::Point;

use crate::Renderer;

/// Identifies the groups that callers look up after layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Polyline of one record, by record index
    Series(usize),
    Mean,
    /// Histogram bars of one dimension, by original dimension index
    Histogram(usize),
    Grid,
    Labels,
    Rulers,
}

/// Primitive geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Text { x: f64, y: f64, width: f64, height: f64, text: String },
}

/// A drawn element with its classes and extra attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub class: String,
    /// Attributes such as `ct:value`; names include their namespace prefix
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(shape: Shape, class: impl Into<String>) -> Self {
        Self {
            shape,
            class: class.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

/// An ordered set of elements that is shown or hidden as a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: Option<GroupKey>,
    pub class: String,
    pub attributes: Vec<(String, String)>,
    pub hidden: bool,
    pub elements: Vec<Element>,
}

impl Group {
    pub fn new(key: Option<GroupKey>, class: impl Into<String>) -> Self {
        Self {
            key,
            class: class.into(),
            attributes: Vec::new(),
            hidden: false,
            elements: Vec::new(),
        }
    }

    pub fn attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn push(&mut self, element: Element) -> &mut Element {
        self.elements.push(element);
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    pub fn line(&mut self, start: Point, end: Point, class: impl Into<String>) -> &mut Element {
        self.push(Element::new(
            Shape::Line { x1: start.x, y1: start.y, x2: end.x, y2: end.y },
            class,
        ))
    }

    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        class: impl Into<String>,
    ) -> &mut Element {
        self.push(Element::new(Shape::Rect { x, y, width, height }, class))
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        class: impl Into<String>,
    ) -> &mut Element {
        self.push(Element::new(
            Shape::Text { x, y, width, height, text: text.into() },
            class,
        ))
    }

    /// Line elements of this group in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| matches!(e.shape, Shape::Line { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match &e.shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The full output of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub class: String,
    pub groups: Vec<Group>,
}

impl Scene {
    pub fn new(width: f64, height: f64, class: impl Into<String>) -> Self {
        Self {
            width,
            height,
            class: class.into(),
            groups: Vec::new(),
        }
    }

    /// Append a group and return it for filling
    pub fn add_group(&mut self, key: Option<GroupKey>, class: impl Into<String>) -> &mut Group {
        self.groups.push(Group::new(key, class));
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn group(&self, key: GroupKey) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == Some(key))
    }

    pub fn group_mut(&mut self, key: GroupKey) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.key == Some(key))
    }

    /// Toggle the presentation of a group. Returns false if no such group exists.
    pub fn set_group_hidden(&mut self, key: GroupKey, hidden: bool) -> bool {
        match self.group_mut(key) {
            Some(group) => {
                group.hidden = hidden;
                true
            }
            None => false,
        }
    }

    /// Groups holding record polylines, in record order
    pub fn series_groups(&self) -> impl Iterator<Item = (usize, &Group)> {
        self.groups.iter().filter_map(|g| match g.key {
            Some(GroupKey::Series(r)) => Some((r, g)),
            _ => None,
        })
    }

    pub fn element_count(&self) -> usize {
        self.groups.iter().map(|g| g.elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Walk the scene in drawing order
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        let capabilities = renderer.capabilities();
        renderer.begin_frame(self.width, self.height, &self.class);

        for group in &self.groups {
            if group.hidden && !capabilities.retains_hidden_groups {
                continue;
            }
            renderer.begin_group(group);
            for element in &group.elements {
                match &element.shape {
                    Shape::Line { x1, y1, x2, y2 } => {
                        renderer.draw_line(Point::new(*x1, *y1), Point::new(*x2, *y2), element);
                    }
                    Shape::Rect { x, y, width, height } => {
                        renderer.draw_rect(
                            Point::new(*x, *y),
                            Point::new(x + width, y + height),
                            element,
                        );
                    }
                    Shape::Text { x, y, text, .. } => {
                        renderer.draw_text(text, Point::new(*x, *y), element);
                    }
                }
            }
            renderer.end_group();
        }

        renderer.end_frame();
    }
}
