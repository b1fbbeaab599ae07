//! Checkbox menu for showing and hiding dimensions

use std::fmt::Write;

use pcoord_core::DimensionState;

/// One checkbox of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Original dimension index
    pub index: usize,
    pub checked: bool,
}

/// Menu targeted at a host container
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMenu {
    pub container: String,
    pub class: String,
    pub items: Vec<MenuItem>,
}

impl DimensionMenu {
    pub fn new(
        container: impl Into<String>,
        class: impl Into<String>,
        labels: &[String],
        state: &DimensionState,
    ) -> Self {
        Self {
            container: container.into(),
            class: class.into(),
            items: menu_items(labels, state),
        }
    }

    /// HTML fragment for the host container
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(
            html,
            "<form class=\"{}\" data-container=\"{}\">",
            escape(&self.class),
            escape(&self.container)
        );
        for item in &self.items {
            let _ = writeln!(
                html,
                "  <label><input type=\"checkbox\" name=\"dimension\" value=\"{}\"{}> {}</label>",
                item.index,
                if item.checked { " checked" } else { "" },
                escape(&item.label)
            );
        }
        html.push_str("</form>\n");
        html
    }
}

/// One item per dataset label, checked when the dimension is displayed
pub fn menu_items(labels: &[String], state: &DimensionState) -> Vec<MenuItem> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| MenuItem {
            label: label.clone(),
            index,
            checked: state.is_displayed(label),
        })
        .collect()
}

/// Apply a checkbox change to the override sets
pub fn toggle(state: &mut DimensionState, label: &str, checked: bool) {
    state.set_dimension_visible(label, checked);
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
