//! Plot export functionality

use std::fs;
use std::path::Path;

use pcoord_render::{Scene, SvgRenderer};
use tracing::info;

use crate::plots::parallel_coordinates::DimensionMenu;
use crate::ChartError;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Html => "html",
        }
    }

    pub fn filter_name(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "SVG Vector Graphics",
            ExportFormat::Html => "HTML Page",
        }
    }

    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "svg" => Some(ExportFormat::Svg),
            "html" | "htm" => Some(ExportFormat::Html),
            _ => None,
        }
    }
}

/// Standalone SVG document for a scene
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut renderer = SvgRenderer::new();
    scene.replay(&mut renderer);
    renderer.finish()
}

/// HTML page holding the chart and, if given, its dimension menu
pub fn scene_to_html(scene: &Scene, title: &str, menu: Option<&DimensionMenu>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title.replace('<', "&lt;")));
    html.push_str("</head>\n<body>\n");
    if let Some(menu) = menu {
        html.push_str(&menu.to_html());
    }
    html.push_str(&scene_to_svg(scene));
    html.push_str("</body>\n</html>\n");
    html
}

/// Write a scene to `path` in the given format
pub fn export_scene(
    scene: &Scene,
    title: &str,
    menu: Option<&DimensionMenu>,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ChartError> {
    let document = match format {
        ExportFormat::Svg => scene_to_svg(scene),
        ExportFormat::Html => scene_to_html(scene, title, menu),
    };
    fs::write(path, document)?;
    info!("Exported {} to {}", format.extension(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcoord_core::DimensionState;
    use pcoord_render::GroupKey;

    fn scene() -> Scene {
        let mut scene = Scene::new(100.0, 50.0, "ct-chart-parallel");
        scene
            .add_group(Some(GroupKey::Labels), "ct-labels")
            .text("a", 1.0, 2.0, 10.0, 10.0, "ct-label");
        scene
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.SVG")), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path(Path::new("out.htm")), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::from_path(Path::new("out.png")), None);
        assert_eq!(ExportFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_html_embeds_menu_and_chart() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let menu =
            DimensionMenu::new("#dims", "ct-dimension-menu", &labels, &DimensionState::new());
        let html = scene_to_html(&scene(), "chart", Some(&menu));

        let menu_at = html.find("<form").unwrap();
        let svg_at = html.find("<svg").unwrap();
        assert!(menu_at < svg_at);
        assert!(html.contains("<title>chart</title>"));
    }

    #[test]
    fn test_export_writes_file() {
        let path = std::env::temp_dir().join(format!("pcoord-export-{}.svg", std::process::id()));
        export_scene(&scene(), "chart", None, &path, ExportFormat::Svg).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("class=\"ct-chart-parallel\""));
        let _ = fs::remove_file(&path);
    }
}
