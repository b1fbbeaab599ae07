//! Interactive chart window

use std::path::PathBuf;

use anyhow::Result;
use eframe::egui;
use pcoord_core::Point;
use pcoord_data::Dataset;
use pcoord_render::Scene;
use pcoord_views::{export_scene, ChartView, ExportFormat, ParallelCoordinatesPlot};
use tracing::{error, info};

use crate::painter::EguiRenderer;

/// Pointer slack around ruler markers, in pixels
const MARKER_GRAB_TOLERANCE: f64 = 4.0;

struct ViewerApp {
    plot: ParallelCoordinatesPlot,
    dataset: Dataset,
    source: PathBuf,

    /// Scene of the last render; `None` when the chart cannot be drawn
    scene: Option<Scene>,
    needs_render: bool,
    status: Option<String>,
}

impl ViewerApp {
    fn new(plot: ParallelCoordinatesPlot, dataset: Dataset, source: PathBuf) -> Self {
        Self {
            plot,
            dataset,
            source,
            scene: None,
            needs_render: true,
            status: None,
        }
    }

    fn render(&mut self) {
        match self.plot.try_render(&self.dataset) {
            Ok(scene) => {
                self.scene = Some(scene);
                self.status = None;
            }
            Err(e) => {
                self.scene = None;
                self.status = Some(e.to_string());
            }
        }
        self.needs_render = false;
    }

    fn open_file(&mut self, path: PathBuf) {
        match crate::load_dataset(&path) {
            Ok(dataset) => {
                self.dataset = dataset;
                self.source = path;
                let dimensions = &mut self.plot.state_mut().dimensions;
                dimensions.reset_overrides();
                dimensions.clear_thresholds();
                self.needs_render = true;
            }
            Err(e) => {
                error!("Failed to open {}: {:#}", path.display(), e);
                self.status = Some(format!("{:#}", e));
            }
        }
    }

    fn export_file(&mut self, path: PathBuf) {
        let Some(format) = ExportFormat::from_path(&path) else {
            self.status = Some(format!("Cannot export to {}", path.display()));
            return;
        };
        let Some(scene) = &self.scene else {
            return;
        };
        let menu = self.plot.dimension_menu(&self.dataset);
        if let Err(e) = export_scene(scene, self.plot.title(), menu.as_ref(), &path, format) {
            error!("Export failed: {}", e);
            self.status = Some(e.to_string());
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Data Files", &["csv", "tsv", "txt", "json"])
                    .pick_file()
                {
                    self.open_file(path);
                }
            }
            if ui.button("Export…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter(ExportFormat::Svg.filter_name(), &[ExportFormat::Svg.extension()])
                    .add_filter(ExportFormat::Html.filter_name(), &[ExportFormat::Html.extension()])
                    .save_file()
                {
                    self.export_file(path);
                }
            }
        });
        ui.label(self.source.display().to_string());
        ui.separator();

        ui.heading("Dimensions");
        let labels = self.dataset.labels.clone();
        for label in &labels {
            let mut checked = self.plot.state().dimensions.is_displayed(label);
            if ui.checkbox(&mut checked, label.as_str()).changed() {
                self.plot.set_dimension_visible(label, checked);
                self.needs_render = true;
            }
        }
        if ui.button("Reset dimensions").clicked() {
            self.plot.state_mut().dimensions.reset_overrides();
            self.needs_render = true;
        }
        ui.separator();

        ui.heading("Overlays");
        let options = &mut self.plot.options;
        let mut changed = ui.checkbox(&mut options.show_mean, "Mean line").changed();
        changed |= ui.checkbox(&mut options.show_histogram, "Histograms").changed();
        if options.show_histogram {
            changed |= ui
                .add(egui::Slider::new(&mut options.histogram_partition, 1..=40).text("buckets"))
                .changed();
        }
        changed |= ui.checkbox(&mut options.use_rulers, "Range rulers").changed();
        if changed {
            self.needs_render = true;
        }
        if self.plot.options.use_rulers && ui.button("Reset rulers").clicked() {
            self.plot.reset_rulers();
            self.needs_render = true;
        }
        ui.separator();

        let state = self.plot.state();
        ui.label(format!(
            "{} of {} records visible",
            state.visible_count(),
            self.dataset.record_count()
        ));
        if let Some(status) = &self.status {
            ui.colored_label(ui.visuals().warn_fg_color, status.as_str());
        }
    }

    fn chart(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (width, height) = (size.x as f64, size.y as f64);
        if (self.plot.options.width - width).abs() > 0.5
            || (self.plot.options.height - height).abs() > 0.5
        {
            self.plot.options.width = width;
            self.plot.options.height = height;
            self.needs_render = true;
        }
        // a render rebuilds the rulers, so wait for the drag to finish
        if self.needs_render && !self.plot.rulers().is_dragging() {
            self.render();
        }

        let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
        let origin = response.rect.min;
        let local =
            |pos: egui::Pos2| Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);

        if let Some(scene) = self.scene.as_mut() {
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((axis, bound)) =
                        self.plot.rulers().hit_test(local(pos), MARKER_GRAB_TOLERANCE)
                    {
                        self.plot.begin_ruler_drag(axis, bound);
                    }
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.plot.drag_ruler(local(pos).y, scene);
                }
            }
            if response.drag_released() {
                if let Some(release) = self.plot.release_ruler(&self.dataset, scene) {
                    info!(
                        "Threshold of {} set to {:.3}",
                        self.dataset.labels[release.dimension], release.value
                    );
                }
            }

            let mut renderer = EguiRenderer::new(&painter, origin, ui.visuals());
            scene.replay(&mut renderer);
        } else if let Some(status) = &self.status {
            painter.text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                status,
                egui::FontId::proportional(14.0),
                ui.visuals().warn_fg_color,
            );
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("chart_controls")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.side_panel(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| self.chart(ui));
    }
}

/// Open the viewer window and block until it closes
pub fn run(plot: ParallelCoordinatesPlot, dataset: Dataset, source: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    let title = format!("Parallel Coordinates - {}", plot.title());
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(ViewerApp::new(plot, dataset, source))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
