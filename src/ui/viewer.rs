//! ui/viewer.rs: eframe window showing rendered figures as textures.
//!
//! Each figure is rasterised with plotters into an RGB buffer and uploaded
//! as an egui texture. Dragging the image rotates the camera and triggers a
//! re-render; the model grids themselves never change.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use egui::{
    CentralPanel, Color32, ColorImage, Sense, TextureHandle, TextureOptions, TopBottomPanel, Vec2,
    ViewportCommand,
};
use tracing::{debug, info, warn};

use crate::config::{OutputConfig, WindowConfig};
use crate::error::{PlotError, PlotResult};
use crate::plot::figure::{Figure, View};
use crate::plot::render_rgb;

struct Page {
    figure: Figure,
    rotation: View,
    texture: Option<TextureHandle>,
    dirty: bool,
    error: Option<String>,
}

pub struct SurfaceViewer {
    pages: Vec<Page>,
    current: usize,
    panel_size: (u32, u32),
    drag_sensitivity: f32,
    stop: Arc<AtomicBool>,
}

impl SurfaceViewer {
    pub fn new(
        figures: Vec<Figure>,
        panel_size: (u32, u32),
        drag_sensitivity: f32,
        stop: Arc<AtomicBool>,
    ) -> Self {
        let pages = figures
            .into_iter()
            .map(|figure| Page {
                figure,
                rotation: View::NONE,
                texture: None,
                dirty: true,
                error: None,
            })
            .collect();
        Self {
            pages,
            current: 0,
            panel_size,
            drag_sensitivity,
            stop,
        }
    }

    /// Re-render the current page if its camera moved since the last upload.
    fn refresh(&mut self, ctx: &egui::Context) {
        let panel_size = self.panel_size;
        let Some(page) = self.pages.get_mut(self.current) else {
            return;
        };
        if !page.dirty {
            return;
        }
        page.dirty = false;

        let size = page.figure.canvas_size(panel_size);
        match render_rgb(&page.figure, size, page.rotation) {
            Ok(rgb) => {
                let img = ColorImage::from_rgb([size.0 as usize, size.1 as usize], &rgb);
                let texture = page.texture.get_or_insert_with(|| {
                    ctx.load_texture(page.figure.name.clone(), img.clone(), TextureOptions::LINEAR)
                });
                texture.set(img, TextureOptions::LINEAR);
                page.error = None;
                debug!(figure = %page.figure.name, "uploaded texture");
            }
            Err(err) => {
                warn!(figure = %page.figure.name, "render failed: {err}");
                page.error = Some(err.to_string());
            }
        }
    }

    fn rotate(&mut self, delta: Vec2) {
        let s = self.drag_sensitivity as f64;
        if let Some(page) = self.pages.get_mut(self.current) {
            let (lo, hi) = elevation_headroom(&page.figure);
            page.rotation = View::new(
                (page.rotation.elevation_deg + delta.y as f64 * s).clamp(lo, hi),
                page.rotation.azimuth_deg - delta.x as f64 * s,
            );
            page.dirty = true;
        }
    }

    fn reset_view(&mut self) {
        if let Some(page) = self.pages.get_mut(self.current) {
            page.rotation = View::NONE;
            page.dirty = true;
        }
    }
}

/// Range of extra elevation that keeps every panel's camera within
/// [-90, 90] degrees.
fn elevation_headroom(figure: &Figure) -> (f64, f64) {
    figure.panels.iter().fold((-180.0f64, 180.0f64), |(lo, hi), panel| {
        let base = panel.view.elevation_deg;
        (lo.max(-90.0 - base), hi.min(90.0 - base))
    })
}

impl eframe::App for SurfaceViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.stop.load(Ordering::SeqCst) {
            info!("interrupt received: closing window");
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }

        self.refresh(ctx);

        let mut selected = self.current;
        let mut reset = false;
        TopBottomPanel::top("figure_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (i, page) in self.pages.iter().enumerate() {
                    if ui
                        .selectable_label(selected == i, page.figure.window_title.as_str())
                        .clicked()
                    {
                        selected = i;
                    }
                }
                ui.separator();
                if ui.button("Reset view").clicked() {
                    reset = true;
                }
            });
        });

        let mut drag = None;
        CentralPanel::default().show(ctx, |ui| {
            let Some(page) = self.pages.get(self.current) else {
                ui.label("No figures.");
                return;
            };
            if let Some(err) = &page.error {
                ui.colored_label(Color32::RED, err.as_str());
            }
            if let Some(texture) = &page.texture {
                let response = ui.add(
                    egui::Image::new(texture)
                        .shrink_to_fit()
                        .sense(Sense::drag()),
                );
                if response.dragged() {
                    drag = Some(response.drag_delta());
                }
            }
        });

        if selected != self.current {
            self.current = selected;
        }
        if reset {
            self.reset_view();
        }
        if let Some(delta) = drag {
            self.rotate(delta);
        }
        if self.pages.get(self.current).is_some_and(|p| p.dirty) {
            ctx.request_repaint();
        } else {
            // Keep polling the interrupt flag.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Open one window holding every figure in `figures` and block until it closes.
pub fn show(
    figures: Vec<Figure>,
    output: &OutputConfig,
    window: &WindowConfig,
    stop: Arc<AtomicBool>,
) -> PlotResult<()> {
    if figures.is_empty() {
        return Ok(());
    }
    let title = if figures.len() == 1 {
        figures[0].window_title.clone()
    } else {
        "Speedup surfaces".to_string()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_title(title.clone()),
        ..Default::default()
    };
    let viewer = SurfaceViewer::new(figures, output.panel_size(), window.drag_sensitivity, stop);

    info!(window = %title, "opening window");
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
    .map_err(|err| PlotError::Window(err.to_string()))?;
    info!(window = %title, "window closed");
    Ok(())
}
