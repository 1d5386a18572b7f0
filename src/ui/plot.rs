use eframe::egui::{self, Color32, ColorImage, Sense, TextureOptions, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::config;
use crate::data::model::SurfaceKind;
use crate::render::surface::render_surface;
use crate::state::{texture_slot, AppState, CachedTexture, RenderKey};

// ---------------------------------------------------------------------------
// 2-D scatter of the (X, Y) coordinates
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let Some(data) = state.data.as_ref().filter(|d| !d.is_empty()) else {
        no_data(ui);
        return;
    };

    let points: PlotPoints = data.scatter_points().into();

    Plot::new("scatter_plot")
        .x_axis_label("X")
        .y_axis_label("Y")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("data")
                    .color(Color32::from_rgb(31, 119, 180))
                    .radius(config::SCATTER_RADIUS),
            );
        });
}

// ---------------------------------------------------------------------------
// 3-D surfaces
// ---------------------------------------------------------------------------

/// Single surface filling the panel.
pub fn surface_view(ui: &mut Ui, state: &mut AppState, kind: SurfaceKind) {
    camera_controls(ui, state);
    let size = ui.available_size();
    surface_image(ui, state, kind, size);
}

/// Predicted and actual next to each other, sharing the camera.
pub fn side_by_side(ui: &mut Ui, state: &mut AppState) {
    camera_controls(ui, state);
    let avail = ui.available_size();
    let size = egui::vec2((avail.x - ui.spacing().item_spacing.x) / 2.0, avail.y);
    ui.horizontal_top(|ui: &mut Ui| {
        surface_image(ui, state, SurfaceKind::Predicted, size);
        surface_image(ui, state, SurfaceKind::Actual, size);
    });
}

fn camera_controls(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let (lo, hi) = config::PITCH_RANGE;
        ui.label("Pitch:");
        ui.add(egui::Slider::new(&mut state.camera.pitch, lo..=hi).step_by(0.01));
        ui.label("Yaw:");
        ui.add(
            egui::Slider::new(
                &mut state.camera.yaw,
                -std::f32::consts::PI..=std::f32::consts::PI,
            )
            .step_by(0.01),
        );
        if ui.button("Reset view").clicked() {
            state.reset_camera();
        }
        ui.weak("drag the plot to rotate");
    });
    ui.add_space(4.0);
}

/// Draw one surface into `size`, re-rendering only when its inputs changed.
fn surface_image(ui: &mut Ui, state: &mut AppState, kind: SurfaceKind, size: egui::Vec2) {
    let Some(data) = state.data.as_ref().filter(|d| !d.is_empty()) else {
        no_data(ui);
        return;
    };

    let pixels_per_point = ui.ctx().pixels_per_point();
    let key = RenderKey {
        generation: state.generation,
        style: state.surface_style(),
        camera: state.camera,
        size: texture_size(size, pixels_per_point),
    };

    let handle = match state.cached_texture(kind, &key) {
        Some(handle) => handle,
        None => {
            log::debug!("rendering {} surface at {:?}", kind.title(), key.size);
            match render_surface(data, kind, &key.style, key.camera, key.size) {
                Ok(rgba) => {
                    let image = ColorImage::from_rgba_unmultiplied(
                        [key.size.0 as usize, key.size.1 as usize],
                        &rgba,
                    );
                    let handle = ui.ctx().load_texture(
                        format!("surface_{}", kind.title()),
                        image,
                        TextureOptions::LINEAR,
                    );
                    state.textures[texture_slot(kind)] = Some(CachedTexture {
                        key,
                        handle: handle.clone(),
                    });
                    handle
                }
                Err(e) => {
                    log::error!("Failed to render {} surface: {e:#}", kind.title());
                    state.status_message = Some(format!("Error: {e:#}"));
                    ui.label(format!("Could not render the {} surface.", kind.title()));
                    return;
                }
            }
        }
    };

    let shown = display_size(key.size, pixels_per_point);
    let response = ui.add(
        egui::Image::new(egui::load::SizedTexture::new(handle.id(), shown))
            .sense(Sense::click_and_drag()),
    );
    if response.dragged() {
        state.rotate(response.drag_delta());
    }
    if response.double_clicked() {
        state.reset_camera();
    }
}

/// Texture size in physical pixels for a panel of `avail` points, snapped
/// to 8 px so small layout jitter does not trigger a redraw.
fn texture_size(avail: egui::Vec2, pixels_per_point: f32) -> (u32, u32) {
    let avail = avail * pixels_per_point;
    let snap = |v: f32, lo: u32, hi: u32| {
        let v = if v.is_finite() { v.max(0.0) as u32 } else { lo };
        (v / 8 * 8).clamp(lo, hi)
    };
    (
        snap(avail.x, config::MIN_TEXTURE_SIZE[0], config::MAX_TEXTURE_SIZE[0]),
        snap(avail.y, config::MIN_TEXTURE_SIZE[1], config::MAX_TEXTURE_SIZE[1]),
    )
}

/// Size in points at which a texture of `pixels` maps one texel per pixel.
fn display_size(pixels: (u32, u32), pixels_per_point: f32) -> egui::Vec2 {
    egui::vec2(pixels.0 as f32, pixels.1 as f32) / pixels_per_point.max(f32::EPSILON)
}

pub fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a data folder to plot  (File → Open folder…)");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_size_snaps_and_clamps() {
        assert_eq!(texture_size(egui::vec2(803.7, 601.0), 1.0), (800, 600));
        assert_eq!(texture_size(egui::vec2(10.0, 10.0), 1.0), (200, 150));
        assert_eq!(texture_size(egui::vec2(5000.0, f32::INFINITY), 1.0), (3200, 150));
    }

    #[test]
    fn test_hidpi_texture_is_one_texel_per_pixel() {
        let size = texture_size(egui::vec2(400.0, 300.0), 2.0);
        assert_eq!(size, (800, 600));
        assert_eq!(display_size(size, 2.0), egui::vec2(400.0, 300.0));
        assert_eq!(display_size((640, 480), 1.0), egui::vec2(640.0, 480.0));
    }
}
