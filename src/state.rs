use std::path::{Path, PathBuf};

use eframe::egui::{TextureHandle, Vec2};

use crate::color::ColorMapKind;
use crate::config;
use crate::data::loader::load_dataset;
use crate::data::model::{PlotData, SurfaceKind};
use crate::data::stats::{finite_range, ErrorSummary};
use crate::render::surface::{Camera, SurfaceStyle};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Scatter,
    Predicted,
    Actual,
    SideBySide,
    Table,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Scatter,
        View::Predicted,
        View::Actual,
        View::SideBySide,
        View::Table,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Scatter => "Scatter",
            View::Predicted => "Predicted",
            View::Actual => "Actual",
            View::SideBySide => "Side by side",
            View::Table => "Table",
        }
    }
}

// ---------------------------------------------------------------------------
// Texture cache
// ---------------------------------------------------------------------------

/// Everything a rendered surface depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderKey {
    pub generation: u64,
    pub style: SurfaceStyle,
    pub camera: Camera,
    pub size: (u32, u32),
}

pub struct CachedTexture {
    pub key: RenderKey,
    pub handle: TextureHandle,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Directory the three CSV files are read from.
    pub data_dir: PathBuf,

    /// Loaded data (None only if every load so far has failed).
    pub data: Option<PlotData>,

    /// Bumped on every successful load so cached textures go stale.
    pub generation: u64,

    /// Predicted-vs-actual metrics for the loaded data.
    pub summary: Option<ErrorSummary>,

    pub view: View,
    pub color_map: ColorMapKind,
    pub surface_alpha: f32,
    pub show_surface: bool,
    pub show_points: bool,

    /// Give both surfaces one Z axis and colour scale.
    pub shared_z_scale: bool,

    /// Shared by the predicted and actual views.
    pub camera: Camera,

    /// Rendered surfaces, indexed by [`texture_slot`].
    pub textures: [Option<CachedTexture>; 2],

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            data: None,
            generation: 0,
            summary: None,
            view: View::Scatter,
            color_map: config::DEFAULT_COLOR_MAP,
            surface_alpha: config::DEFAULT_SURFACE_ALPHA,
            show_surface: true,
            show_points: true,
            shared_z_scale: false,
            camera: Camera {
                pitch: config::DEFAULT_PITCH,
                yaw: config::DEFAULT_YAW,
            },
            textures: [None, None],
            status_message: None,
        }
    }

    /// Ingest newly loaded data and invalidate rendered surfaces.
    pub fn set_data(&mut self, data: PlotData) {
        self.summary = Some(data.error_summary());
        self.data = Some(data);
        self.generation += 1;
        self.textures = [None, None];
        self.status_message = None;
    }

    /// Load from `dir`; on failure keep the current data and report the error.
    pub fn load_from(&mut self, dir: &Path) {
        match load_dataset(dir) {
            Ok(data) => {
                self.data_dir = dir.to_path_buf();
                self.set_data(data);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", dir.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn reload(&mut self) {
        let dir = self.data_dir.clone();
        self.load_from(&dir);
    }

    /// Style for the surface views, resolving the shared Z scale.
    pub fn surface_style(&self) -> SurfaceStyle {
        let z_range = if self.shared_z_scale {
            self.data.as_ref().and_then(|d| {
                let mut both = d.z_actual.clone();
                both.extend_from_slice(&d.z_predicted);
                finite_range(&both)
            })
        } else {
            None
        };
        SurfaceStyle {
            color_map: self.color_map,
            alpha: self.surface_alpha,
            show_surface: self.show_surface,
            show_points: self.show_points,
            point_radius: config::SURFACE_POINT_RADIUS,
            z_range,
        }
    }

    /// Orbit the camera by a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let (lo, hi) = config::PITCH_RANGE;
        self.camera.yaw = wrap_angle(self.camera.yaw - delta.x * config::DRAG_SENSITIVITY);
        self.camera.pitch =
            (self.camera.pitch + delta.y * config::DRAG_SENSITIVITY).clamp(lo, hi);
    }

    pub fn reset_camera(&mut self) {
        self.camera = Camera {
            pitch: config::DEFAULT_PITCH,
            yaw: config::DEFAULT_YAW,
        };
    }

    /// Texture for `kind` if it was rendered with exactly `key`.
    pub fn cached_texture(&self, kind: SurfaceKind, key: &RenderKey) -> Option<TextureHandle> {
        self.textures[texture_slot(kind)]
            .as_ref()
            .filter(|c| c.key == *key)
            .map(|c| c.handle.clone())
    }
}

pub fn texture_slot(kind: SurfaceKind) -> usize {
    match kind {
        SurfaceKind::Predicted => 0,
        SurfaceKind::Actual => 1,
    }
}

/// Wrap into `(-π, π]`.
fn wrap_angle(a: f32) -> f32 {
    use std::f32::consts::PI;
    let wrapped = (a + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::NumericTable;

    fn sample_data() -> PlotData {
        let coords = NumericTable::from_rows(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ])
        .unwrap();
        let actual = NumericTable::from_rows(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let predicted = NumericTable::from_rows(vec![vec![-4.0], vec![2.0], vec![9.0]]).unwrap();
        PlotData::from_tables(&coords, &actual, &predicted).unwrap()
    }

    #[test]
    fn test_set_data_bumps_generation_and_summary() {
        let mut state = AppState::new(PathBuf::from("."));
        state.status_message = Some("old error".into());
        state.set_data(sample_data());
        assert_eq!(state.generation, 1);
        assert_eq!(state.summary.unwrap().count, 3);
        assert!(state.status_message.is_none());
        state.set_data(sample_data());
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_shared_z_scale_spans_both_surfaces() {
        let mut state = AppState::new(PathBuf::from("."));
        state.set_data(sample_data());
        assert_eq!(state.surface_style().z_range, None);
        state.shared_z_scale = true;
        assert_eq!(state.surface_style().z_range, Some((-4.0, 9.0)));
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut state = AppState::new(PathBuf::from("."));
        state.set_data(sample_data());
        let missing = std::env::temp_dir().join("fit-viewer-no-such-dir");
        state.load_from(&missing);
        assert!(state.data.is_some());
        assert_eq!(state.generation, 1);
        assert_eq!(state.data_dir, PathBuf::from("."));
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error:"));
    }

    #[test]
    fn test_rotate_clamps_pitch_and_wraps_yaw() {
        let mut state = AppState::new(PathBuf::from("."));
        state.rotate(Vec2::new(0.0, 10_000.0));
        assert_eq!(state.camera.pitch, config::PITCH_RANGE.1);
        state.rotate(Vec2::new(-10_000.0, 0.0));
        assert!(state.camera.yaw > -std::f32::consts::PI);
        assert!(state.camera.yaw <= std::f32::consts::PI);
        state.reset_camera();
        assert_eq!(state.camera.pitch, config::DEFAULT_PITCH);
    }
}
