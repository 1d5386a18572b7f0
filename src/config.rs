use crate::color::ColorMapKind;

/// Input file names, looked up in the data directory.
pub const COORDINATES_FILE: &str = "data.csv";
pub const TRAINING_FILE: &str = "training_data.csv";
pub const PREDICTION_FILE: &str = "prediction.csv";

/// Window geometry
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

/// Surface styling
pub const DEFAULT_COLOR_MAP: ColorMapKind = ColorMapKind::Viridis;
pub const DEFAULT_SURFACE_ALPHA: f32 = 0.3;
pub const SCATTER_RADIUS: f32 = 2.5;
pub const SURFACE_POINT_RADIUS: u32 = 3;

/// Camera (radians), matching the plotters projection builder
pub const DEFAULT_PITCH: f32 = 0.35;
pub const DEFAULT_YAW: f32 = 0.75;
pub const PITCH_RANGE: (f32, f32) = (-1.5, 1.5);
/// Radians of rotation per dragged pixel
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Largest surface texture rendered, in physical pixels (room for HiDPI)
pub const MAX_TEXTURE_SIZE: [u32; 2] = [3200, 2400];
pub const MIN_TEXTURE_SIZE: [u32; 2] = [200, 150];
