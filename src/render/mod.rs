/// Off-screen rendering of the 3-D views.
///
/// `plotters` draws into an RGB buffer which the UI uploads as an egui
/// texture; the buffer is only redrawn when its inputs change.
pub mod surface;
