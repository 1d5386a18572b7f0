use std::ops::Range;

use anyhow::{anyhow, Result};
use plotters::coord::CoordTranslate;
use plotters::prelude::*;

use crate::color::{ColorMapKind, ScalarColorMap};
use crate::data::model::{PlotData, SurfaceKind};
use crate::data::stats::finite_range;

/// Appearance shared by both surface views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    pub color_map: ColorMapKind,
    pub alpha: f32,
    pub show_surface: bool,
    pub show_points: bool,
    pub point_radius: u32,
    /// Fixed Z range for axes and colours; `None` fits the surface itself.
    pub z_range: Option<(f64, f64)>,
}

/// Orbit camera, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pitch: f32,
    pub yaw: f32,
}

/// Render one triangulated surface with its scatter overlay.
/// Returns an RGBA pixel buffer suitable for egui texture loading.
///
/// Axes: X to the right, the surface value upwards, Y into the screen.
pub fn render_surface(
    data: &PlotData,
    kind: SurfaceKind,
    style: &SurfaceStyle,
    camera: Camera,
    (width, height): (u32, u32),
) -> Result<Vec<u8>> {
    let z = data.z(kind);
    let (z_lo, z_hi) = style
        .z_range
        .or_else(|| finite_range(z))
        .unwrap_or((0.0, 1.0));
    let colors = ScalarColorMap::new(style.color_map, z_lo, z_hi);

    let mut rgb_buf = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb_buf, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.title(), ("sans-serif", 22).into_font())
            .margin(10)
            .build_cartesian_3d(
                axis_range(finite_range(&data.x)),
                axis_range(Some((z_lo, z_hi))),
                axis_range(finite_range(&data.y)),
            )
            .map_err(draw_err)?;

        chart.with_projection(|mut pb| {
            pb.pitch = camera.pitch as f64;
            pb.yaw = camera.yaw as f64;
            pb.scale = 0.85;
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .label_style(("sans-serif", 12).into_font())
            .bold_grid_style(RGBColor(200, 200, 200))
            .light_grid_style(RGBColor(235, 235, 235))
            .x_labels(5)
            .y_labels(5)
            .z_labels(5)
            .draw()
            .map_err(draw_err)?;

        if style.show_surface && !data.triangles.is_empty() {
            // Screen row of each triangle's footprint, for back-to-front drawing.
            let base = (z_lo + z_hi) / 2.0;
            let keys: Vec<i32> = {
                let coord = chart.as_coord_spec();
                data.triangles
                    .iter()
                    .map(|t| {
                        let cx = t.iter().map(|&i| data.x[i]).sum::<f64>() / 3.0;
                        let cy = t.iter().map(|&i| data.y[i]).sum::<f64>() / 3.0;
                        coord.translate(&(cx, base, cy)).1
                    })
                    .collect()
            };

            let alpha = style.alpha.clamp(0.0, 1.0) as f64;
            let polygons = draw_order(&keys, camera.pitch).into_iter().filter_map(|ti| {
                let t = data.triangles[ti];
                let mean = t.iter().map(|&i| z[i]).sum::<f64>() / 3.0;
                if !mean.is_finite() {
                    return None;
                }
                let color = to_rgb(colors.color_for(mean));
                let vertices: Vec<(f64, f64, f64)> =
                    t.iter().map(|&i| (data.x[i], z[i], data.y[i])).collect();
                Some(Polygon::new(vertices, color.mix(alpha).filled()))
            });
            chart.draw_series(polygons).map_err(draw_err)?;
        }

        if style.show_points {
            let points = data
                .triples(kind)
                .into_iter()
                .filter(|(x, y, z)| x.is_finite() && y.is_finite() && z.is_finite())
                .map(|(x, y, z)| {
                    let color = to_rgb(colors.color_for(z));
                    Circle::new((x, z, y), style.point_radius, color.filled())
                });
            chart.draw_series(points).map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }

    Ok(rgb_to_rgba(&rgb_buf))
}

fn draw_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("drawing surface: {e:?}")
}

fn to_rgb(c: eframe::egui::Color32) -> RGBColor {
    RGBColor(c.r(), c.g(), c.b())
}

/// Axis range with a unit-wide fallback for flat or missing data.
fn axis_range(range: Option<(f64, f64)>) -> Range<f64> {
    match range {
        Some((lo, hi)) if hi > lo => lo..hi,
        Some((v, _)) => (v - 0.5)..(v + 0.5),
        None => 0.0..1.0,
    }
}

/// Order in which to paint triangles given their footprint's screen row.
///
/// Seen from above, rows nearer the top of the image are farther away, so
/// they go first; seen from below the order flips. Ties keep input order.
fn draw_order(screen_rows: &[i32], pitch: f32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..screen_rows.len()).collect();
    if pitch >= 0.0 {
        order.sort_by_key(|&i| screen_rows[i]);
    } else {
        order.sort_by_key(|&i| std::cmp::Reverse(screen_rows[i]));
    }
    order
}

fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(255);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_order_paints_far_rows_first() {
        let rows = [40, 10, 25, 10];
        assert_eq!(draw_order(&rows, 0.4), vec![1, 3, 2, 0]);
        assert_eq!(draw_order(&rows, -0.4), vec![0, 2, 1, 3]);
        assert!(draw_order(&[], 0.0).is_empty());
    }

    #[test]
    fn test_axis_range_fallbacks() {
        assert_eq!(axis_range(Some((-2.0, 3.0))), -2.0..3.0);
        assert_eq!(axis_range(Some((4.0, 4.0))), 3.5..4.5);
        assert_eq!(axis_range(None), 0.0..1.0);
    }

    fn sample_data() -> PlotData {
        let x = vec![0.0, 1.0, 0.0, 1.0, 0.5];
        let y = vec![0.0, 0.0, 1.0, 1.0, 0.4];
        let points: Vec<[f64; 2]> = x.iter().zip(&y).map(|(&a, &b)| [a, b]).collect();
        PlotData {
            triangles: crate::data::triangulation::triangulate(&points),
            x,
            y,
            z_actual: vec![1.0, 2.0, 3.0, 4.0, 2.5],
            z_predicted: vec![1.1, f64::NAN, 2.9, 4.2, 2.4],
        }
    }

    fn style() -> SurfaceStyle {
        SurfaceStyle {
            color_map: ColorMapKind::Viridis,
            alpha: 0.3,
            show_surface: true,
            show_points: true,
            point_radius: 3,
            z_range: None,
        }
    }

    #[test]
    fn test_render_surface_fills_rgba_buffer() {
        let data = sample_data();
        let camera = Camera {
            pitch: 0.35,
            yaw: 0.75,
        };
        for kind in [SurfaceKind::Predicted, SurfaceKind::Actual] {
            let rgba = render_surface(&data, kind, &style(), camera, (200, 150)).unwrap();
            assert_eq!(rgba.len(), 200 * 150 * 4);
            assert!(rgba.chunks_exact(4).all(|p| p[3] == 255));
            assert!(rgba.chunks_exact(4).any(|p| p[..3] != [255, 255, 255]));
        }
    }

    #[test]
    fn test_render_surface_handles_flat_and_pointless_data() {
        let mut data = sample_data();
        data.z_actual = vec![2.0; 5];
        data.triangles.clear();
        let camera = Camera {
            pitch: -0.5,
            yaw: 3.0,
        };
        let rgba = render_surface(&data, SurfaceKind::Actual, &style(), camera, (240, 160)).unwrap();
        assert_eq!(rgba.len(), 240 * 160 * 4);
    }

    #[test]
    fn test_rgb_to_rgba() {
        assert_eq!(rgb_to_rgba(&[1, 2, 3, 4, 5, 6]), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }
}
