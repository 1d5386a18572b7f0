use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::ColorMapKind;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – appearance and comparison summary
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Surface");
    ui.separator();

    ui.strong("Color map");
    egui::ComboBox::from_id_salt("color_map")
        .selected_text(state.color_map.name())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in ColorMapKind::ALL {
                ui.selectable_value(&mut state.color_map, kind, kind.name());
            }
        });
    color_bar(ui, state.color_map);
    ui.add_space(6.0);

    ui.strong("Surface alpha");
    ui.add(egui::Slider::new(&mut state.surface_alpha, 0.0..=1.0).step_by(0.05));
    ui.checkbox(&mut state.show_surface, "Show surface");
    ui.checkbox(&mut state.show_points, "Show points");
    ui.checkbox(&mut state.shared_z_scale, "Same Z scale for both");
    ui.separator();

    ui.heading("Predicted vs actual");
    match &state.summary {
        Some(s) if s.count > 0 => {
            egui::Grid::new("error_summary")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (label, value) in [
                        ("Points", s.count.to_string()),
                        ("MAE", format!("{:.5}", s.mae)),
                        ("MSE", format!("{:.5}", s.mse)),
                        ("RMSE", format!("{:.5}", s.rmse)),
                        ("Max |err|", format!("{:.5}", s.max_abs)),
                    ] {
                        ui.label(label);
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
        }
        Some(_) => {
            ui.label("No comparable values.");
        }
        None => {
            ui.label("No data loaded.");
        }
    }
}

/// Horizontal strip previewing a colour map.
fn color_bar(ui: &mut Ui, kind: ColorMapKind) {
    const STEPS: usize = 64;
    let width = ui.available_width().min(200.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 12.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let step = rect.width() / STEPS as f32;
    for i in 0..STEPS {
        let x0 = rect.left() + i as f32 * step;
        let cell = egui::Rect::from_min_max(
            egui::pos2(x0, rect.top()),
            egui::pos2(x0 + step + 0.5, rect.bottom()),
        );
        painter.rect_filled(cell, 0.0, kind.sample(i as f64 / (STEPS - 1) as f64));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.label());
        }

        ui.separator();

        if let Some(data) = &state.data {
            ui.label(format!(
                "{} points, {} triangles  ·  {}",
                data.len(),
                data.triangles.len(),
                state.data_dir.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open folder with data.csv, training_data.csv, prediction.csv")
        .set_directory(&state.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Switching data folder to {}", dir.display());
        state.load_from(&dir);
    }
}
