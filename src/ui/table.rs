use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::plot::no_data;

const ROW_HEIGHT: f32 = 18.0;

/// Raw values with the per-point residual (predicted − actual).
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(data) = state.data.as_ref().filter(|d| !d.is_empty()) else {
        no_data(ui);
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .columns(Column::initial(110.0).at_least(60.0), 4)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["#", "X", "Y", "Actual", "Predicted", "Residual"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, data.len(), |mut row| {
                let i = row.index();
                let actual = data.z_actual[i];
                let predicted = data.z_predicted[i];
                let residual = predicted - actual;

                row.col(|ui: &mut Ui| {
                    ui.label(i.to_string());
                });
                for v in [data.x[i], data.y[i], actual, predicted] {
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{v:.5}"));
                    });
                }
                row.col(|ui: &mut Ui| {
                    let text = RichText::new(format!("{residual:+.5}")).monospace();
                    if residual.is_nan() {
                        ui.label(text.color(Color32::GRAY));
                    } else {
                        ui.label(text);
                    }
                });
            });
        });
}
