use eframe::egui;

use crate::data::model::SurfaceKind;
use crate::state::{AppState, View};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FitViewerApp {
    pub state: AppState,
}

impl FitViewerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FitViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and view tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: surface settings ----
        egui::SidePanel::left("settings_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Scatter => plot::scatter_plot(ui, &self.state),
            View::Predicted => plot::surface_view(ui, &mut self.state, SurfaceKind::Predicted),
            View::Actual => plot::surface_view(ui, &mut self.state, SurfaceKind::Actual),
            View::SideBySide => plot::side_by_side(ui, &mut self.state),
            View::Table => table::data_table(ui, &self.state),
        });
    }
}
