use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, metrics, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SalaryPandaApp {
    pub state: AppState,
}

impl SalaryPandaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("🎲 Dashboard de Análisis de Salarios en el Área de Datos");
    ui.label(
        "Explore los datos salariales en el área de datos de los últimos años. \
         Utilize los filtros de la izquierda para refinar su análisis.",
    );
    ui.add_space(8.0);

    let Some(dataset) = &state.dataset else {
        let msg = state
            .status_message
            .as_deref()
            .unwrap_or("Open a file to view salaries  (File → Open…)");
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(msg);
        });
        return;
    };
    let result = &state.result;

    ui.label(RichText::new("Métricas generales (Salario anual en USD)").size(18.0).strong());
    metrics::metric_cards(ui, &result.metrics);
    ui.separator();

    ui.label(RichText::new("Gráficos").size(18.0).strong());
    charts::chart_row(
        ui,
        |ui| charts::top_roles_chart(ui, result.top_roles.as_deref()),
        |ui| charts::distribution_chart(ui, result.distribution.as_ref()),
    );
    charts::chart_row(
        ui,
        |ui| charts::remote_chart(ui, result.remote_split.as_deref()),
        |ui| charts::country_chart(ui, result.country_salary.as_deref()),
    );

    ui.label(RichText::new("Datos Detallados").size(18.0).strong());
    if result.is_empty() {
        ui.label(RichText::new("Ningún registro coincide con los filtros.").weak());
    } else {
        table::detail_table(ui, dataset, &result.indices);
    }
}
