use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::REQUIRED_COLUMNS;
use crate::data::model::{SalaryDataset, SalaryRecord};
use crate::ui::metrics::format_thousands;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 360.0;

fn cells(rec: &SalaryRecord) -> [String; 7] {
    [
        rec.work_year.to_string(),
        rec.experience_level.clone(),
        rec.job_title.clone(),
        rec.company_size.clone(),
        format_thousands(rec.salary_usd.round() as u64),
        rec.remote_type.clone(),
        rec.residence_iso3.clone(),
    ]
}

/// Scrollable grid of the filtered records in source order.
pub fn detail_table(ui: &mut Ui, dataset: &SalaryDataset, indices: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(TABLE_HEIGHT)
        .column(Column::auto().at_least(48.0))
        .columns(Column::auto().at_least(90.0), REQUIRED_COLUMNS.len() - 1)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.label(RichText::new("#").strong());
            });
            for name in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                let idx = indices[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(idx.to_string()).weak());
                });
                for cell in cells(&dataset.records[idx]) {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
