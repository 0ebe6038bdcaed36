use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Table, REQUIRED_COLUMNS};

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable view of the filtered records.
pub fn data_table(ui: &mut Ui, rows: &Table) {
    if rows.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No records match the current filters");
        });
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(70.0), REQUIRED_COLUMNS.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows.records[row.index()];
                let cells = [
                    r.age.to_string(),
                    r.sex.clone(),
                    format!("{:.2}", r.bmi),
                    r.children.to_string(),
                    r.smoker.clone(),
                    r.region.clone(),
                    format!("{:.2}", r.charges),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
