use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::HEADER_COLOR;
use crate::data::filter::{PlotSize, Selector, WILDCARD};
use crate::data::store::InsuranceStore;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table().is_empty() {
        ui.label("No records loaded.");
        return;
    }

    // Clone what we need so we can mutate state below.
    let regions = state.table().regions();
    let smoker_values = state.table().smoker_values();
    let (age_lo, age_hi) = state.table().age_bounds().unwrap_or((0, 100));

    // ---- Region single-select ----
    ui.strong("Region");
    let current_region = state.criteria.region.clone();
    egui::ComboBox::from_id_salt("region")
        .selected_text(current_region.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            let options = std::iter::once(WILDCARD).chain(regions.iter().map(String::as_str));
            for option in options {
                let selector = Selector::parse(option);
                if ui
                    .selectable_label(current_region == selector, option)
                    .clicked()
                {
                    state.set_region(selector);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Smoker toggle group ----
    ui.strong("Smoker Status");
    let current_smoker = state.criteria.smoker.clone();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        let options = smoker_values.iter().map(String::as_str).chain(std::iter::once(WILDCARD));
        for option in options {
            let selector = Selector::parse(option);
            if ui
                .selectable_label(current_smoker == selector, option)
                .clicked()
            {
                state.set_smoker(selector);
            }
        }
    });
    ui.add_space(8.0);

    // ---- Age range (two thumbs) ----
    ui.strong("Age Range");
    let mut age_min = state.criteria.age_min;
    let mut age_max = state.criteria.age_max;
    let min_changed = ui
        .add(egui::Slider::new(&mut age_min, age_lo..=age_hi).text("from"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(&mut age_max, age_lo..=age_hi).text("to"))
        .changed();
    if min_changed || max_changed {
        // Dragging one thumb past the other pushes it along.
        if min_changed && age_min > age_max {
            age_max = age_min;
        } else if max_changed && age_max < age_min {
            age_min = age_max;
        }
        state.set_age_range(age_min, age_max);
    }
    ui.separator();

    // ---- Chart options ----
    ui.checkbox(&mut state.show_pie, "Pie chart");

    let mut fixed_size = state.criteria.plot_size.is_some();
    if ui.checkbox(&mut fixed_size, "Fixed chart size").changed() {
        let size = fixed_size.then_some(PlotSize {
            width: 600.0,
            height: 300.0,
        });
        state.set_plot_size(size);
    }
    if let Some(mut size) = state.criteria.plot_size {
        let w = ui.add(egui::Slider::new(&mut size.width, 200.0..=1600.0).text("width"));
        let h = ui.add(egui::Slider::new(&mut size.height, 150.0..=1000.0).text("height"));
        if w.changed() || h.changed() {
            state.set_plot_size(Some(size));
        }
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub fn header(ctx: &egui::Context) {
    egui::TopBottomPanel::top("header")
        .frame(egui::Frame::default().fill(HEADER_COLOR).inner_margin(8.0))
        .show(ctx, |ui: &mut Ui| {
            ui.heading(RichText::new("Health Insurance Dashboard").color(Color32::WHITE));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.checkbox(&mut state.relabel_smoker, "Relabel smoker on open");
        });

        ui.separator();

        ui.selectable_value(&mut state.tab, Tab::Charts, "Charts");
        ui.selectable_value(&mut state.tab, Tab::Data, "Data");
        if state.tab == Tab::Data {
            ui.checkbox(&mut state.show_all_rows, "All rows");
        }

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.table().len(),
            state.visible_count()
        ));

        if let Some(source) = state.store.source() {
            ui.separator();
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open insurance data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match InsuranceStore::load(&path) {
            Ok(store) => state.set_store(store),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
