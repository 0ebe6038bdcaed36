mod app;
mod color;
mod config;
mod data;
mod error;
mod reactive;
mod state;
mod ui;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::DashboardApp;
use config::Args;
use data::model::Table;
use data::store::InsuranceStore;
use error::DataLoadError;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args, std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load the dataset, then either print it to `out` or open the window.
fn run<W: Write>(args: &Args, out: W) -> anyhow::Result<()> {
    let store = open_store(args)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    if args.print {
        print_table(store.data(), out)
    } else {
        run_dashboard(args, store)
    }
}

fn open_store(args: &Args) -> Result<InsuranceStore, DataLoadError> {
    let mut store = InsuranceStore::load(&args.data)?;
    if args.relabel_smoker {
        store.relabel_smoker();
    }
    Ok(store)
}

/// Write the table as CSV.
fn print_table<W: Write>(table: &Table, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in table {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}

fn run_dashboard(args: &Args, store: InsuranceStore) -> anyhow::Result<()> {
    let criteria = args.criteria(store.data().age_bounds());
    let mut state = AppState::new(store, criteria);
    state.relabel_smoker = args.relabel_smoker;
    state.show_pie = args.pie;
    for (widget, value) in state.unknown_selections() {
        log::warn!("--{widget} '{value}' matches no row in {}", args.data.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Health Insurance Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}
