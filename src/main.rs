mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use egui::Vec2;
use toolscout::errors::ToolscoutError;
use toolscout::matrix::{self, CanonicalColumn, MatrixStatus};
use toolscout::{catalogue, workbook};
use ui::wizard::{WizardApp, config::AppConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Wizard {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    Check {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn wizard(input: Option<PathBuf>) -> Result<(), ToolscoutError> {
    let app_config = AppConfig::from_local_file().unwrap_or_default();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(app_config.window_width, app_config.window_height));

    eframe::run_native(
        "Toolscout",
        native_options,
        Box::new(|cc| Ok(Box::new(WizardApp::new(app_config, input, cc)))),
    )
    .expect("could not start app");
    Ok(())
}

/// Headless data check: report how the workbook's sheets resolve without
/// opening the wizard.
fn check(input: &PathBuf) -> Result<(), ToolscoutError> {
    let workbook = workbook::load_workbook(input)?;
    let names: Vec<&str> = workbook
        .tables
        .iter()
        .map(|table| table.name.as_str())
        .collect();
    println!("Workbook: {}", workbook.source.display());
    println!("Tables ({}): {}", names.len(), names.join(", "));

    let resolution = matrix::resolve_matrix(&workbook);
    println!("Matrix sheet: {}", resolution.sheet_name);

    // Report the canonical columns against the sheet as it arrived, before
    // the missing ones are synthesized empty
    if let Some(sheet) = workbook
        .tables
        .iter()
        .find(|table| table.name == resolution.sheet_name)
    {
        let renamed = matrix::rename_headers(sheet);
        for column in CanonicalColumn::ALL {
            let found = renamed.column_index(column.display_name()).is_some();
            println!(
                "  {}: {}",
                column.display_name(),
                if found { "found" } else { "missing" }
            );
        }
    }

    match resolution.status {
        MatrixStatus::Ok => {
            let functions = resolution.matrix.functions();
            println!(
                "Status: ok ({} taxonomy rows, {} functions)",
                resolution.matrix.len(),
                functions.len()
            );
            for function in functions {
                let activities = resolution.matrix.activities_for(&function);
                println!("  {} ({} activities)", function, activities.len());
            }
        }
        MatrixStatus::MissingRequiredColumns => {
            println!("Status: missing required columns, no selections can be offered");
        }
    }

    let (catalogue, source) = catalogue::resolve_catalogue(&workbook);
    println!("Catalogue: {} ({} tools)", source.describe(), catalogue.len());
    for entry in catalogue.entries() {
        println!("  {} [{}] {}", entry.tool, entry.tool_type, entry.pricing);
    }
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");
    match &cli.command {
        Commands::Wizard { input } => {
            wizard(input.clone()).expect("Error while running the selection wizard")
        }
        Commands::Check { input } => check(input).expect("Error while checking the workbook"),
    };
}
