pub(crate) mod config;

use std::path::PathBuf;

use config::AppConfig;
use egui::{Color32, ComboBox, RichText, Slider, Visuals, style::Widgets};
use egui_extras::{Column, TableBuilder};
use log::error;

use toolscout::advisor::{
    CostTier, MAX_SCORE, MIN_SCORE, PreferenceLevel, ROLLOUT_ADVICE, SelectionState,
    impact_for_type, recommend,
};
use toolscout::catalogue::{
    Catalogue, CatalogueEntry, CatalogueSource, ToolMatch, resolve_catalogue,
};
use toolscout::matrix::{MatrixResolution, MatrixStatus, resolve_matrix};
use toolscout::workbook::WorkbookCache;

use super::{PALETTE_INK, PALETTE_SLATE, PALETTE_TEAL, caption, notice, step_heading, warning};

const DATA_CHECK_ROWS: usize = 10;
const COMBO_WIDTH: f32 = 260.0;

/// One loaded workbook, resolved into the taxonomy and the catalogue.
struct LoadedWorkbook {
    source: PathBuf,
    resolution: MatrixResolution,
    catalogue: Catalogue,
    catalogue_source: CatalogueSource,
}

/// `WizardApp` walks the user through the guided tool selection: open a
/// workbook, pick function, activity and tool type, set preferences, score
/// the matching tools, and read the recommendation.
///
/// The selections live in an explicit [`SelectionState`]; every widget
/// interaction re-runs the cascade from the resolved workbook, so changing an
/// earlier stage can never leave a stale later stage on screen.
pub struct WizardApp {
    app_config: AppConfig,
    cache: WorkbookCache,
    loaded: Option<LoadedWorkbook>,
    load_error: Option<String>,
    state: SelectionState,
}

impl WizardApp {
    pub fn new(
        app_config: AppConfig,
        input: Option<PathBuf>,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_TEAL,
            faint_bg_color: PALETTE_INK,
            extreme_bg_color: PALETTE_SLATE,
            panel_fill: PALETTE_INK,
            button_frame: true,
            window_fill: PALETTE_SLATE,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        let mut app = Self {
            app_config,
            cache: WorkbookCache::new(),
            loaded: None,
            load_error: None,
            state: SelectionState::new(),
        };
        if let Some(path) = input.or_else(|| app.app_config.last_workbook.clone()) {
            app.open_workbook(path, false);
        }
        app
    }

    /// Load a workbook and resolve the matrix and catalogue from it.
    ///
    /// Opening a file resets the selections. A failed load keeps the error on
    /// screen until another file is opened; the explicit open button forces a
    /// reload past the cache so edits to the same file are picked up.
    fn open_workbook(&mut self, path: PathBuf, force: bool) {
        self.state = SelectionState::new();
        self.load_error = None;

        let result = if force {
            self.cache.reload(&path)
        } else {
            self.cache.load(&path)
        };
        let loaded = result.map(|workbook| {
            let resolution = resolve_matrix(workbook);
            let (catalogue, catalogue_source) = resolve_catalogue(workbook);
            LoadedWorkbook {
                source: workbook.source.clone(),
                resolution,
                catalogue,
                catalogue_source,
            }
        });

        match loaded {
            Ok(loaded) => {
                self.app_config.last_workbook = Some(loaded.source.clone());
                self.loaded = Some(loaded);
                if let Err(e) = self.app_config.save() {
                    error!("Error while saving config file: {}", e);
                }
            }
            Err(e) => {
                self.loaded = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn show_welcome(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading(RichText::new("Open a workbook to begin").color(Color32::WHITE));
            ui.add_space(8.0);
            caption(
                ui,
                "Expected: a matrix sheet with business functions, activities and AI tool \
                 types, plus an optional catalogue sheet (Tool | Type | Features | Strengths \
                 | Limitations | Pricing | Link).",
            );
        });
    }

    fn show_wizard(&mut self, ui: &mut egui::Ui) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };
        let state = &mut self.state;

        show_data_check(ui, loaded);

        if loaded.resolution.status == MatrixStatus::MissingRequiredColumns {
            warning(
                ui,
                "No sheet in this workbook carries the required matrix columns. Fix the \
                 workbook and open it again.",
            );
            return;
        }
        if loaded.catalogue_source == CatalogueSource::Builtin {
            notice(ui, "No catalogue sheet found; using the built-in demo catalogue.");
        }

        step_heading(ui, 1, "Select business function & activity");
        let functions = loaded.resolution.matrix.functions();
        if functions.is_empty() {
            warning(ui, "The matrix has no business functions to offer.");
            return;
        }
        if let Some(choice) = option_combo(
            ui,
            "function",
            "Business Function",
            &functions,
            state.function.as_deref(),
        ) {
            state.select_function(&choice);
        }

        let Some(function) = state.function.clone() else {
            return;
        };
        let activities = loaded.resolution.matrix.activities_for(&function);
        if activities.is_empty() {
            warning(ui, "No activities recorded for that function. Pick another one.");
            return;
        }
        if let Some(choice) = option_combo(
            ui,
            "activity",
            "Activity",
            &activities,
            state.activity.as_deref(),
        ) {
            state.select_activity(&choice);
        }

        let Some(activity) = state.activity.clone() else {
            return;
        };
        step_heading(ui, 2, "Filter AI tool types");
        let tool_types = loaded.resolution.matrix.tool_types_for(&function, &activity);
        if tool_types.is_empty() {
            warning(
                ui,
                "No AI tool types for that selection. Adjust the workbook or pick another \
                 activity.",
            );
            return;
        }
        if let Some(choice) = tool_type_combo(ui, &tool_types, state.tool_type.as_deref()) {
            state.select_tool_type(&choice);
        }

        let Some(tool_type) = state.tool_type.clone() else {
            return;
        };
        step_heading(ui, 3, "Set preferences");
        ui.horizontal(|ui| {
            level_combo(ui, "complexity", "Complexity", &mut state.preferences.complexity);
            level_combo(
                ui,
                "scalability",
                "Scalability",
                &mut state.preferences.scalability,
            );

            let mut cost = state.preferences.cost;
            ComboBox::from_id_salt("cost")
                .selected_text(cost.label())
                .show_ui(ui, |ui| {
                    for tier in CostTier::ALL {
                        ui.selectable_value(&mut cost, tier, tier.label());
                    }
                });
            caption(ui, "Cost Structure");
            state.set_cost(cost);
        });

        step_heading(ui, 4, "Matching AI tools");
        let cost_tier = state.preferences.cost.label();
        let matches = loaded.catalogue.match_tools(&tool_type, cost_tier);
        match &matches {
            ToolMatch::Empty => {
                warning(
                    ui,
                    &format!(
                        "No catalogue entry has type {:?}. Broaden the tool type selection.",
                        tool_type
                    ),
                );
                return;
            }
            ToolMatch::Relaxed(_) => notice(
                ui,
                &format!(
                    "No exact matches on cost {:?}; showing all {} tools instead.",
                    cost_tier, tool_type
                ),
            ),
            ToolMatch::Strict(_) => {}
        }
        match_table(ui, matches.entries(), state);

        step_heading(ui, 5, "Score & recommend");
        if let Some(recommendation) = recommend(matches.entries(), state.scores()) {
            ui.group(|ui| {
                ui.heading(
                    RichText::new(format!("✅ Recommended: {}", recommendation.entry.tool))
                        .color(PALETTE_TEAL)
                        .strong(),
                );
                caption(ui, &format!("Scored {}/{}", recommendation.score, MAX_SCORE));
                for (label, value) in [
                    ("Features", &recommendation.entry.features),
                    ("Strengths", &recommendation.entry.strengths),
                    ("Limitations", &recommendation.entry.limitations),
                    ("Pricing", &recommendation.entry.pricing),
                ] {
                    if !value.is_empty() {
                        ui.label(format!("{}: {}", label, value));
                    }
                }
                if !recommendation.entry.link.is_empty() {
                    ui.hyperlink(&recommendation.entry.link);
                }
                ui.separator();
                ui.label(RichText::new("Rollout advice").color(Color32::WHITE).strong());
                for advice in ROLLOUT_ADVICE {
                    ui.label(format!("• {}", advice));
                }
            });
        }
    }
}

impl eframe::App for WizardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.app_config.window_width = rect.width();
            self.app_config.window_height = rect.height();
        }

        egui::TopBottomPanel::top("wizard_top_bar")
            .frame(egui::Frame::new().inner_margin(4))
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.visuals_mut().button_frame = false;
                    if ui.button("📂 Open Workbook").clicked()
                        && let Some(path) = rfd::FileDialog::new()
                            .add_filter(
                                "Workbooks",
                                &["xlsx", "xlsm", "xls", "xlsb", "csv", "tsv", "txt"],
                            )
                            .pick_file()
                    {
                        self.open_workbook(path, true);
                    }
                    if let Some(loaded) = &self.loaded {
                        caption(ui, &format!("{}", loaded.source.display()));
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(message) = &self.load_error {
                    warning(ui, &format!("Could not load the workbook: {}", message));
                }
                if self.loaded.is_some() {
                    self.show_wizard(ui);
                } else if self.load_error.is_none() {
                    self.show_welcome(ui);
                }
            });
        });
    }
}

/// Collapsible mirror of the load: which sheet became the matrix, where the
/// catalogue came from, and the first rows of the taxonomy.
fn show_data_check(ui: &mut egui::Ui, loaded: &LoadedWorkbook) {
    egui::CollapsingHeader::new(RichText::new("🔎 Data check").color(Color32::WHITE).strong())
        .default_open(false)
        .show(ui, |ui| {
            caption(ui, &format!("Source: {}", loaded.source.display()));
            let status = match loaded.resolution.status {
                MatrixStatus::Ok => "ok",
                MatrixStatus::MissingRequiredColumns => "missing required columns",
            };
            caption(
                ui,
                &format!(
                    "Matrix sheet: {} | Status: {}",
                    loaded.resolution.sheet_name, status
                ),
            );
            caption(
                ui,
                &format!(
                    "Catalogue: {} ({} tools)",
                    loaded.catalogue_source.describe(),
                    loaded.catalogue.len()
                ),
            );
            ui.add_space(4.0);
            caption(
                ui,
                &format!("Columns: {}", loaded.resolution.table.headers.join(" | ")),
            );
            for row in loaded.resolution.table.rows.iter().take(DATA_CHECK_ROWS) {
                ui.label(
                    RichText::new(row.join(" | "))
                        .small()
                        .monospace()
                        .color(Color32::LIGHT_GRAY),
                );
            }
        });
}

/// Dropdown over a cascading option list. Returns the option clicked this
/// frame, if any.
fn option_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    options: &[String],
    selected: Option<&str>,
) -> Option<String> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        ComboBox::from_id_salt(id)
            .width(COMBO_WIDTH)
            .selected_text(selected.unwrap_or("Select…").to_string())
            .show_ui(ui, |ui| {
                for option in options {
                    if ui
                        .selectable_label(selected == Some(option.as_str()), option)
                        .clicked()
                    {
                        clicked = Some(option.clone());
                    }
                }
            });
        caption(ui, label);
    });
    clicked
}

/// Tool type dropdown, with the impact hint folded into each option label.
fn tool_type_combo(
    ui: &mut egui::Ui,
    options: &[String],
    selected: Option<&str>,
) -> Option<String> {
    let labelled = |tool_type: &str| format!("{} (Impact: {})", tool_type, impact_for_type(tool_type));
    let mut clicked = None;
    ui.horizontal(|ui| {
        ComboBox::from_id_salt("tool_type")
            .width(COMBO_WIDTH)
            .selected_text(selected.map(labelled).unwrap_or_else(|| "Select…".to_string()))
            .show_ui(ui, |ui| {
                for option in options {
                    if ui
                        .selectable_label(selected == Some(option.as_str()), labelled(option))
                        .clicked()
                    {
                        clicked = Some(option.clone());
                    }
                }
            });
        caption(ui, "AI Tool Type");
    });
    clicked
}

fn level_combo(ui: &mut egui::Ui, id: &str, label: &str, level: &mut PreferenceLevel) {
    ComboBox::from_id_salt(id)
        .selected_text(level.to_string())
        .show_ui(ui, |ui| {
            for option in PreferenceLevel::ALL {
                ui.selectable_value(level, option, option.to_string());
            }
        });
    caption(ui, label);
}

/// Matched tools with a score slider per row. Scores default to the midpoint
/// the first time a tool shows up.
fn match_table(ui: &mut egui::Ui, entries: &[CatalogueEntry], state: &mut SelectionState) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(120.0))
        .header(22.0, |mut header| {
            for title in [
                "Tool",
                "Features",
                "Strengths",
                "Limitations",
                "Pricing",
                "Link",
                "Score",
            ] {
                header.col(|ui| {
                    ui.label(RichText::new(title).color(Color32::WHITE).strong());
                });
            }
        })
        .body(|mut body| {
            for entry in entries {
                body.row(24.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&entry.tool);
                    });
                    row.col(|ui| {
                        ui.label(&entry.features);
                    });
                    row.col(|ui| {
                        ui.label(&entry.strengths);
                    });
                    row.col(|ui| {
                        ui.label(&entry.limitations);
                    });
                    row.col(|ui| {
                        ui.label(&entry.pricing);
                    });
                    row.col(|ui| {
                        if !entry.link.is_empty() {
                            ui.hyperlink(&entry.link);
                        }
                    });
                    row.col(|ui| {
                        ui.add(Slider::new(state.score_mut(&entry.tool), MIN_SCORE..=MAX_SCORE));
                    });
                });
            }
        });
}
