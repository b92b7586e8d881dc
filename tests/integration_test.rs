// Integration tests driving the full selection pipeline: load a workbook,
// resolve the matrix and catalogue, cascade the selections, match tools,
// score them, and pick a recommendation.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use toolscout::advisor::{CostTier, DEFAULT_SCORE, SelectionState, recommend};
use toolscout::catalogue::{Catalogue, CatalogueSource, ToolMatch, resolve_catalogue};
use toolscout::matrix::{MatrixStatus, normalize_table, resolve_matrix};
use toolscout::workbook::{Table, Workbook, WorkbookCache, load_workbook};

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        name: name.to_string(),
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

fn workbook_of(tables: Vec<Table>) -> Workbook {
    Workbook {
        source: PathBuf::from("workbook.xlsx"),
        tables,
    }
}

const MATRIX_CSV: &str = "\
Dept,Business Activities,AI Tool Type
Marketing,Content Drafting,LLM Assistant
Marketing,Campaign Visuals,Creative/Design AI
Marketing,Campaign Visuals,Image Generation AI
Finance,Invoice Processing,RPA
HR,Candidate Screening,LLM Assistant
";

#[test]
fn test_full_cycle_from_aliased_csv_to_recommendation() {
    let file = write_csv(MATRIX_CSV);
    let mut cache = WorkbookCache::new();
    let workbook = cache.load(file.path()).unwrap();

    let resolution = resolve_matrix(workbook);
    assert!(resolution.status.is_ok());

    // No catalogue sheet in a delimited file, so the built-in one applies
    let (catalogue, source) = resolve_catalogue(workbook);
    assert_eq!(source, CatalogueSource::Builtin);

    let mut state = SelectionState::new();
    let functions = resolution.matrix.functions();
    assert_eq!(functions, vec!["Finance", "HR", "Marketing"]);
    state.select_function("Marketing");

    let activities = resolution.matrix.activities_for("Marketing");
    assert_eq!(activities, vec!["Campaign Visuals", "Content Drafting"]);
    state.select_activity("Campaign Visuals");

    let tool_types = resolution
        .matrix
        .tool_types_for("Marketing", "Campaign Visuals");
    assert_eq!(tool_types, vec!["Creative/Design AI", "Image Generation AI"]);
    state.select_tool_type("Creative/Design AI");

    state.set_cost(CostTier::Freemium);
    let matches = catalogue.match_tools("Creative/Design AI", state.preferences.cost.label());
    assert!(!matches.is_relaxed());
    let entries = matches.entries().to_vec();
    let tools: Vec<&str> = entries.iter().map(|e| e.tool.as_str()).collect();
    assert_eq!(tools, vec!["Figma AI", "Canva AI"]);

    state.set_score("Canva AI", 5);
    state.set_score("Figma AI", 4);
    let recommendation = recommend(&entries, state.scores()).unwrap();
    assert_eq!(recommendation.entry.tool, "Canva AI");
    assert_eq!(recommendation.score, 5);
}

#[test]
fn test_matrix_and_catalogue_sheets_resolve_from_one_workbook() {
    let workbook = workbook_of(vec![
        table(
            "Matrix",
            &[
                "Business Functions",
                "Business Function Activities",
                "AI Tool Type",
            ],
            &[&["IT", "Ticket Triage", "LLM Assistant"]],
        ),
        table(
            "Catalogue",
            &["Tool", "Type", "Pricing"],
            &[
                &["Jasper", "LLM Assistant", "Subscription"],
                &["ChatGPT", "LLM Assistant", "Freemium"],
            ],
        ),
    ]);

    let resolution = resolve_matrix(&workbook);
    assert_eq!(resolution.sheet_name, "Matrix");
    assert!(resolution.status.is_ok());

    let (catalogue, source) = resolve_catalogue(&workbook);
    assert_eq!(source, CatalogueSource::Sheet("Catalogue".to_string()));

    let matches = catalogue.match_tools("LLM Assistant", "Subscription");
    match matches {
        ToolMatch::Strict(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].tool, "Jasper");
        }
        other => panic!("Expected a strict match, got {:?}", other),
    }
}

#[test]
fn test_workbook_without_required_columns_offers_nothing() {
    let file = write_csv("Quarter,Spend\nQ1,10k\n");
    let workbook = load_workbook(file.path()).unwrap();

    let resolution = resolve_matrix(&workbook);
    assert_eq!(resolution.status, MatrixStatus::MissingRequiredColumns);
    // The cascade degrades to zero options instead of panicking
    assert!(resolution.matrix.functions().is_empty());
}

#[test]
fn test_blank_tool_type_cells_are_a_dead_end_not_a_panic() {
    let file = write_csv("Dept,Activity,AI Tool Type\nHR,Candidate Screening,\n");
    let workbook = load_workbook(file.path()).unwrap();

    let resolution = resolve_matrix(&workbook);
    assert!(resolution.status.is_ok());
    assert_eq!(resolution.matrix.functions(), vec!["HR"]);
    assert!(
        resolution
            .matrix
            .tool_types_for("HR", "Candidate Screening")
            .is_empty()
    );
}

#[test]
fn test_canonical_workbook_normalizes_to_itself() {
    let file = write_csv(
        "Business Functions,Business Function Activities,AI Tool Type\n\
         Finance,Forecasting,LLM Assistant\n",
    );
    let workbook = load_workbook(file.path()).unwrap();

    let resolution = resolve_matrix(&workbook);
    assert!(resolution.status.is_ok());
    assert_eq!(normalize_table(&resolution.table), resolution.table);
}

#[test]
fn test_relaxed_cost_filter_surfaces_the_single_rpa_row() {
    let catalogue = Catalogue::builtin();
    // UiPath is the only RPA entry and is priced "Enterprise", so asking for
    // "Subscription" strictly matches nothing and the cost filter is dropped
    let matches = catalogue.match_tools("RPA", "Subscription");

    match matches {
        ToolMatch::Relaxed(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].tool, "UiPath");
        }
        other => panic!("Expected a relaxed match, got {:?}", other),
    }
}

#[test]
fn test_changing_cost_tier_rematches_and_clears_scores() {
    let catalogue = Catalogue::builtin();
    let mut state = SelectionState::new();
    state.select_function("Finance");
    state.select_activity("Invoice Processing");
    state.select_tool_type("RPA");

    state.set_cost(CostTier::Enterprise);
    let strict = catalogue.match_tools("RPA", state.preferences.cost.label());
    assert!(!strict.is_relaxed());
    state.set_score("UiPath", 5);

    state.set_cost(CostTier::Subscription);
    let relaxed = catalogue.match_tools("RPA", state.preferences.cost.label());
    assert!(relaxed.is_relaxed());
    // The match set changed, so earlier ratings no longer apply
    assert!(state.scores().is_empty());
    assert_eq!(state.score_for("UiPath"), DEFAULT_SCORE);
}

#[test]
fn test_tied_scores_resolve_to_catalogue_order() {
    let catalogue = Catalogue::builtin();
    let entries = catalogue.entries().to_vec();

    let mut state = SelectionState::new();
    state.set_score("ChatGPT", 4);
    state.set_score("MidJourney", 4);

    // ChatGPT precedes MidJourney in catalogue order and only a strictly
    // greater score displaces the current winner
    let recommendation = recommend(&entries, state.scores()).unwrap();
    assert_eq!(recommendation.entry.tool, "ChatGPT");
}
