use itertools::Itertools;
use log::{info, warn};

use crate::workbook::{Table, Workbook};

pub mod normalizer;
pub use normalizer::{CanonicalColumn, canonical_for, normalize_key, normalize_table, rename_headers};

/// Sheet name that is preferred for the taxonomy when it qualifies.
pub const MATRIX_SHEET_NAME: &str = "Matrix";

/// One taxonomy entry: an activity within a business function, mapped to a
/// category of AI tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyRow {
    pub function: String,
    pub activity: String,
    pub tool_type: String,
}

/// The normalized taxonomy, queried through cascading filters.
///
/// Rows are parsed once per sheet load and immutable afterwards; a reload
/// replaces the whole table. Each selector narrows by every earlier stage,
/// returning distinct non-empty values in ordinal ascending order so option
/// lists are stable and reproducible.
#[derive(Debug, Clone)]
pub struct MatrixTable {
    rows: Vec<TaxonomyRow>,
}

impl MatrixTable {
    /// Build the taxonomy from a normalized table.
    ///
    /// Duplicate canonical headers resolve to the last column. Rows that are
    /// blank across all three canonical columns are skipped.
    pub fn from_table(table: &Table) -> Self {
        let function_index = table.last_column_index(CanonicalColumn::Function.display_name());
        let activity_index = table.last_column_index(CanonicalColumn::Activity.display_name());
        let tool_type_index = table.last_column_index(CanonicalColumn::ToolType.display_name());

        let rows = table
            .rows
            .iter()
            .filter_map(|row| {
                let value = |index: Option<usize>| {
                    index
                        .and_then(|i| row.get(i))
                        .map(|cell| cell.trim().to_string())
                        .unwrap_or_default()
                };
                let taxonomy_row = TaxonomyRow {
                    function: value(function_index),
                    activity: value(activity_index),
                    tool_type: value(tool_type_index),
                };
                if taxonomy_row.function.is_empty()
                    && taxonomy_row.activity.is_empty()
                    && taxonomy_row.tool_type.is_empty()
                {
                    None
                } else {
                    Some(taxonomy_row)
                }
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[TaxonomyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct business functions across the whole taxonomy.
    pub fn functions(&self) -> Vec<String> {
        distinct_sorted(self.rows.iter().map(|row| &row.function))
    }

    /// Distinct activities recorded under `function`.
    pub fn activities_for(&self, function: &str) -> Vec<String> {
        distinct_sorted(
            self.rows
                .iter()
                .filter(|row| row.function == function)
                .map(|row| &row.activity),
        )
    }

    /// Distinct tool types recorded under the (function, activity) pair.
    ///
    /// An empty result is a terminal dead-end: the caller must ask for a
    /// different pair rather than proceed to an empty recommendation.
    pub fn tool_types_for(&self, function: &str, activity: &str) -> Vec<String> {
        distinct_sorted(
            self.rows
                .iter()
                .filter(|row| row.function == function && row.activity == activity)
                .map(|row| &row.tool_type),
        )
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .filter(|value| !value.is_empty())
        .cloned()
        .sorted()
        .dedup()
        .collect_vec()
}

/// Outcome of scanning a workbook for the taxonomy sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixStatus {
    /// A sheet with all three canonical columns was found.
    Ok,
    /// No sheet qualified; the resolution carries the first sheet and the
    /// caller must halt before offering any selections.
    MissingRequiredColumns,
}

impl MatrixStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, MatrixStatus::Ok)
    }
}

/// The resolved taxonomy: which sheet was used, its normalized contents, and
/// whether the required columns were actually present.
#[derive(Debug, Clone)]
pub struct MatrixResolution {
    pub sheet_name: String,
    pub status: MatrixStatus,
    /// The normalized sheet, kept for data-check display.
    pub table: Table,
    pub matrix: MatrixTable,
}

/// Find the taxonomy sheet in a workbook.
///
/// A sheet literally named "Matrix" is preferred when its normalized headers
/// carry all three canonical columns. Otherwise sheets are scanned in source
/// iteration order and the first qualifying one wins; there is no scoring
/// among candidates. When none qualifies the first sheet is returned with
/// [`MatrixStatus::MissingRequiredColumns`] so the caller can report which
/// columns were actually found.
pub fn resolve_matrix(workbook: &Workbook) -> MatrixResolution {
    if let Some(table) = workbook
        .tables
        .iter()
        .find(|table| table.name == MATRIX_SHEET_NAME)
    {
        let renamed = rename_headers(table);
        if normalizer::has_required_columns(&renamed) {
            info!("Using preferred sheet {:?} as the matrix", table.name);
            return qualified_resolution(renamed);
        }
    }

    for table in &workbook.tables {
        let renamed = rename_headers(table);
        if normalizer::has_required_columns(&renamed) {
            info!("Using sheet {:?} as the matrix", table.name);
            return qualified_resolution(renamed);
        }
    }

    warn!(
        "No sheet in {:?} contains the required matrix columns",
        workbook.source
    );
    let first = workbook.tables.first().cloned().unwrap_or(Table {
        name: String::new(),
        headers: Vec::new(),
        rows: Vec::new(),
    });
    let normalized = normalize_table(&first);
    MatrixResolution {
        sheet_name: normalized.name.clone(),
        status: MatrixStatus::MissingRequiredColumns,
        matrix: MatrixTable::from_table(&normalized),
        table: normalized,
    }
}

fn qualified_resolution(renamed: Table) -> MatrixResolution {
    let normalized = normalize_table(&renamed);
    MatrixResolution {
        sheet_name: normalized.name.clone(),
        status: MatrixStatus::Ok,
        matrix: MatrixTable::from_table(&normalized),
        table: normalized,
    }
}
