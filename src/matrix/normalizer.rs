// Header normalization: maps arbitrary spreadsheet headers onto the fixed
// canonical matrix schema through a static alias table.

use crate::workbook::Table;

/// The closed set of canonical matrix columns.
///
/// Every recognized source header is renamed to one of these three; the rest
/// of the pipeline only ever queries the canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalColumn {
    /// Business function the activity belongs to
    Function,
    /// Activity performed within the function
    Activity,
    /// Category of AI tool suited to the activity
    ToolType,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 3] = [
        CanonicalColumn::Function,
        CanonicalColumn::Activity,
        CanonicalColumn::ToolType,
    ];

    /// The exact header name used after normalization.
    pub fn display_name(&self) -> &'static str {
        match self {
            CanonicalColumn::Function => "Business Functions",
            CanonicalColumn::Activity => "Business Function Activities",
            CanonicalColumn::ToolType => "AI Tool Type",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::Function => FUNCTION_ALIASES,
            CanonicalColumn::Activity => ACTIVITY_ALIASES,
            CanonicalColumn::ToolType => TOOL_TYPE_ALIASES,
        }
    }
}

impl std::fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const FUNCTION_ALIASES: &[&str] = &[
    "Business Functions",
    "Business Function",
    "Function",
    "Dept",
    "Department",
    "Function Area",
    "Biz Function",
];

const ACTIVITY_ALIASES: &[&str] = &[
    "Business Function Activities",
    "Business Activities",
    "Activity",
    "Activities",
    "Process Step",
    "Task",
];

const TOOL_TYPE_ALIASES: &[&str] = &[
    "AI Tool Type",
    "AI Tool Types",
    "AI Type",
    "Tool Type",
    "AI Category",
    "AI Tool Category",
];

/// Reduce a header to its comparison key: lowercase, alphanumerics only.
///
/// " Dept ", "dept" and "DEPT" all share the key "dept", which is what makes
/// the alias lookup case-, whitespace-, and punctuation-insensitive.
pub fn normalize_key(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The canonical column a source header maps to, if its key matches an alias.
pub fn canonical_for(header: &str) -> Option<CanonicalColumn> {
    let key = normalize_key(header);
    if key.is_empty() {
        return None;
    }
    CanonicalColumn::ALL
        .into_iter()
        .find(|column| column.aliases().iter().any(|alias| normalize_key(alias) == key))
}

/// Whether a header is an auto-generated placeholder for a blank column.
pub fn is_placeholder(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed.is_empty() || trimmed.to_lowercase().starts_with("unnamed")
}

/// Drop placeholder columns, trim headers, and rename recognized aliases to
/// their canonical names. Unrecognized headers pass through unchanged.
///
/// No canonical column is synthesized here; use [`normalize_table`] when the
/// caller needs all three canonical columns present.
pub fn rename_headers(table: &Table) -> Table {
    let mut kept: Vec<(usize, String)> = Vec::new();
    for (index, header) in table.headers.iter().enumerate() {
        if is_placeholder(header) {
            continue;
        }
        let trimmed = header.trim();
        let renamed = match canonical_for(trimmed) {
            Some(column) => column.display_name().to_string(),
            None => trimmed.to_string(),
        };
        kept.push((index, renamed));
    }

    let headers: Vec<String> = kept.iter().map(|(_, name)| name.clone()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            kept.iter()
                .map(|(index, _)| row.get(*index).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Table {
        name: table.name.clone(),
        headers,
        rows,
    }
}

/// Full normalization: alias renaming plus synthesis of any canonical column
/// with no source match, as an all-empty column.
///
/// Synthesis keeps downstream stages degrading to "no options" instead of
/// failing on a missing column. If several source headers rename to the same
/// canonical column, all are kept and lookups resolve to the last one.
/// Normalizing an already-canonical table is a no-op.
pub fn normalize_table(table: &Table) -> Table {
    let mut renamed = rename_headers(table);
    for column in CanonicalColumn::ALL {
        if renamed.column_index(column.display_name()).is_none() {
            renamed.headers.push(column.display_name().to_string());
            for row in &mut renamed.rows {
                row.push(String::new());
            }
        }
    }
    renamed
}

/// Whether a renamed table carries all three canonical columns.
pub fn has_required_columns(table: &Table) -> bool {
    CanonicalColumn::ALL
        .iter()
        .all(|column| table.column_index(column.display_name()).is_some())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_normalize_key_keeps_only_lowercase_alphanumerics(header in ".*") {
            let key = normalize_key(&header);
            prop_assert!(key.chars().all(|c| c.is_alphanumeric() && !c.is_uppercase()));
        }

        #[test]
        fn prop_normalize_key_is_idempotent(header in ".*") {
            let key = normalize_key(&header);
            prop_assert_eq!(normalize_key(&key), key);
        }

        #[test]
        fn prop_surrounding_whitespace_never_changes_the_mapping(
            padding_left in "[ \t]{0,4}",
            padding_right in "[ \t]{0,4}",
            alias in prop::sample::select(vec![
                "Dept", "Department", "Function Area", "Activities", "Process Step",
                "Task", "AI Tool Type", "Tool Type", "AI Category",
            ]),
        ) {
            let decorated = format!("{}{}{}", padding_left, alias, padding_right);
            prop_assert_eq!(canonical_for(&decorated), canonical_for(alias));
        }

        #[test]
        fn prop_case_changes_never_change_the_mapping(
            alias in prop::sample::select(vec![
                "Dept", "Biz Function", "Business Activities", "AI Tool Types",
            ]),
        ) {
            prop_assert_eq!(canonical_for(&alias.to_uppercase()), canonical_for(alias));
            prop_assert_eq!(canonical_for(&alias.to_lowercase()), canonical_for(alias));
        }
    }
}
