use log::{info, warn};

use crate::workbook::{Table, Workbook};

pub mod matcher;
pub use matcher::ToolMatch;

/// Sheet names that are checked first when looking for a catalogue.
pub const PREFERRED_SHEET_NAMES: [&str; 4] = ["Catalogue", "Catalog", "Tools", "Tool Catalogue"];

/// Catalogue columns, in display order. Only `Tool` and `Type` are required
/// in a source sheet; the rest default to empty strings.
pub const CATALOGUE_COLUMNS: [&str; 7] = [
    "Tool",
    "Type",
    "Features",
    "Strengths",
    "Limitations",
    "Pricing",
    "Link",
];

/// One tool in the catalogue.
///
/// `pricing` is free text ("Freemium", "Enterprise (annual)") and is matched
/// by substring, not enum equality. `link` is carried as-is, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub tool: String,
    pub tool_type: String,
    pub features: String,
    pub strengths: String,
    pub limitations: String,
    pub pricing: String,
    pub link: String,
}

/// The tool catalogue for one session, loaded from a sheet or the built-in
/// fallback. Immutable once loaded; entry order is the iteration order that
/// scoring ties resolve against.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    /// The built-in demo catalogue used when no catalogue sheet is supplied.
    pub fn builtin() -> Self {
        let entry = |tool: &str,
                     tool_type: &str,
                     features: &str,
                     strengths: &str,
                     limitations: &str,
                     pricing: &str,
                     link: &str| CatalogueEntry {
            tool: tool.to_string(),
            tool_type: tool_type.to_string(),
            features: features.to_string(),
            strengths: strengths.to_string(),
            limitations: limitations.to_string(),
            pricing: pricing.to_string(),
            link: link.to_string(),
        };

        Self {
            entries: vec![
                entry(
                    "ChatGPT",
                    "LLM Assistant",
                    "Chatbot, content gen",
                    "Versatile",
                    "No real-time data",
                    "Freemium",
                    "https://chatgpt.com/",
                ),
                entry(
                    "MidJourney",
                    "Image Generation AI",
                    "Image gen",
                    "High quality",
                    "Subscription",
                    "Subscription",
                    "https://www.midjourney.com/",
                ),
                entry(
                    "UiPath",
                    "RPA",
                    "Automation",
                    "Scalable",
                    "Complex setup",
                    "Enterprise",
                    "https://www.uipath.com/",
                ),
                entry(
                    "Figma AI",
                    "Creative/Design AI",
                    "Design, prototyping",
                    "User-friendly",
                    "Limited advanced features",
                    "Freemium",
                    "https://www.figma.com/ai/",
                ),
                entry(
                    "Canva AI",
                    "Creative/Design AI",
                    "Graphic design",
                    "Easy to use",
                    "Less technical",
                    "Freemium",
                    "https://www.canva.com/ai/",
                ),
            ],
        }
    }

    /// Build a catalogue from a sheet, mapping the known columns and filling
    /// the missing optional ones with empty strings. Rows without a tool name
    /// are skipped.
    pub fn from_table(table: &Table) -> Self {
        let column = |name: &str| table.column_index(name);
        let tool_index = column("Tool");
        let type_index = column("Type");
        let features_index = column("Features");
        let strengths_index = column("Strengths");
        let limitations_index = column("Limitations");
        let pricing_index = column("Pricing");
        let link_index = column("Link");

        let entries = table
            .rows
            .iter()
            .filter_map(|row| {
                let value = |index: Option<usize>| {
                    index
                        .and_then(|i| row.get(i))
                        .map(|cell| cell.trim().to_string())
                        .unwrap_or_default()
                };
                let entry = CatalogueEntry {
                    tool: value(tool_index),
                    tool_type: value(type_index),
                    features: value(features_index),
                    strengths: value(strengths_index),
                    limitations: value(limitations_index),
                    pricing: value(pricing_index),
                    link: value(link_index),
                };
                if entry.tool.is_empty() {
                    None
                } else {
                    Some(entry)
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where the session's catalogue came from. The built-in fallback is a state
/// the caller surfaces, never a silent substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    Sheet(String),
    Builtin,
}

impl CatalogueSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogueSource::Sheet(name) => format!("sheet {:?}", name),
            CatalogueSource::Builtin => "built-in demo catalogue".to_string(),
        }
    }
}

/// Find the session catalogue in a workbook.
///
/// Sheets with a preferred catalogue name win outright; otherwise the first
/// sheet carrying both `Tool` and `Type` columns is used; otherwise the
/// built-in catalogue is returned, tagged as such.
pub fn resolve_catalogue(workbook: &Workbook) -> (Catalogue, CatalogueSource) {
    for name in PREFERRED_SHEET_NAMES {
        if let Some(table) = workbook.tables.iter().find(|table| table.name == name) {
            info!("Using preferred sheet {:?} as the catalogue", table.name);
            return (
                Catalogue::from_table(table),
                CatalogueSource::Sheet(table.name.clone()),
            );
        }
    }

    for table in &workbook.tables {
        if table.column_index("Tool").is_some() && table.column_index("Type").is_some() {
            info!("Using sheet {:?} as the catalogue", table.name);
            return (
                Catalogue::from_table(table),
                CatalogueSource::Sheet(table.name.clone()),
            );
        }
    }

    warn!(
        "No catalogue sheet found in {:?}, using the built-in catalogue",
        workbook.source
    );
    (Catalogue::builtin(), CatalogueSource::Builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

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

    fn workbook(tables: Vec<Table>) -> Workbook {
        Workbook {
            source: PathBuf::from("matrix.xlsx"),
            tables,
        }
    }

    #[test]
    fn test_builtin_catalogue_has_the_expected_rows() {
        let catalogue = Catalogue::builtin();
        let tools: Vec<&str> = catalogue.entries().iter().map(|e| e.tool.as_str()).collect();
        assert_eq!(
            tools,
            vec!["ChatGPT", "MidJourney", "UiPath", "Figma AI", "Canva AI"]
        );
        assert_eq!(catalogue.entries()[2].pricing, "Enterprise");
    }

    #[test]
    fn test_missing_optional_columns_default_to_empty() {
        let catalogue = Catalogue::from_table(&table(
            "Tools",
            &["Tool", "Type"],
            &[&["Jasper", "LLM Assistant"]],
        ));
        assert_eq!(catalogue.len(), 1);
        let entry = &catalogue.entries()[0];
        assert_eq!(entry.tool, "Jasper");
        assert_eq!(entry.pricing, "");
        assert_eq!(entry.link, "");
    }

    #[test]
    fn test_rows_without_a_tool_name_are_skipped() {
        let catalogue = Catalogue::from_table(&table(
            "Tools",
            &["Tool", "Type"],
            &[&["", "RPA"], &["UiPath", "RPA"]],
        ));
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.entries()[0].tool, "UiPath");
    }

    #[test]
    fn test_preferred_sheet_name_wins() {
        let generic = table(
            "Inventory",
            &["Tool", "Type"],
            &[&["Zapier AI", "Automation"]],
        );
        let preferred = table("Catalogue", &["Tool", "Type"], &[&["UiPath", "RPA"]]);
        let (catalogue, source) = resolve_catalogue(&workbook(vec![generic, preferred]));

        assert_eq!(source, CatalogueSource::Sheet("Catalogue".to_string()));
        assert_eq!(catalogue.entries()[0].tool, "UiPath");
    }

    #[test]
    fn test_any_sheet_with_tool_and_type_columns_qualifies() {
        let notes = table("Notes", &["Comment"], &[&["hello"]]);
        let inventory = table(
            "Inventory",
            &["Tool", "Type", "Pricing"],
            &[&["Jasper", "LLM Assistant", "Subscription"]],
        );
        let (catalogue, source) = resolve_catalogue(&workbook(vec![notes, inventory]));

        assert_eq!(source, CatalogueSource::Sheet("Inventory".to_string()));
        assert_eq!(catalogue.entries()[0].pricing, "Subscription");
    }

    #[test]
    fn test_builtin_fallback_is_tagged() {
        let (catalogue, source) =
            resolve_catalogue(&workbook(vec![table("Notes", &["Comment"], &[])]));
        assert_eq!(source, CatalogueSource::Builtin);
        assert_eq!(catalogue.len(), 5);
    }
}
