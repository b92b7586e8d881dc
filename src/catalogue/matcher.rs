// Tool matching: narrows the catalogue by tool type and cost tier, with an
// explicit fallback when the cost filter is too strict.

use log::info;

use super::{Catalogue, CatalogueEntry};

/// Result of matching the catalogue against a tool type and cost tier.
///
/// Every fallback path is tagged so callers (and tests) can tell which
/// filter actually produced the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolMatch {
    /// Rows matched both the tool type and the cost tier.
    Strict(Vec<CatalogueEntry>),
    /// The cost filter yielded nothing, so it was dropped; rows matched the
    /// tool type only. The caller must surface the relaxation.
    Relaxed(Vec<CatalogueEntry>),
    /// No catalogue entry has the selected tool type at all. This dead-end is
    /// not recoverable by relaxing filters; the caller must prompt for a
    /// broader tool-type selection.
    Empty,
}

impl ToolMatch {
    pub fn entries(&self) -> &[CatalogueEntry] {
        match self {
            ToolMatch::Strict(entries) | ToolMatch::Relaxed(entries) => entries,
            ToolMatch::Empty => &[],
        }
    }

    pub fn is_relaxed(&self) -> bool {
        matches!(self, ToolMatch::Relaxed(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ToolMatch::Empty)
    }
}

impl Catalogue {
    /// Match catalogue entries against a tool type and cost tier.
    ///
    /// The tool type is compared exactly, as stored. The cost tier is matched
    /// as a case-insensitive substring of the free-text pricing field, which
    /// tolerates copy variance ("Enterprise (annual)") at the price of the
    /// occasional loose hit ("Enterprise Subscription Plan" contains
    /// "Subscription").
    pub fn match_tools(&self, tool_type: &str, cost_tier: &str) -> ToolMatch {
        let by_type: Vec<&CatalogueEntry> = self
            .entries()
            .iter()
            .filter(|entry| entry.tool_type == tool_type)
            .collect();

        if by_type.is_empty() {
            return ToolMatch::Empty;
        }

        let cost_key = cost_tier.to_lowercase();
        let strict: Vec<CatalogueEntry> = by_type
            .iter()
            .filter(|entry| entry.pricing.to_lowercase().contains(&cost_key))
            .map(|entry| (*entry).clone())
            .collect();

        if strict.is_empty() {
            info!(
                "No {} tools priced as {:?}; relaxing the cost filter",
                tool_type, cost_tier
            );
            ToolMatch::Relaxed(by_type.into_iter().cloned().collect())
        } else {
            ToolMatch::Strict(strict)
        }
    }
}
