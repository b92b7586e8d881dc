use std::collections::HashMap;

use crate::catalogue::CatalogueEntry;

mod recommendation_tests;

/// Score assumed for a matched tool the user has not rated yet.
pub const DEFAULT_SCORE: u8 = 3;
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Fixed rollout advice attached to every recommendation. Constant text, not
/// derived from the winning tool.
pub const ROLLOUT_ADVICE: [&str; 5] = [
    "Check integration options",
    "Start with a pilot/test",
    "Monitor performance and ROI",
    "Ensure data privacy and compliance",
    "Review vendor support and documentation",
];

/// Three-step preference scale used for complexity and scalability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceLevel {
    Low,
    Medium,
    High,
}

impl PreferenceLevel {
    pub const ALL: [PreferenceLevel; 3] = [
        PreferenceLevel::Low,
        PreferenceLevel::Medium,
        PreferenceLevel::High,
    ];
}

impl Default for PreferenceLevel {
    fn default() -> Self {
        PreferenceLevel::Medium
    }
}

impl std::fmt::Display for PreferenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceLevel::Low => write!(f, "Low"),
            PreferenceLevel::Medium => write!(f, "Medium"),
            PreferenceLevel::High => write!(f, "High"),
        }
    }
}

/// Cost structure the user is shopping for. Matched as a substring of the
/// catalogue's free-text pricing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    Free,
    Freemium,
    Subscription,
    Enterprise,
}

impl CostTier {
    pub const ALL: [CostTier; 4] = [
        CostTier::Free,
        CostTier::Freemium,
        CostTier::Subscription,
        CostTier::Enterprise,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostTier::Free => "Free",
            CostTier::Freemium => "Freemium",
            CostTier::Subscription => "Subscription",
            CostTier::Enterprise => "Enterprise",
        }
    }
}

impl Default for CostTier {
    fn default() -> Self {
        CostTier::Freemium
    }
}

impl std::fmt::Display for CostTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User preferences collected before matching. Complexity and scalability are
/// recorded for context only; the cost tier is the one that filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub complexity: PreferenceLevel,
    pub scalability: PreferenceLevel,
    pub cost: CostTier,
}

/// Rough impact hint shown next to a tool type option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactLevel {
    High,
    Medium,
    Unknown,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::High => write!(f, "High"),
            ImpactLevel::Medium => write!(f, "Medium"),
            ImpactLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Impact hint for a tool type. Unrecognized types are Unknown rather than an
/// error so new taxonomy values degrade gracefully.
pub fn impact_for_type(tool_type: &str) -> ImpactLevel {
    match tool_type {
        "LLM Assistant" | "Image Generation AI" | "Creative/Design AI" => ImpactLevel::High,
        "RPA" => ImpactLevel::Medium,
        _ => ImpactLevel::Unknown,
    }
}

/// The ordered, dependent selections of one interaction cycle.
///
/// Each stage depends on all earlier stages, so choosing an earlier stage
/// clears everything after it. The state lives for one session only; scores
/// are never persisted.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub function: Option<String>,
    pub activity: Option<String>,
    pub tool_type: Option<String>,
    pub preferences: Preferences,
    scores: HashMap<String, u8>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a business function, invalidating every later stage.
    pub fn select_function(&mut self, function: &str) {
        if self.function.as_deref() != Some(function) {
            self.function = Some(function.to_string());
            self.activity = None;
            self.tool_type = None;
            self.scores.clear();
        }
    }

    /// Choose an activity, invalidating the tool type and scores.
    pub fn select_activity(&mut self, activity: &str) {
        if self.activity.as_deref() != Some(activity) {
            self.activity = Some(activity.to_string());
            self.tool_type = None;
            self.scores.clear();
        }
    }

    /// Choose a tool type, invalidating the scores.
    pub fn select_tool_type(&mut self, tool_type: &str) {
        if self.tool_type.as_deref() != Some(tool_type) {
            self.tool_type = Some(tool_type.to_string());
            self.scores.clear();
        }
    }

    /// Change the cost tier. The matched tool set changes with it, so scores
    /// are invalidated too.
    pub fn set_cost(&mut self, cost: CostTier) {
        if self.preferences.cost != cost {
            self.preferences.cost = cost;
            self.scores.clear();
        }
    }

    /// Mutable score slot for a tool, created at the default when first seen.
    pub fn score_mut(&mut self, tool: &str) -> &mut u8 {
        self.scores.entry(tool.to_string()).or_insert(DEFAULT_SCORE)
    }

    pub fn score_for(&self, tool: &str) -> u8 {
        self.scores.get(tool).copied().unwrap_or(DEFAULT_SCORE)
    }

    pub fn set_score(&mut self, tool: &str, score: u8) {
        self.scores
            .insert(tool.to_string(), score.clamp(MIN_SCORE, MAX_SCORE));
    }

    pub fn scores(&self) -> &HashMap<String, u8> {
        &self.scores
    }

    pub fn clear_scores(&mut self) {
        self.scores.clear();
    }
}

/// The winning tool and the score that won it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub entry: CatalogueEntry,
    pub score: u8,
}

/// Pick the highest-scored tool from the matched entries.
///
/// Entries are walked in catalogue iteration order and only a strictly
/// greater score displaces the current winner, so ties resolve to the first
/// tool encountered. Tools without a recorded score count as the default.
pub fn recommend(
    matches: &[CatalogueEntry],
    scores: &HashMap<String, u8>,
) -> Option<Recommendation> {
    let mut best: Option<Recommendation> = None;
    for entry in matches {
        let score = scores.get(&entry.tool).copied().unwrap_or(DEFAULT_SCORE);
        let displaces = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if displaces {
            best = Some(Recommendation {
                entry: entry.clone(),
                score,
            });
        }
    }
    best
}
