#[cfg(test)]
mod recommendation_scoring_tests {
    use std::collections::HashMap;

    use crate::advisor::{DEFAULT_SCORE, ROLLOUT_ADVICE, recommend};
    use crate::catalogue::Catalogue;

    #[test]
    fn test_highest_score_wins() {
        let catalogue = Catalogue::builtin();
        let matches = catalogue.entries().to_vec();

        let mut scores = HashMap::new();
        scores.insert("UiPath".to_string(), 5);
        scores.insert("ChatGPT".to_string(), 2);

        let recommendation = recommend(&matches, &scores).unwrap();
        assert_eq!(recommendation.entry.tool, "UiPath");
        assert_eq!(recommendation.score, 5);
    }

    #[test]
    fn test_ties_resolve_to_catalogue_iteration_order() {
        let catalogue = Catalogue::builtin();
        // ChatGPT comes before MidJourney in catalogue order
        let matches: Vec<_> = catalogue
            .entries()
            .iter()
            .filter(|e| e.tool == "ChatGPT" || e.tool == "MidJourney")
            .cloned()
            .collect();

        let mut scores = HashMap::new();
        scores.insert("ChatGPT".to_string(), 4);
        scores.insert("MidJourney".to_string(), 4);

        let recommendation = recommend(&matches, &scores).unwrap();
        assert_eq!(recommendation.entry.tool, "ChatGPT");
    }

    #[test]
    fn test_unscored_tools_count_as_the_default() {
        let catalogue = Catalogue::builtin();
        let matches = catalogue.entries().to_vec();

        // Only MidJourney is rated, above the default; it must win
        let mut scores = HashMap::new();
        scores.insert("MidJourney".to_string(), DEFAULT_SCORE + 1);

        let recommendation = recommend(&matches, &scores).unwrap();
        assert_eq!(recommendation.entry.tool, "MidJourney");

        // With no ratings at all, everything is the default and the first
        // catalogue entry wins
        let recommendation = recommend(&matches, &HashMap::new()).unwrap();
        assert_eq!(recommendation.entry.tool, "ChatGPT");
        assert_eq!(recommendation.score, DEFAULT_SCORE);
    }

    #[test]
    fn test_no_matches_means_no_recommendation() {
        assert!(recommend(&[], &HashMap::new()).is_none());
    }

    #[test]
    fn test_recommendation_is_stable_across_calls() {
        let catalogue = Catalogue::builtin();
        let matches = catalogue.entries().to_vec();
        let scores = HashMap::new();

        let first = recommend(&matches, &scores);
        let second = recommend(&matches, &scores);
        let third = recommend(&matches, &scores);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_rollout_advice_is_fixed() {
        assert_eq!(ROLLOUT_ADVICE.len(), 5);
        assert!(ROLLOUT_ADVICE[0].contains("integration"));
        assert!(ROLLOUT_ADVICE[1].contains("pilot"));
    }
}
