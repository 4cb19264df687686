//! # Assessment Report
//!
//! Decorates a stored dimension with what the reference data and the
//! classifier say about it. Pure; nothing here touches the store.

use crate::classifier::classify;
use crate::reference::{level_definition, recommendation_for};
use crate::{Dimension, GapLevel, MaturityLevelDefinition, Recommendation};
use serde::Serialize;

/// A dimension as presented to a reader.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionReport<'a> {
    /// The stored record.
    pub dimension: &'a Dimension,
    /// Gap computed from the stored states.
    pub computed_gap: GapLevel,
    /// Whether the stored gap equals the computed one.
    pub gap_consistent: bool,
    /// Definition of the current level, if the dimension has reference data.
    pub current_level: Option<&'static MaturityLevelDefinition>,
    /// Definition of the desired level, if the dimension has reference data.
    pub desired_level: Option<&'static MaturityLevelDefinition>,
    /// Recommendation for the computed gap.
    pub recommendation: Option<&'static Recommendation>,
}

impl<'a> DimensionReport<'a> {
    /// Assess a stored dimension.
    #[must_use]
    pub fn assess(dimension: &'a Dimension) -> Self {
        let computed_gap = classify(dimension.current_state(), dimension.desired_state());
        Self {
            dimension,
            computed_gap,
            gap_consistent: computed_gap == dimension.gap(),
            current_level: level_definition(dimension.name(), dimension.current_state()),
            desired_level: level_definition(dimension.name(), dimension.desired_state()),
            recommendation: recommendation_for(dimension.name(), computed_gap),
        }
    }

    /// Number of customized actions.
    #[must_use]
    pub fn actions_count(&self) -> usize {
        self.dimension.customized_actions().len()
    }

    /// `"No actions"`, `"1 action"` or `"N actions"`.
    #[must_use]
    pub fn actions_summary(&self) -> String {
        match self.actions_count() {
            0 => "No actions".to_string(),
            1 => "1 action".to_string(),
            n => format!("{} actions", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed_analysis;
    use crate::{Action, Priority};

    #[test]
    fn seed_gaps_are_reported_as_stale() {
        let seed = seed_analysis();
        let reports: Vec<_> = seed.iter().map(DimensionReport::assess).collect();

        assert_eq!(reports[0].computed_gap, GapLevel::Medium);
        assert_eq!(reports[1].computed_gap, GapLevel::Low);
        assert_eq!(reports[2].computed_gap, GapLevel::Low);
        assert!(reports.iter().all(|r| !r.gap_consistent));
    }

    #[test]
    fn report_resolves_levels_and_recommendation() {
        let dimension = Dimension::with_states("Technology", 1, 5);
        let report = DimensionReport::assess(&dimension);

        assert_eq!(report.current_level.map(|l| l.name), Some("Legacy Systems"));
        assert_eq!(
            report.desired_level.map(|l| l.name),
            Some("Highly Scalable & Integrated")
        );
        let recommendation = report.recommendation.expect("known dimension");
        assert_eq!(recommendation.priority, Priority::Urgent);
    }

    #[test]
    fn unknown_dimension_has_no_reference() {
        let dimension = Dimension::with_states("Data", 1, 2);
        let report = DimensionReport::assess(&dimension);
        assert!(report.current_level.is_none());
        assert!(report.recommendation.is_none());
        assert!(report.gap_consistent);
    }

    #[test]
    fn actions_summary_wording() {
        let mut dimension = Dimension::new("Skills");
        assert_eq!(DimensionReport::assess(&dimension).actions_summary(), "No actions");

        dimension = dimension.with_actions(vec![Action::new("a", Priority::Urgent)]);
        assert_eq!(DimensionReport::assess(&dimension).actions_summary(), "1 action");

        dimension = dimension.with_actions(vec![
            Action::new("a", Priority::Urgent),
            Action::new("b", Priority::Urgent),
        ]);
        assert_eq!(DimensionReport::assess(&dimension).actions_summary(), "2 actions");
    }
}
