pub mod catalog;
mod rules;

pub use catalog::{
    CatalogError, Consideration, ConsiderationTrigger, DemandLevel, OccupationCandidate,
    OccupationCatalog,
};

use super::aggregation::CategoryStats;
use super::domain::Category;
use super::engine::EngineError;
use super::health::HealthAnalysis;
use crate::config::DEFAULT_MAX_MATCHES;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Score change applied to a base match, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAdjustment {
    pub delta: i16,
    pub note: String,
}

impl MatchAdjustment {
    pub(crate) fn new(delta: i16, note: impl Into<String>) -> Self {
        Self {
            delta,
            note: note.into(),
        }
    }
}

/// User percentage compared with one requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub category: Category,
    pub label: String,
    pub required: u8,
    pub actual: u8,
    pub match_percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub title: String,
    pub description: String,
    pub match_percentage: u8,
    pub base_percentage: u8,
    pub adjustments: Vec<MatchAdjustment>,
    pub category_details: Vec<CategoryComparison>,
    pub reasoning: String,
    pub remote_work_possible: bool,
    pub physical_demands: DemandLevel,
    pub social_interaction: DemandLevel,
    pub roles: Vec<String>,
}

impl CareerMatch {
    pub fn penalties(&self) -> impl Iterator<Item = &MatchAdjustment> {
        self.adjustments.iter().filter(|adjustment| adjustment.delta < 0)
    }
}

/// Ranks catalog occupations against a category profile.
pub struct CareerMatcher {
    catalog: Arc<OccupationCatalog>,
    max_matches: usize,
}

impl CareerMatcher {
    pub fn new(catalog: Arc<OccupationCatalog>, max_matches: usize) -> Self {
        Self {
            catalog,
            max_matches: max_matches.max(1),
        }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(OccupationCatalog::standard()), DEFAULT_MAX_MATCHES)
    }

    pub fn catalog(&self) -> &OccupationCatalog {
        &self.catalog
    }

    /// Highest matches first; equal percentages keep catalog order.
    pub fn rank(
        &self,
        stats: &CategoryStats,
        health: &HealthAnalysis,
    ) -> Result<Vec<CareerMatch>, EngineError> {
        let mut matches = self
            .catalog
            .occupations
            .iter()
            .map(|occupation| score_occupation(occupation, stats, health))
            .collect::<Result<Vec<_>, _>>()?;

        matches.sort_by(|left, right| right.match_percentage.cmp(&left.match_percentage));
        matches.truncate(self.max_matches);
        Ok(matches)
    }
}

/// Scores one occupation. Categories missing from `stats` count as 0%.
pub fn score_occupation(
    occupation: &OccupationCandidate,
    stats: &CategoryStats,
    health: &HealthAnalysis,
) -> Result<CareerMatch, EngineError> {
    occupation
        .validate()
        .map_err(|reason| EngineError::InvalidRequirement {
            title: occupation.title.clone(),
            reason,
        })?;

    let category_details: Vec<CategoryComparison> = occupation
        .requirements
        .iter()
        .map(|(category, required)| {
            let actual = stats
                .get(category)
                .map(|stat| stat.percentage)
                .unwrap_or(0);
            let match_percentage = (actual as f32 / *required as f32 * 100.0).min(100.0);
            CategoryComparison {
                category: *category,
                label: category.label().to_string(),
                required: *required,
                actual,
                match_percentage,
            }
        })
        .collect();

    let base = category_details
        .iter()
        .map(|detail| detail.match_percentage)
        .sum::<f32>()
        / category_details.len() as f32;

    let adjustments = rules::accessibility_adjustments(occupation, health);
    let delta: i16 = adjustments.iter().map(|adjustment| adjustment.delta).sum();
    let match_percentage = (base + delta as f32).clamp(0.0, 100.0).round() as u8;
    let base_percentage = base.clamp(0.0, 100.0).round() as u8;

    let reasoning = reasoning(&category_details, &adjustments, match_percentage);

    Ok(CareerMatch {
        title: occupation.title.clone(),
        description: occupation.description.clone(),
        match_percentage,
        base_percentage,
        adjustments,
        category_details,
        reasoning,
        remote_work_possible: occupation.remote_work_possible,
        physical_demands: occupation.physical_demands,
        social_interaction: occupation.social_interaction,
        roles: occupation.roles.clone(),
    })
}

fn reasoning(
    details: &[CategoryComparison],
    adjustments: &[MatchAdjustment],
    match_percentage: u8,
) -> String {
    let comparisons = details
        .iter()
        .map(|detail| {
            format!(
                "{} {}% при требуемых {}%",
                detail.label, detail.actual, detail.required
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let mut reasoning = format!("Совпадение {match_percentage}%: {comparisons}.");
    if !adjustments.is_empty() {
        let notes = adjustments
            .iter()
            .map(|adjustment| match adjustment.delta {
                0 => adjustment.note.clone(),
                delta => format!("{} ({:+})", adjustment.note, delta),
            })
            .collect::<Vec<_>>()
            .join("; ");
        reasoning.push_str(&format!(" С учётом доступности: {notes}."));
    }
    reasoning
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::career_test::report::fixtures::stats as stats_with;

    fn occupation(title: &str, requirements: &[(Category, u8)]) -> OccupationCandidate {
        OccupationCandidate {
            title: title.to_string(),
            description: String::new(),
            requirements: requirements.iter().copied().collect(),
            remote_work_possible: true,
            physical_demands: DemandLevel::Low,
            social_interaction: DemandLevel::Low,
            roles: Vec::new(),
            considerations: Vec::new(),
        }
    }

    #[test]
    fn full_coverage_of_single_requirement_scores_100() {
        let stats = stats_with(&[(Category::Skills, 100)]);
        let result = score_occupation(
            &occupation("Тест", &[(Category::Skills, 50)]),
            &stats,
            &HealthAnalysis::default(),
        )
        .expect("scores");

        assert_eq!(result.category_details[0].match_percentage, 100.0);
        assert_eq!(result.base_percentage, 100);
        assert_eq!(result.match_percentage, 100);
    }

    #[test]
    fn missing_categories_count_against_the_candidate() {
        let stats = stats_with(&[(Category::Skills, 60)]);
        let result = score_occupation(
            &occupation("Тест", &[(Category::Skills, 60), (Category::Values, 60)]),
            &stats,
            &HealthAnalysis::default(),
        )
        .expect("scores");

        assert_eq!(result.base_percentage, 50);
        assert_eq!(result.category_details.len(), 2);
    }

    #[test]
    fn adjustments_are_clamped_to_bounds() {
        let stats = stats_with(&[(Category::Skills, 100)]);
        let health = HealthAnalysis {
            needs_remote_work: true,
            needs_low_physical: true,
            needs_low_social: true,
            ..HealthAnalysis::default()
        };
        let high = score_occupation(&occupation("Тест", &[(Category::Skills, 50)]), &stats, &health)
            .expect("scores");
        assert_eq!(high.match_percentage, 100);

        let mut onsite = occupation("Очно", &[(Category::Values, 50)]);
        onsite.remote_work_possible = false;
        onsite.physical_demands = DemandLevel::High;
        onsite.social_interaction = DemandLevel::High;
        let low = score_occupation(&onsite, &stats, &health).expect("scores");
        assert_eq!(low.match_percentage, 0);
        assert_eq!(low.penalties().count(), 3);
    }

    #[test]
    fn ranking_is_sorted_truncated_and_ties_keep_catalog_order() {
        let catalog = OccupationCatalog {
            version: "test".to_string(),
            occupations: vec![
                occupation("Первый", &[(Category::Skills, 50)]),
                occupation("Слабый", &[(Category::Values, 100)]),
                occupation("Второй", &[(Category::Skills, 40)]),
                occupation("Третий", &[(Category::Skills, 80)]),
            ],
        };
        let matcher = CareerMatcher::new(Arc::new(catalog), 3);
        let stats = stats_with(&[(Category::Skills, 60), (Category::Values, 10)]);

        let ranked = matcher
            .rank(&stats, &HealthAnalysis::default())
            .expect("ranks");

        let titles: Vec<&str> = ranked.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["Первый", "Второй", "Третий"]);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].match_percentage >= pair[1].match_percentage));
    }

    #[test]
    fn invalid_requirement_is_reported() {
        let stats = stats_with(&[]);
        let error = score_occupation(
            &occupation("Сломанный", &[(Category::Skills, 0)]),
            &stats,
            &HealthAnalysis::default(),
        )
        .expect_err("zero requirement");
        assert!(matches!(error, EngineError::InvalidRequirement { .. }));
    }

    #[test]
    fn standard_ranking_returns_at_most_five() {
        let stats = stats_with(&[
            (Category::Interests, 70),
            (Category::Skills, 80),
            (Category::Values, 50),
        ]);
        let ranked = CareerMatcher::standard()
            .rank(&stats, &HealthAnalysis::default())
            .expect("ranks");
        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|entry| entry.match_percentage <= 100));
    }
}
