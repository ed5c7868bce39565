use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::aggregation::{aggregate, CategoryStats};
use super::domain::{AnswerValue, Category, QuestionId};
use super::health::{analyze_health, HealthAnalysis};
use super::matching::{CareerMatch, CareerMatcher, OccupationCatalog};
use super::normalizer::{normalize, TranscriptItem};
use super::question_bank::{QuestionBankError, QuestionRepository};
use super::report::{compose, CareerReport, NarrativeContext};

/// Failures inside one engine run. Callers of [`CareerTestEngine::evaluate`] never see these.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("question lookup failed: {0}")]
    QuestionLookup(#[from] QuestionBankError),
    #[error("question {question_id} has invalid scale value {value:?}")]
    InvalidScaleValue {
        question_id: QuestionId,
        value: String,
    },
    #[error("occupation {title:?} has invalid requirements: {reason}")]
    InvalidRequirement { title: String, reason: String },
}

/// Report plus the structures it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTestOutcome {
    pub report: CareerReport,
    pub transcript: Vec<TranscriptItem>,
    pub category_stats: CategoryStats,
    pub health: HealthAnalysis,
    pub matches: Vec<CareerMatch>,
    #[serde(default)]
    pub fallback: bool,
}

impl CareerTestOutcome {
    pub fn fallback() -> Self {
        Self {
            report: CareerReport::fallback(),
            transcript: Vec::new(),
            category_stats: CategoryStats::new(),
            health: HealthAnalysis::default(),
            matches: Vec::new(),
            fallback: true,
        }
    }
}

/// Runs normalization, aggregation, health analysis, matching and narration in order.
pub struct CareerTestEngine {
    matcher: CareerMatcher,
}

impl CareerTestEngine {
    pub fn new(catalog: Arc<OccupationCatalog>, max_matches: usize) -> Self {
        Self {
            matcher: CareerMatcher::new(catalog, max_matches),
        }
    }

    pub fn standard() -> Self {
        Self {
            matcher: CareerMatcher::standard(),
        }
    }

    pub fn catalog(&self) -> &OccupationCatalog {
        self.matcher.catalog()
    }

    /// Always produces an outcome; internal failures are logged and replaced by the
    /// static fallback report.
    pub fn evaluate<Q>(
        &self,
        questions: &Q,
        answers: &BTreeMap<QuestionId, AnswerValue>,
        disability_text: Option<&str>,
    ) -> CareerTestOutcome
    where
        Q: QuestionRepository + ?Sized,
    {
        match self.try_evaluate(questions, answers, disability_text) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    error = %err,
                    answers = answers.len(),
                    "career test evaluation failed; returning fallback report"
                );
                CareerTestOutcome::fallback()
            }
        }
    }

    pub fn try_evaluate<Q>(
        &self,
        questions: &Q,
        answers: &BTreeMap<QuestionId, AnswerValue>,
        disability_text: Option<&str>,
    ) -> Result<CareerTestOutcome, EngineError>
    where
        Q: QuestionRepository + ?Sized,
    {
        let normalized = normalize(questions, answers)?;
        let category_stats = aggregate(&normalized.scored);
        let health = analyze_health(
            disability_text,
            category_stats.get(&Category::DisabilityAccessibility),
        );
        let matches = self.matcher.rank(&category_stats, &health)?;

        let report = compose(&NarrativeContext {
            stats: &category_stats,
            health: &health,
            transcript: &normalized.transcript,
            matches: &matches,
        });

        debug!(
            transcript = normalized.transcript.len(),
            matches = matches.len(),
            "career test evaluated"
        );

        Ok(CareerTestOutcome {
            report,
            transcript: normalized.transcript,
            category_stats,
            health,
            matches,
            fallback: false,
        })
    }
}

impl Default for CareerTestEngine {
    fn default() -> Self {
        Self::standard()
    }
}
