use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerValue, QuestionId, ResultId, TestId, UserId};
use super::engine::CareerTestOutcome;

/// Stored result of one completed test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTestResult {
    pub result_id: ResultId,
    pub user_id: UserId,
    pub test_id: TestId,
    pub answers: BTreeMap<QuestionId, AnswerValue>,
    pub disability_text: Option<String>,
    pub outcome: CareerTestOutcome,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub completion_seconds: i64,
    pub created_at: DateTime<Utc>,
}

impl CareerTestResult {
    pub fn summary_view(&self) -> CareerTestResultSummary {
        CareerTestResultSummary {
            result_id: self.result_id.clone(),
            test_id: self.test_id,
            completed_at: self.completed_at,
            summary: self.outcome.report.summary.clone(),
            top_match: self.outcome.matches.first().map(|entry| entry.title.clone()),
            top_match_percentage: self
                .outcome
                .matches
                .first()
                .map(|entry| entry.match_percentage),
            fallback: self.outcome.fallback,
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait ResultRepository: Send + Sync {
    fn insert(&self, result: CareerTestResult) -> Result<CareerTestResult, RepositoryError>;
    fn fetch(&self, id: &ResultId) -> Result<Option<CareerTestResult>, RepositoryError>;
    /// Results of one user, oldest first.
    fn for_user(&self, user_id: &UserId) -> Result<Vec<CareerTestResult>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing entry for a user's result history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTestResultSummary {
    pub result_id: ResultId,
    pub test_id: TestId,
    pub completed_at: DateTime<Utc>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_match_percentage: Option<u8>,
    pub fallback: bool,
}
