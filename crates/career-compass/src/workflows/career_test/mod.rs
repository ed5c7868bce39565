//! Career test scoring: answer normalization, category aggregation, accessibility
//! analysis, occupation matching, and the narrative report.
//!
//! [`CareerTestEngine`] is the pure pipeline; [`CareerTestService`] wraps it with question
//! lookup and result storage, and [`career_test_router`] exposes the service over HTTP.

pub mod aggregation;
pub mod domain;
pub mod engine;
pub mod health;
pub mod matching;
pub mod normalizer;
pub mod question_bank;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregation::{CategoryStat, CategoryStats, ScoreLevel};
pub use domain::{
    AnswerPolarity, AnswerValue, CareerTestSubmission, Category, Question, QuestionId,
    QuestionType, ResultId, TestId, UserId,
};
pub use engine::{CareerTestEngine, CareerTestOutcome, EngineError};
pub use health::{ConcernGroup, HealthAnalysis};
pub use matching::{CareerMatch, CareerMatcher, MatchAdjustment, OccupationCatalog};
pub use question_bank::{
    QuestionBank, QuestionBankError, QuestionRepository, TestQuestions, STANDARD_TEST_ID,
};
pub use report::CareerReport;
pub use repository::{
    CareerTestResult, CareerTestResultSummary, RepositoryError, ResultRepository,
};
pub use router::career_test_router;
pub use service::{CareerTestService, CareerTestServiceError};
