use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{CareerTestSubmission, Question, ResultId, TestId, UserId};
use super::engine::CareerTestEngine;
use super::matching::OccupationCatalog;
use super::question_bank::{QuestionBankError, QuestionRepository, TestQuestions};
use super::repository::{CareerTestResult, RepositoryError, ResultRepository};

/// Service composing the question bank, the engine, and result storage.
pub struct CareerTestService<Q, R> {
    questions: Arc<Q>,
    results: Arc<R>,
    engine: Arc<CareerTestEngine>,
}

static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResultId(format!("res-{id:06}"))
}

impl<Q, R> CareerTestService<Q, R>
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    pub fn new(questions: Arc<Q>, results: Arc<R>, engine: Arc<CareerTestEngine>) -> Self {
        Self {
            questions,
            results,
            engine,
        }
    }

    /// Score a submission and persist exactly one result for it.
    pub fn submit(
        &self,
        test_id: TestId,
        submission: CareerTestSubmission,
    ) -> Result<CareerTestResult, CareerTestServiceError> {
        if self.questions.for_test(test_id)?.is_empty() {
            return Err(CareerTestServiceError::UnknownTest(test_id));
        }

        let outcome = self.engine.evaluate(
            &TestQuestions::new(self.questions.as_ref(), test_id),
            &submission.answers,
            submission.disability_text.as_deref(),
        );

        let completed_at = Utc::now();
        let started_at = submission
            .started_at
            .filter(|started| *started <= completed_at)
            .unwrap_or(completed_at);
        let result = CareerTestResult {
            result_id: next_result_id(),
            user_id: submission.user_id,
            test_id,
            answers: submission.answers,
            disability_text: submission.disability_text,
            outcome,
            started_at,
            completed_at,
            completion_seconds: (completed_at - started_at).num_seconds(),
            created_at: completed_at,
        };

        let stored = self.results.insert(result)?;
        info!(
            result_id = %stored.result_id.0,
            test_id = stored.test_id.0,
            fallback = stored.outcome.fallback,
            matches = stored.outcome.matches.len(),
            "career test result stored"
        );
        Ok(stored)
    }

    pub fn get(&self, result_id: &ResultId) -> Result<CareerTestResult, CareerTestServiceError> {
        let result = self
            .results
            .fetch(result_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(result)
    }

    pub fn history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CareerTestResult>, CareerTestServiceError> {
        Ok(self.results.for_user(user_id)?)
    }

    /// Questions of a test in display order.
    pub fn questions(&self, test_id: TestId) -> Result<Vec<Question>, CareerTestServiceError> {
        let questions = self.questions.for_test(test_id)?;
        if questions.is_empty() {
            return Err(CareerTestServiceError::UnknownTest(test_id));
        }
        Ok(questions)
    }

    pub fn catalog(&self) -> &OccupationCatalog {
        self.engine.catalog()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CareerTestServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error("career test {0} not found")]
    UnknownTest(TestId),
}
