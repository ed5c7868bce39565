use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::career_test::domain::{
    AnswerValue, CareerTestSubmission, Question, QuestionId, ResultId, TestId, UserId,
};
use crate::workflows::career_test::engine::CareerTestEngine;
use crate::workflows::career_test::question_bank::{
    QuestionBank, QuestionBankError, QuestionRepository,
};
use crate::workflows::career_test::repository::{
    CareerTestResult, RepositoryError, ResultRepository,
};
use crate::workflows::career_test::{career_test_router, CareerTestService};

pub(super) fn answers(pairs: &[(u64, AnswerValue)]) -> BTreeMap<QuestionId, AnswerValue> {
    pairs
        .iter()
        .map(|(id, value)| (QuestionId(*id), value.clone()))
        .collect()
}

/// A complete run of the standard test by someone drawn to digital, low-contact work.
pub(super) fn full_answers() -> BTreeMap<QuestionId, AnswerValue> {
    let mut answers = answers(&[
        (1, AnswerValue::Integer(4)),
        (2, AnswerValue::Integer(3)),
        (3, AnswerValue::Integer(1)),
        (4, AnswerValue::Integer(4)),
        (5, AnswerValue::Integer(4)),
        (6, AnswerValue::Integer(0)),
        (7, AnswerValue::Integer(2)),
        (8, AnswerValue::Integer(4)),
        (9, AnswerValue::Integer(4)),
        (10, AnswerValue::Integer(2)),
        (11, AnswerValue::Integer(4)),
        (12, AnswerValue::Integer(3)),
        (13, AnswerValue::Integer(4)),
        (14, AnswerValue::Integer(3)),
        (15, AnswerValue::Integer(3)),
        (16, AnswerValue::Integer(0)),
        (17, AnswerValue::Integer(1)),
        (18, AnswerValue::Integer(4)),
        (19, AnswerValue::Integer(4)),
        (20, AnswerValue::Integer(2)),
        (21, AnswerValue::Integer(4)),
        (22, AnswerValue::Integer(1)),
        (23, AnswerValue::Integer(2)),
        (25, AnswerValue::Integer(0)),
        (26, AnswerValue::Flag(false)),
    ]);
    answers.insert(
        QuestionId(24),
        AnswerValue::List(vec![AnswerValue::Integer(0), AnswerValue::Integer(4)]),
    );
    answers.insert(
        QuestionId(27),
        AnswerValue::Text("Собираю таблицы по личным финансам".to_string()),
    );
    answers
}

pub(super) fn submission(user: &str) -> CareerTestSubmission {
    CareerTestSubmission {
        user_id: UserId(user.to_string()),
        answers: full_answers(),
        disability_text: Some("Передвигаюсь на коляске".to_string()),
        started_at: None,
    }
}

pub(super) fn build_service() -> (
    CareerTestService<QuestionBank, MemoryResults>,
    Arc<MemoryResults>,
) {
    let results = Arc::new(MemoryResults::default());
    let service = CareerTestService::new(
        Arc::new(QuestionBank::standard()),
        results.clone(),
        Arc::new(CareerTestEngine::standard()),
    );
    (service, results)
}

pub(super) fn router_with_service(
    service: CareerTestService<QuestionBank, MemoryResults>,
) -> axum::Router {
    career_test_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryResults {
    pub(super) records: Arc<Mutex<HashMap<ResultId, CareerTestResult>>>,
}

impl MemoryResults {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ResultRepository for MemoryResults {
    fn insert(&self, result: CareerTestResult) -> Result<CareerTestResult, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&result.result_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(result.result_id.clone(), result.clone());
        Ok(result)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<CareerTestResult>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user_id: &UserId) -> Result<Vec<CareerTestResult>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut results: Vec<CareerTestResult> = guard
            .values()
            .filter(|result| &result.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|left, right| left.result_id.cmp(&right.result_id));
        Ok(results)
    }
}

pub(super) struct ConflictResults;

impl ResultRepository for ConflictResults {
    fn insert(&self, _result: CareerTestResult) -> Result<CareerTestResult, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ResultId) -> Result<Option<CareerTestResult>, RepositoryError> {
        Ok(None)
    }

    fn for_user(&self, _user_id: &UserId) -> Result<Vec<CareerTestResult>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableResults;

impl ResultRepository for UnavailableResults {
    fn insert(&self, _result: CareerTestResult) -> Result<CareerTestResult, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ResultId) -> Result<Option<CareerTestResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_user(&self, _user_id: &UserId) -> Result<Vec<CareerTestResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Question source whose lookups always fail.
pub(super) struct OfflineQuestions;

impl QuestionRepository for OfflineQuestions {
    fn find(&self, _id: QuestionId) -> Result<Option<Question>, QuestionBankError> {
        Err(QuestionBankError::Unavailable("question store offline".to_string()))
    }

    fn for_test(&self, _test_id: TestId) -> Result<Vec<Question>, QuestionBankError> {
        Err(QuestionBankError::Unavailable("question store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
