//! End-to-end scenarios for the career test through the public service facade and router,
//! using question banks and catalogs loaded from their file formats.

mod common {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use career_compass::workflows::career_test::{
        CareerTestEngine, CareerTestResult, CareerTestService, OccupationCatalog, QuestionBank,
        RepositoryError, ResultId, ResultRepository, UserId,
    };

    pub(super) const QUESTIONS_CSV: &str = "\
id,test_id,position,type,category,text,options,polarity
1,5,1,scale,Навыки,Я уверенно работаю с таблицами,,
2,5,2,scale,values,Мне важна стабильная работа,,
3,5,3,scale,Инвалидность и доступность,Я предпочёл бы работать из дома,,need
4,5,4,single_choice,Рабочая среда,Какой формат вам ближе?,Удалённо|В офисе,
5,5,5,text,personality,Расскажите о себе,,
";

    pub(super) const CATALOG_JSON: &str = r#"{
        "version": "workflow-test",
        "occupations": [
            {
                "title": "Оператор ввода данных",
                "description": "Работа с таблицами",
                "requirements": {"skills": 50, "values": 50},
                "remote_work_possible": true,
                "physical_demands": "low",
                "social_interaction": "low",
                "roles": ["Оператор"]
            },
            {
                "title": "Кассир",
                "description": "Обслуживание покупателей",
                "requirements": {"skills": 50, "values": 50},
                "remote_work_possible": false,
                "physical_demands": "medium",
                "social_interaction": "high"
            }
        ]
    }"#;

    #[derive(Default)]
    pub(super) struct MemoryResults {
        records: Mutex<HashMap<ResultId, CareerTestResult>>,
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
            Ok(self
                .records
                .lock()
                .expect("repository mutex poisoned")
                .get(id)
                .cloned())
        }

        fn for_user(&self, user_id: &UserId) -> Result<Vec<CareerTestResult>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            let mut results: Vec<_> = guard
                .values()
                .filter(|result| &result.user_id == user_id)
                .cloned()
                .collect();
            results.sort_by(|left, right| left.result_id.cmp(&right.result_id));
            Ok(results)
        }
    }

    pub(super) fn service() -> CareerTestService<QuestionBank, MemoryResults> {
        let bank = QuestionBank::from_csv_reader(Cursor::new(QUESTIONS_CSV)).expect("bank loads");
        let catalog =
            OccupationCatalog::from_reader(Cursor::new(CATALOG_JSON)).expect("catalog loads");
        CareerTestService::new(
            Arc::new(bank),
            Arc::new(MemoryResults::default()),
            Arc::new(CareerTestEngine::new(Arc::new(catalog), 5)),
        )
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use career_compass::workflows::career_test::{
    career_test_router, AnswerValue, CareerTestSubmission, QuestionId, TestId, UserId,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn submission(
    answers: &[(u64, AnswerValue)],
    disability_text: Option<&str>,
) -> CareerTestSubmission {
    CareerTestSubmission {
        user_id: UserId("workflow-user".to_string()),
        answers: answers
            .iter()
            .map(|(id, value)| (QuestionId(*id), value.clone()))
            .collect(),
        disability_text: disability_text.map(str::to_string),
        started_at: None,
    }
}

#[test]
fn remote_need_reorders_equal_candidates() {
    let service = common::service();

    let without_needs = service
        .submit(
            TestId(5),
            submission(
                &[(1, AnswerValue::Integer(3)), (2, AnswerValue::Integer(3))],
                None,
            ),
        )
        .expect("submission accepted");
    let titles: Vec<&str> = without_needs
        .outcome
        .matches
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Оператор ввода данных", "Кассир"]);
    assert_eq!(
        without_needs.outcome.matches[0].match_percentage,
        without_needs.outcome.matches[1].match_percentage
    );

    let with_needs = service
        .submit(
            TestId(5),
            submission(
                &[
                    (1, AnswerValue::Integer(3)),
                    (2, AnswerValue::Integer(3)),
                    (3, AnswerValue::Integer(4)),
                ],
                Some("пользуюсь коляской"),
            ),
        )
        .expect("submission accepted");
    let top = &with_needs.outcome.matches[0];
    assert_eq!(top.title, "Оператор ввода данных");
    assert!(top.match_percentage > with_needs.outcome.matches[1].match_percentage);
    assert_eq!(with_needs.outcome.matches[1].penalties().count(), 2);
    assert!(with_needs.outcome.health.needs_remote_work);

    let history = service
        .history(&UserId("workflow-user".to_string()))
        .expect("history");
    assert_eq!(history.len(), 2);
}

#[test]
fn choice_and_text_answers_reach_the_transcript_only() {
    let service = common::service();

    let result = service
        .submit(
            TestId(5),
            submission(
                &[
                    (4, AnswerValue::Integer(0)),
                    (5, AnswerValue::Text("Люблю порядок".to_string())),
                ],
                None,
            ),
        )
        .expect("submission accepted");

    let transcript = &result.outcome.transcript;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].answer, "Удалённо");
    assert_eq!(transcript[0].score, None);
    assert_eq!(transcript[1].answer, "Люблю порядок");
    assert!(result
        .outcome
        .category_stats
        .values()
        .all(|stat| !stat.has_data()));
}

#[tokio::test]
async fn http_submission_round_trip() {
    let router = career_test_router(Arc::new(common::service()));

    let body = json!({
        "user_id": "http-user",
        "answers": {"1": 4, "2": "2", "999": 4},
        "disability_text": null
    });
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/career-tests/5/submissions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = serde_json::from_slice(
        &axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(created["outcome"]["transcript"].as_array().unwrap().len(), 2);
    assert_eq!(created["outcome"]["category_stats"]["skills"]["percentage"], 100);

    let result_id = created["result_id"].as_str().unwrap();
    let fetched = router
        .oneshot(
            Request::get(format!("/api/v1/career-test-results/{result_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
}
