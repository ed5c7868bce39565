use super::common::*;
use crate::workflows::career_test::domain::{AnswerValue, Category, ResultId, TestId, UserId};
use crate::workflows::career_test::engine::CareerTestEngine;
use crate::workflows::career_test::question_bank::{QuestionBank, STANDARD_TEST_ID};
use crate::workflows::career_test::repository::{RepositoryError, ResultRepository};
use crate::workflows::career_test::{CareerTestService, CareerTestServiceError};
use chrono::{Duration, Utc};
use std::sync::Arc;

#[test]
fn submit_persists_exactly_one_result() {
    let (service, results) = build_service();

    let stored = service
        .submit(STANDARD_TEST_ID, submission("user-1"))
        .expect("submission accepted");

    assert_eq!(results.len(), 1);
    assert!(stored.result_id.0.starts_with("res-"));
    assert_eq!(stored.test_id, STANDARD_TEST_ID);
    assert!(!stored.outcome.fallback);
    assert!(stored.outcome.health.needs_remote_work);
    assert_eq!(stored.completed_at, stored.created_at);

    let fetched = results
        .fetch(&stored.result_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(fetched, stored);
}

#[test]
fn completion_time_is_measured_from_start() {
    let (service, _) = build_service();
    let mut submission = submission("user-2");
    submission.started_at = Some(Utc::now() - Duration::minutes(12));

    let stored = service
        .submit(STANDARD_TEST_ID, submission)
        .expect("submission accepted");

    assert!(stored.completion_seconds >= 12 * 60);
    assert!(stored.started_at < stored.completed_at);
}

#[test]
fn start_time_in_the_future_is_ignored() {
    let (service, _) = build_service();
    let mut submission = submission("user-3");
    submission.started_at = Some(Utc::now() + Duration::hours(1));

    let stored = service
        .submit(STANDARD_TEST_ID, submission)
        .expect("submission accepted");

    assert_eq!(stored.completion_seconds, 0);
    assert_eq!(stored.started_at, stored.completed_at);
}

#[test]
fn malformed_answers_store_the_fallback_report() {
    let (service, results) = build_service();
    let mut submission = submission("user-4");
    submission.answers.insert(
        crate::workflows::career_test::domain::QuestionId(1),
        crate::workflows::career_test::domain::AnswerValue::Integer(9),
    );

    let stored = service
        .submit(STANDARD_TEST_ID, submission)
        .expect("submission still accepted");

    assert!(stored.outcome.fallback);
    assert_eq!(results.len(), 1);
}

#[test]
fn submit_rejects_unknown_test() {
    let (service, results) = build_service();

    match service.submit(TestId(42), submission("user-5")) {
        Err(CareerTestServiceError::UnknownTest(TestId(42))) => {}
        other => panic!("expected unknown test, got {other:?}"),
    }
    assert_eq!(results.len(), 0);
}

#[test]
fn submit_propagates_repository_errors() {
    let service = CareerTestService::new(
        Arc::new(QuestionBank::standard()),
        Arc::new(UnavailableResults),
        Arc::new(CareerTestEngine::standard()),
    );

    match service.submit(STANDARD_TEST_ID, submission("user-6")) {
        Err(CareerTestServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn submit_propagates_question_bank_errors() {
    let service = CareerTestService::new(
        Arc::new(OfflineQuestions),
        Arc::new(MemoryResults::default()),
        Arc::new(CareerTestEngine::standard()),
    );

    assert!(matches!(
        service.submit(STANDARD_TEST_ID, submission("user-7")),
        Err(CareerTestServiceError::QuestionBank(_))
    ));
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    assert!(matches!(
        service.get(&ResultId("res-missing".to_string())),
        Err(CareerTestServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn history_lists_only_the_users_results() {
    let (service, _) = build_service();
    let first = service
        .submit(STANDARD_TEST_ID, submission("user-8"))
        .expect("first");
    let second = service
        .submit(STANDARD_TEST_ID, submission("user-8"))
        .expect("second");
    service
        .submit(STANDARD_TEST_ID, submission("someone-else"))
        .expect("other user");

    let history = service
        .history(&UserId("user-8".to_string()))
        .expect("history");

    let ids: Vec<&ResultId> = history.iter().map(|result| &result.result_id).collect();
    assert_eq!(ids, vec![&first.result_id, &second.result_id]);
}

#[test]
fn questions_come_back_in_display_order() {
    let (service, _) = build_service();

    let questions = service.questions(STANDARD_TEST_ID).expect("questions");

    assert_eq!(questions.len(), QuestionBank::standard().len());
    assert!(questions
        .windows(2)
        .all(|pair| pair[0].position < pair[1].position));
    assert!(matches!(
        service.questions(TestId(7)),
        Err(CareerTestServiceError::UnknownTest(_))
    ));
}

#[test]
fn answers_for_another_test_are_not_scored() {
    let csv = "id,test_id,position,type,category,text,options,polarity\n\
1,1,1,scale,Навыки,Вопрос первого теста,,\n\
2,2,1,scale,Навыки,Вопрос второго теста,,\n";
    let bank = QuestionBank::from_csv_reader(std::io::Cursor::new(csv)).expect("bank loads");
    let results = Arc::new(MemoryResults::default());
    let service = CareerTestService::new(
        Arc::new(bank),
        results.clone(),
        Arc::new(CareerTestEngine::standard()),
    );
    let mut submission = submission("user-9");
    submission.answers = answers(&[(1, AnswerValue::Integer(4))]);

    let stored = service
        .submit(TestId(2), submission)
        .expect("submission accepted");

    assert_eq!(stored.test_id, TestId(2));
    assert!(stored.outcome.transcript.is_empty());
    assert!(!stored.outcome.category_stats[&Category::Skills].has_data());
    assert_eq!(results.len(), 1);
}
