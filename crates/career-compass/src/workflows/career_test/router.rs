use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{CareerTestSubmission, ResultId, TestId, UserId};
use super::question_bank::QuestionRepository;
use super::repository::{CareerTestResultSummary, RepositoryError, ResultRepository};
use super::service::{CareerTestService, CareerTestServiceError};

/// Router exposing question lookup, submission, and result retrieval.
pub fn career_test_router<Q, R>(service: Arc<CareerTestService<Q, R>>) -> Router
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/career-tests/:test_id/questions",
            get(questions_handler::<Q, R>),
        )
        .route(
            "/api/v1/career-tests/:test_id/submissions",
            post(submit_handler::<Q, R>),
        )
        .route(
            "/api/v1/career-test-results/:result_id",
            get(result_handler::<Q, R>),
        )
        .route(
            "/api/v1/users/:user_id/career-test-results",
            get(history_handler::<Q, R>),
        )
        .route("/api/v1/career-catalog", get(catalog_handler::<Q, R>))
        .with_state(service)
}

pub(crate) async fn questions_handler<Q, R>(
    State(service): State<Arc<CareerTestService<Q, R>>>,
    Path(test_id): Path<u64>,
) -> Response
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.questions(TestId(test_id)) {
        Ok(questions) => (StatusCode::OK, axum::Json(questions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<Q, R>(
    State(service): State<Arc<CareerTestService<Q, R>>>,
    Path(test_id): Path<u64>,
    axum::Json(submission): axum::Json<CareerTestSubmission>,
) -> Response
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.submit(TestId(test_id), submission) {
        Ok(result) => (StatusCode::CREATED, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<Q, R>(
    State(service): State<Arc<CareerTestService<Q, R>>>,
    Path(result_id): Path<String>,
) -> Response
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.get(&ResultId(result_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<Q, R>(
    State(service): State<Arc<CareerTestService<Q, R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.history(&UserId(user_id)) {
        Ok(results) => {
            let summaries: Vec<CareerTestResultSummary> =
                results.iter().map(|result| result.summary_view()).collect();
            (StatusCode::OK, axum::Json(summaries)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler<Q, R>(
    State(service): State<Arc<CareerTestService<Q, R>>>,
) -> Response
where
    Q: QuestionRepository + 'static,
    R: ResultRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog().clone())).into_response()
}

fn error_response(error: CareerTestServiceError) -> Response {
    let status = match &error {
        CareerTestServiceError::UnknownTest(_)
        | CareerTestServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CareerTestServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
