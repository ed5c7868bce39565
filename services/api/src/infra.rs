use career_compass::config::CareerTestConfig;
use career_compass::error::AppError;
use career_compass::workflows::career_test::{
    CareerTestEngine, CareerTestResult, OccupationCatalog, QuestionBank, RepositoryError,
    ResultId, ResultRepository, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<HashMap<ResultId, CareerTestResult>>>,
}

impl ResultRepository for InMemoryResultRepository {
    fn insert(&self, result: CareerTestResult) -> Result<CareerTestResult, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("result store poisoned".to_string()))?;
        if guard.contains_key(&result.result_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(result.result_id.clone(), result.clone());
        Ok(result)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<CareerTestResult>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("result store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user_id: &UserId) -> Result<Vec<CareerTestResult>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("result store poisoned".to_string()))?;
        let mut results: Vec<CareerTestResult> = guard
            .values()
            .filter(|result| &result.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|left, right| {
            (left.created_at, &left.result_id).cmp(&(right.created_at, &right.result_id))
        });
        Ok(results)
    }
}

/// Question bank from `path`, or the built-in test when unset.
pub(crate) fn load_question_bank(path: Option<&Path>) -> Result<QuestionBank, AppError> {
    match path {
        Some(path) => {
            let bank = QuestionBank::from_path(path)?;
            info!(path = %path.display(), questions = bank.len(), "question bank loaded");
            Ok(bank)
        }
        None => Ok(QuestionBank::standard()),
    }
}

/// Engine backed by the catalog at `path`, or the built-in catalog when unset.
pub(crate) fn load_engine(
    path: Option<&Path>,
    max_matches: usize,
) -> Result<CareerTestEngine, AppError> {
    let catalog = match path {
        Some(path) => {
            let catalog = OccupationCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                version = %catalog.version,
                occupations = catalog.occupations.len(),
                "occupation catalog loaded"
            );
            catalog
        }
        None => OccupationCatalog::standard(),
    };
    Ok(CareerTestEngine::new(Arc::new(catalog), max_matches))
}

pub(crate) fn load_from_config(
    config: &CareerTestConfig,
) -> Result<(QuestionBank, CareerTestEngine), AppError> {
    let bank = load_question_bank(config.question_bank_path.as_deref())?;
    let engine = load_engine(config.catalog_path.as_deref(), config.max_matches)?;
    Ok((bank, engine))
}
