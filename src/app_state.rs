use std::sync::Arc;
use std::time::Duration;

use crate::{
    cache::InMemoryQuizCache,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestionRepository, MongoQuizAttemptRepository, MongoQuizRepository},
    services::{QuestionCacheService, QuizSessionService, SubmissionService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_session_service: Arc<QuizSessionService>,
    pub submission_service: Arc<SubmissionService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let cache = Arc::new(InMemoryQuizCache::new());

        let question_cache = Arc::new(QuestionCacheService::new(
            question_repository,
            cache.clone(),
        ));
        let quiz_session_service = Arc::new(QuizSessionService::new(
            quiz_repository.clone(),
            attempt_repository.clone(),
            cache.clone(),
            question_cache,
        ));
        let submission_service = Arc::new(SubmissionService::new(
            quiz_repository,
            attempt_repository,
            cache,
            Duration::from_secs(config.submit_timeout_secs),
        ));

        Ok(Self {
            quiz_session_service,
            submission_service,
            db,
            config: Arc::new(config),
        })
    }
}
