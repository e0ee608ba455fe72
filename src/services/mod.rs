pub mod question_cache_service;
pub mod quiz_session_service;
pub mod submission_service;

pub use question_cache_service::QuestionCacheService;
pub use quiz_session_service::{QuizSession, QuizSessionService};
pub use submission_service::SubmissionService;
