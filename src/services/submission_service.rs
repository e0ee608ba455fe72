use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::{
    cache::QuizCache,
    errors::{AppError, AppResult},
    models::domain::QuizAttempt,
    repositories::{QuizAttemptRepository, QuizRepository},
};

/// Submission finalizer: transitions an attempt to its terminal submitted
/// state. The whole store interaction races an overall timer; the store's
/// own connection timeouts are shorter, so a stuck call aborts there first
/// and the timer only converts the wait into a client-visible 504.
pub struct SubmissionService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    cache: Arc<dyn QuizCache>,
    timeout: Duration,
}

impl SubmissionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        cache: Arc<dyn QuizCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            cache,
            timeout,
        }
    }

    pub async fn submit(
        &self,
        student_id: &str,
        quiz_id: &str,
        responses: serde_json::Value,
        violations: String,
        ip: String,
    ) -> AppResult<QuizAttempt> {
        match tokio::time::timeout(
            self.timeout,
            self.finalize(student_id, quiz_id, responses, violations, ip),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "submission by student {} for quiz {} exceeded {:?}",
                    student_id,
                    quiz_id,
                    self.timeout
                );
                Err(AppError::Timeout)
            }
        }
    }

    async fn finalize(
        &self,
        student_id: &str,
        quiz_id: &str,
        responses: serde_json::Value,
        violations: String,
        ip: String,
    ) -> AppResult<QuizAttempt> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        // Both bounds enforced, matching the initializer's window check.
        // A submission at exactly end_time is accepted.
        let now = Utc::now();
        if !quiz.is_open_at(now) {
            return Err(AppError::SubmissionWindowClosed);
        }

        match self
            .attempts
            .submit(student_id, quiz_id, responses, violations, ip, now)
            .await?
        {
            Some(updated) => {
                // Partial blob is now stale; dropping it is best effort.
                if let Err(err) = self.cache.delete_responses(quiz_id, student_id).await {
                    log::warn!(
                        "failed to drop partial responses for quiz {}: {}",
                        quiz_id,
                        err
                    );
                }
                Ok(updated)
            }
            // The conditional update matched nothing: tell absent apart
            // from already submitted.
            None => match self
                .attempts
                .find_by_student_and_quiz(student_id, quiz_id)
                .await?
            {
                None => Err(AppError::AttemptNotFound),
                Some(attempt) if attempt.is_submitted => Err(AppError::AlreadySubmitted),
                Some(_) => Err(AppError::InternalError(
                    "live attempt did not match conditional submit".to_string(),
                )),
            },
        }
    }
}
