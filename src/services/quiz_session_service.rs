use std::sync::Arc;

use chrono::Utc;

use crate::{
    cache::QuizCache,
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizAttempt, SafeQuestion},
    repositories::{QuizAttemptRepository, QuizRepository},
    services::question_cache_service::{order_ttl, QuestionCacheService},
};

/// Everything the student client needs to render an active attempt.
pub struct QuizSession {
    pub quiz: Quiz,
    pub questions: Vec<SafeQuestion>,
    pub responses: Option<serde_json::Value>,
    pub attempt: QuizAttempt,
}

/// Attempt initializer: first fetch of a quiz creates the attempt exactly
/// once and hands back a stable question view.
pub struct QuizSessionService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    cache: Arc<dyn QuizCache>,
    question_cache: Arc<QuestionCacheService>,
}

impl QuizSessionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        cache: Arc<dyn QuizCache>,
        question_cache: Arc<QuestionCacheService>,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            cache,
            question_cache,
        }
    }

    pub async fn start_session(&self, student_id: &str, quiz_id: &str) -> AppResult<QuizSession> {
        // The four reads are independent; issue them together.
        let (quiz, existing_attempt, cached_questions, cached_order) = tokio::join!(
            self.quizzes.find_by_id(quiz_id),
            self.attempts.find_by_student_and_quiz(student_id, quiz_id),
            self.cache.get_sanitized_questions(quiz_id),
            self.cache.get_shuffled_order(quiz_id, student_id),
        );

        let existing_attempt = existing_attempt?;
        if let Some(attempt) = &existing_attempt {
            if attempt.is_submitted {
                return Err(AppError::AlreadyCompleted);
            }
        }

        let quiz = quiz?.ok_or(AppError::QuizNotFound)?;

        let now = Utc::now();
        if !quiz.is_open_at(now) {
            // No attempt row is created for an out-of-window fetch.
            return Err(AppError::QuizNotAvailable);
        }

        let attempt = match existing_attempt {
            Some(attempt) => attempt,
            None => self.create_or_adopt(student_id, quiz_id, now).await?,
        };

        let responses = self.cache.get_responses(quiz_id, student_id).await?;

        // A cached per-student order wins outright; reloads never reshuffle.
        if let Some(order) = cached_order? {
            return Ok(QuizSession {
                quiz,
                questions: order,
                responses,
                attempt,
            });
        }

        let sanitized = match cached_questions? {
            Some(cached) => cached,
            None => self.question_cache.sanitized_questions(quiz_id).await?,
        };

        let questions = if quiz.settings.shuffle {
            self.question_cache
                .get_or_create_shuffled_order(
                    quiz_id,
                    student_id,
                    quiz.duration_minutes,
                    sanitized,
                )
                .await?
        } else {
            sanitized
        };

        Ok(QuizSession {
            quiz,
            questions,
            responses,
            attempt,
        })
    }

    /// Exactly-once creation. The unique (student_id, quiz_id) index is the
    /// only mutual exclusion: the loser of a concurrent duplicate request
    /// reads back the winner's row instead of erroring.
    async fn create_or_adopt(
        &self,
        student_id: &str,
        quiz_id: &str,
        now: chrono::DateTime<Utc>,
    ) -> AppResult<QuizAttempt> {
        match self
            .attempts
            .create(QuizAttempt::started(student_id, quiz_id, now))
            .await
        {
            Ok(created) => Ok(created),
            Err(AppError::AlreadyExists(_)) => {
                let winner = self
                    .attempts
                    .find_by_student_and_quiz(student_id, quiz_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(
                            "attempt missing after duplicate-key race".to_string(),
                        )
                    })?;
                if winner.is_submitted {
                    return Err(AppError::AlreadyCompleted);
                }
                Ok(winner)
            }
            Err(err) => Err(err),
        }
    }

    /// Thin partial-save path: the blob only ever lives in the cache and is
    /// never consulted for scoring or submission validity.
    pub async fn save_partial(
        &self,
        student_id: &str,
        quiz_id: &str,
        responses: serde_json::Value,
    ) -> AppResult<()> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or(AppError::QuizNotFound)?;

        if !quiz.is_open_at(Utc::now()) {
            return Err(AppError::QuizNotAvailable);
        }

        let attempt = self
            .attempts
            .find_by_student_and_quiz(student_id, quiz_id)
            .await?
            .ok_or(AppError::AttemptNotFound)?;

        if attempt.is_submitted {
            return Err(AppError::AlreadySubmitted);
        }

        self.cache
            .put_responses(
                quiz_id,
                student_id,
                &responses,
                order_ttl(quiz.duration_minutes),
            )
            .await
    }

    pub async fn discard_partial(&self, student_id: &str, quiz_id: &str) -> AppResult<()> {
        self.cache.delete_responses(quiz_id, student_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryQuizCache;
    use crate::repositories::{
        MockQuestionRepository, MockQuizAttemptRepository, MockQuizRepository,
    };
    use crate::test_utils::fixtures::open_quiz;
    use chrono::Duration;

    fn service(
        quizzes: MockQuizRepository,
        attempts: MockQuizAttemptRepository,
    ) -> QuizSessionService {
        let cache: Arc<InMemoryQuizCache> = Arc::new(InMemoryQuizCache::new());
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_by_quiz().returning(|_| Ok(vec![]));
        let questions = Arc::new(questions);
        let question_cache = Arc::new(QuestionCacheService::new(questions, cache.clone()));
        QuizSessionService::new(
            Arc::new(quizzes),
            Arc::new(attempts),
            cache,
            question_cache,
        )
    }

    #[tokio::test]
    async fn unknown_quiz_is_not_found() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(None));
        let mut attempts = MockQuizAttemptRepository::new();
        attempts
            .expect_find_by_student_and_quiz()
            .returning(|_, _| Ok(None));

        let result = service(quizzes, attempts)
            .start_session("student-a", "quiz-1")
            .await;
        assert!(matches!(result, Err(AppError::QuizNotFound)));
    }

    #[tokio::test]
    async fn submitted_attempt_short_circuits_before_window_check() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(Some(open_quiz("quiz-1", false))));
        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_find_by_student_and_quiz().returning(|s, q| {
            let mut attempt = QuizAttempt::started(s, q, Utc::now());
            attempt.is_submitted = true;
            Ok(Some(attempt))
        });

        let result = service(quizzes, attempts)
            .start_session("student-a", "quiz-1")
            .await;
        assert!(matches!(result, Err(AppError::AlreadyCompleted)));
    }

    #[tokio::test]
    async fn out_of_window_fetch_creates_nothing() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| {
            let mut quiz = open_quiz("quiz-1", false);
            quiz.start_time = Utc::now() + Duration::minutes(5);
            quiz.end_time = Utc::now() + Duration::minutes(65);
            Ok(Some(quiz))
        });
        let mut attempts = MockQuizAttemptRepository::new();
        attempts
            .expect_find_by_student_and_quiz()
            .returning(|_, _| Ok(None));
        // No expect_create: a create call would fail the test.

        let result = service(quizzes, attempts)
            .start_session("student-a", "quiz-1")
            .await;
        assert!(matches!(result, Err(AppError::QuizNotAvailable)));
    }

    #[tokio::test]
    async fn duplicate_key_loser_adopts_winner_row() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(Some(open_quiz("quiz-1", false))));

        let winner = QuizAttempt::started("student-a", "quiz-1", Utc::now());
        let winner_for_find = winner.clone();
        let mut attempts = MockQuizAttemptRepository::new();
        let mut first_find = true;
        attempts
            .expect_find_by_student_and_quiz()
            .returning(move |_, _| {
                // First (concurrent) read misses; the post-conflict read
                // sees the winner's row.
                if first_find {
                    first_find = false;
                    Ok(None)
                } else {
                    Ok(Some(winner_for_find.clone()))
                }
            });
        attempts.expect_create().returning(|attempt| {
            Err(AppError::AlreadyExists(format!(
                "Attempt for student '{}' already exists",
                attempt.student_id
            )))
        });

        let session = service(quizzes, attempts)
            .start_session("student-a", "quiz-1")
            .await
            .unwrap();
        assert_eq!(session.attempt.id, winner.id);
        assert_eq!(session.attempt.start_time, winner.start_time);
    }
}
