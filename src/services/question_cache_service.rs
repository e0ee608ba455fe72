use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::{
    cache::QuizCache,
    errors::AppResult,
    models::domain::{Question, SafeQuestion},
    repositories::QuestionRepository,
};

/// Sanitized question sets change only on staff edit, so they outlive any
/// single quiz window.
pub const SANITIZED_QUESTIONS_TTL: Duration = Duration::from_secs(5 * 60 * 60);

/// A per-student order must survive reloads for as long as the student can
/// plausibly still be working.
pub fn order_ttl(duration_minutes: i64) -> Duration {
    Duration::from_secs(duration_minutes.max(1) as u64 * 60 * 2)
}

/// Derived-cache component: keeps the question collection off the hot path
/// under concurrent student load and guarantees per-student shuffle
/// stability. Concurrent misses may each scan and overwrite the same value;
/// the overwrite is idempotent and tolerated in place of a distributed lock.
pub struct QuestionCacheService {
    questions: Arc<dyn QuestionRepository>,
    cache: Arc<dyn QuizCache>,
}

impl QuestionCacheService {
    pub fn new(questions: Arc<dyn QuestionRepository>, cache: Arc<dyn QuizCache>) -> Self {
        Self { questions, cache }
    }

    /// Cache-aside fetch of the answer-stripped question set for a quiz.
    pub async fn sanitized_questions(&self, quiz_id: &str) -> AppResult<Vec<SafeQuestion>> {
        if let Some(cached) = self.cache.get_sanitized_questions(quiz_id).await? {
            return Ok(cached);
        }

        let questions = self.questions.find_by_quiz(quiz_id).await?;
        let sanitized: Vec<SafeQuestion> = questions.into_iter().map(Question::sanitize).collect();

        self.cache
            .put_sanitized_questions(quiz_id, &sanitized, SANITIZED_QUESTIONS_TTL)
            .await?;

        Ok(sanitized)
    }

    /// Returns the student's stable ordering for a shuffled quiz, creating
    /// and caching it on first call. A cached order is returned verbatim;
    /// a reload must never reshuffle.
    pub async fn get_or_create_shuffled_order(
        &self,
        quiz_id: &str,
        student_id: &str,
        duration_minutes: i64,
        questions: Vec<SafeQuestion>,
    ) -> AppResult<Vec<SafeQuestion>> {
        if let Some(order) = self.cache.get_shuffled_order(quiz_id, student_id).await? {
            return Ok(order);
        }

        let mut shuffled = questions;
        shuffled.shuffle(&mut rand::rng());

        self.cache
            .put_shuffled_order(quiz_id, student_id, &shuffled, order_ttl(duration_minutes))
            .await?;

        Ok(shuffled)
    }
}
