use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{errors::AppResult, models::domain::SafeQuestion};

/// Typed cache access for the attempt lifecycle. All entries are derived
/// data: losing the cache costs a re-scan or a re-shuffle for students with
/// no live order entry, never correctness of attempt state.
///
/// Key layout is owned by this module; call sites never build cache keys.
#[async_trait]
pub trait QuizCache: Send + Sync {
    async fn get_sanitized_questions(&self, quiz_id: &str)
        -> AppResult<Option<Vec<SafeQuestion>>>;
    async fn put_sanitized_questions(
        &self,
        quiz_id: &str,
        questions: &[SafeQuestion],
        ttl: Duration,
    ) -> AppResult<()>;

    async fn get_shuffled_order(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Option<Vec<SafeQuestion>>>;
    async fn put_shuffled_order(
        &self,
        quiz_id: &str,
        student_id: &str,
        questions: &[SafeQuestion],
        ttl: Duration,
    ) -> AppResult<()>;

    async fn get_responses(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Option<serde_json::Value>>;
    async fn put_responses(
        &self,
        quiz_id: &str,
        student_id: &str,
        responses: &serde_json::Value,
        ttl: Duration,
    ) -> AppResult<()>;
    async fn delete_responses(&self, quiz_id: &str, student_id: &str) -> AppResult<()>;

    /// Drops every entry derived from the quiz: sanitized set, all student
    /// orders, all partial responses. Used after staff edits.
    async fn invalidate_quiz(&self, quiz_id: &str) -> AppResult<()>;
}

struct Expiring<T> {
    value: T,
    expires_at: Instant,
}

impl<T: Clone> Expiring<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn live(&self) -> Option<T> {
        if Instant::now() < self.expires_at {
            Some(self.value.clone())
        } else {
            None
        }
    }
}

/// In-process implementation. The trait seam admits an external key-value
/// store without touching the services.
pub struct InMemoryQuizCache {
    questions: RwLock<HashMap<String, Expiring<Vec<SafeQuestion>>>>,
    orders: RwLock<HashMap<(String, String), Expiring<Vec<SafeQuestion>>>>,
    responses: RwLock<HashMap<(String, String), Expiring<serde_json::Value>>>,
}

impl InMemoryQuizCache {
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(HashMap::new()),
            orders: RwLock::new(HashMap::new()),
            responses: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryQuizCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizCache for InMemoryQuizCache {
    async fn get_sanitized_questions(
        &self,
        quiz_id: &str,
    ) -> AppResult<Option<Vec<SafeQuestion>>> {
        let questions = self.questions.read().await;
        Ok(questions.get(quiz_id).and_then(Expiring::live))
    }

    async fn put_sanitized_questions(
        &self,
        quiz_id: &str,
        value: &[SafeQuestion],
        ttl: Duration,
    ) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        questions.retain(|_, entry| entry.live().is_some());
        questions.insert(quiz_id.to_string(), Expiring::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn get_shuffled_order(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Option<Vec<SafeQuestion>>> {
        let orders = self.orders.read().await;
        Ok(orders
            .get(&(quiz_id.to_string(), student_id.to_string()))
            .and_then(Expiring::live))
    }

    async fn put_shuffled_order(
        &self,
        quiz_id: &str,
        student_id: &str,
        value: &[SafeQuestion],
        ttl: Duration,
    ) -> AppResult<()> {
        let mut orders = self.orders.write().await;
        orders.retain(|_, entry| entry.live().is_some());
        orders.insert(
            (quiz_id.to_string(), student_id.to_string()),
            Expiring::new(value.to_vec(), ttl),
        );
        Ok(())
    }

    async fn get_responses(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<Option<serde_json::Value>> {
        let responses = self.responses.read().await;
        Ok(responses
            .get(&(quiz_id.to_string(), student_id.to_string()))
            .and_then(Expiring::live))
    }

    async fn put_responses(
        &self,
        quiz_id: &str,
        student_id: &str,
        value: &serde_json::Value,
        ttl: Duration,
    ) -> AppResult<()> {
        let mut responses = self.responses.write().await;
        responses.retain(|_, entry| entry.live().is_some());
        responses.insert(
            (quiz_id.to_string(), student_id.to_string()),
            Expiring::new(value.clone(), ttl),
        );
        Ok(())
    }

    async fn delete_responses(&self, quiz_id: &str, student_id: &str) -> AppResult<()> {
        let mut responses = self.responses.write().await;
        responses.remove(&(quiz_id.to_string(), student_id.to_string()));
        Ok(())
    }

    async fn invalidate_quiz(&self, quiz_id: &str) -> AppResult<()> {
        self.questions.write().await.remove(quiz_id);
        self.orders
            .write()
            .await
            .retain(|(qid, _), _| qid != quiz_id);
        self.responses
            .write()
            .await
            .retain(|(qid, _), _| qid != quiz_id);
        Ok(())
    }
}
