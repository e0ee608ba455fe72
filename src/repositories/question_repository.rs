use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Full scan of a quiz's questions in insertion order. Callers are
    /// expected to go through the question cache, not hit this per request.
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }
}
