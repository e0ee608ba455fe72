use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, to_bson},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::QuizAttempt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn find_by_student_and_quiz(
        &self,
        student_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<QuizAttempt>>;

    /// Insert a fresh attempt. Fails with `AppError::AlreadyExists` when an
    /// attempt for the same (student, quiz) pair already holds the unique
    /// index slot; the caller then reads back the winner's row.
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;

    /// Atomic terminal transition: matches only a live (non-submitted)
    /// attempt and flips it to submitted in one store round trip. Returns
    /// `None` when no live attempt matched, leaving the caller to tell
    /// "absent" from "already submitted" with a follow-up read.
    async fn submit(
        &self,
        student_id: &str,
        quiz_id: &str,
        responses: serde_json::Value,
        violations: String,
        ip: String,
        submitted_at: DateTime<Utc>,
    ) -> AppResult<Option<QuizAttempt>>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        // The uniqueness constraint behind exactly-once attempt creation.
        let student_quiz_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_quiz_unique".to_string())
                    .build(),
            )
            .build();

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(student_quiz_index).await?;
        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}

fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        write_error.code == 11000
    } else {
        false
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn find_by_student_and_quiz(
        &self,
        student_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<QuizAttempt>> {
        let attempt = self
            .collection
            .find_one(doc! {
                "student_id": student_id,
                "quiz_id": quiz_id
            })
            .await?;
        Ok(attempt)
    }

    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        match self.collection.insert_one(&attempt).await {
            Ok(_) => Ok(attempt),
            Err(err) if is_duplicate_key_error(&err) => {
                Err(crate::errors::AppError::AlreadyExists(format!(
                    "Attempt for student '{}' on quiz '{}' already exists",
                    attempt.student_id, attempt.quiz_id
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn submit(
        &self,
        student_id: &str,
        quiz_id: &str,
        responses: serde_json::Value,
        violations: String,
        ip: String,
        submitted_at: DateTime<Utc>,
    ) -> AppResult<Option<QuizAttempt>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! {
                    "student_id": student_id,
                    "quiz_id": quiz_id,
                    "is_submitted": false
                },
                doc! {
                    "$set": {
                        "responses": to_bson(&responses)?,
                        "violations": violations,
                        "ip": ip,
                        "submitted_at": to_bson(&submitted_at)?,
                        "is_submitted": true
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }
}
