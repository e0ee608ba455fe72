use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One attempt per (student, quiz), created at the first in-window fetch and
/// immutable once `is_submitted` flips.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub score: i32,
    pub total_score: i32,
    pub start_time: DateTime<Utc>,
    pub is_submitted: bool,
    pub evaluation: EvaluationStatus,
    pub responses: serde_json::Value,
    pub violations: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Pending,
    Evaluated,
}

impl QuizAttempt {
    pub fn started(student_id: &str, quiz_id: &str, now: DateTime<Utc>) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score: 0,
            total_score: 0,
            start_time: now,
            is_submitted: false,
            evaluation: EvaluationStatus::Pending,
            responses: serde_json::Value::Null,
            violations: String::new(),
            submitted_at: None,
            ip: None,
        }
    }
}
