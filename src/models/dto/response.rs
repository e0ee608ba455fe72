use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, QuizAttempt, QuizSettings, SafeQuestion};

/// Payload returned by the attempt initializer: quiz metadata, the (possibly
/// shuffled) sanitized question list, any cached partial responses, and the
/// attempt's start time.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSessionResponse {
    pub quiz: QuizInfo,
    pub questions: Vec<SafeQuestion>,
    pub responses: Option<serde_json::Value>,
    #[serde(rename = "quizAttempt")]
    pub quiz_attempt: AttemptInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizInfo {
    pub title: String,
    pub settings: QuizSettings,
    pub duration: i64,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptInfo {
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
}

impl From<&Quiz> for QuizInfo {
    fn from(quiz: &Quiz) -> Self {
        QuizInfo {
            title: quiz.title.clone(),
            settings: quiz.settings.clone(),
            duration: quiz.duration_minutes,
            start_time: quiz.start_time,
            end_time: quiz.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitQuizResponse {
    pub success: bool,
    pub data: QuizAttempt,
}

impl SubmitQuizResponse {
    pub fn new(attempt: QuizAttempt) -> Self {
        Self {
            success: true,
            data: attempt,
        }
    }
}
