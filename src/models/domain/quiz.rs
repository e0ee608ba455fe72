use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Quiz metadata as authored by staff. Immutable from this service's point
/// of view; the lifecycle only reads it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub settings: QuizSettings,
    #[serde(default)]
    pub course_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct QuizSettings {
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub show_result: bool,
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default)]
    pub calculator: bool,
}

impl Quiz {
    /// Window check applied by both the initializer and the finalizer.
    /// Both bounds inclusive: a submission at exactly `end_time` is accepted.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }
}
