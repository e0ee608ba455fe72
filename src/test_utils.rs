use chrono::{Duration, Utc};

use crate::models::domain::{Question, QuestionType, Quiz, QuizSettings};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Quiz whose window is currently open.
    pub fn open_quiz(id: &str, shuffle: bool) -> Quiz {
        let now = Utc::now();
        Quiz {
            id: id.to_string(),
            title: "Test Quiz".to_string(),
            description: Some("Fixture quiz".to_string()),
            start_time: now - Duration::minutes(10),
            end_time: now + Duration::minutes(50),
            duration_minutes: 30,
            settings: QuizSettings {
                shuffle,
                ..QuizSettings::default()
            },
            course_ids: vec!["course-1".to_string()],
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn single_choice_question(id: &str, quiz_id: &str) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            body: format!("Question {}", id),
            question_type: QuestionType::SingleCorrect,
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            answer: vec!["A".into()],
            marks: 1,
        }
    }

    pub fn question_bank(quiz_id: &str, count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| single_choice_question(&format!("q{}", i), quiz_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_open_quiz_fixture_window_is_open() {
        let quiz = open_quiz("quiz-1", false);
        assert!(quiz.is_open_at(chrono::Utc::now()));
    }

    #[test]
    fn test_question_bank_ids_are_distinct() {
        let bank = question_bank("quiz-1", 5);
        assert_eq!(bank.len(), 5);
        assert_eq!(bank[0].id, "q0");
        assert_eq!(bank[4].id, "q4");
    }
}
