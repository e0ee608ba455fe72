use serde::{Deserialize, Serialize};

/// Full question record as stored in the question collection, answer key
/// included. Only staff-facing code may serialize this shape.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub body: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Vec<String>,
    pub marks: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleCorrect,
    MultipleCorrect,
    TrueFalse,
    FillBlank,
    Descriptive,
    Matching,
    FileUpload,
    Coding,
}

/// Student-facing projection: answer key stripped, type tag normalized.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SafeQuestion {
    pub id: String,
    pub quiz_id: String,
    pub body: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub marks: i32,
}

impl Question {
    /// Projects to the safe shape. A question tagged single-correct whose
    /// answer key holds more than one entry is re-tagged multiple-correct, so
    /// the client renders checkboxes instead of radio buttons.
    pub fn sanitize(self) -> SafeQuestion {
        let question_type = if self.question_type == QuestionType::SingleCorrect
            && self.answer.len() > 1
        {
            QuestionType::MultipleCorrect
        } else {
            self.question_type
        };

        SafeQuestion {
            id: self.id,
            quiz_id: self.quiz_id,
            body: self.body,
            question_type,
            options: self.options,
            marks: self.marks,
        }
    }
}
