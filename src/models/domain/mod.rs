pub mod question;
pub mod quiz;
pub mod quiz_attempt;

pub use question::{Question, QuestionType, SafeQuestion};
pub use quiz::{Quiz, QuizSettings};
pub use quiz_attempt::{EvaluationStatus, QuizAttempt};
