pub mod question_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use quiz_attempt_repository::MockQuizAttemptRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
