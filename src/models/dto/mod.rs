pub mod request;
pub mod response;

pub use request::{DeleteResponsesRequest, QuizQuery, SubmitQuizRequest, SyncResponsesRequest};
pub use response::{AttemptInfo, QuizInfo, QuizSessionResponse, SubmitQuizResponse};
