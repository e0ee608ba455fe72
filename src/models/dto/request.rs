use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuery {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[serde(rename = "quizId")]
    #[validate(length(min = 1, max = 100))]
    pub quiz_id: String,

    pub responses: serde_json::Value,

    /// Proctoring log accumulated client-side (tab switches, fullscreen
    /// exits). Free-form; stored verbatim.
    #[serde(default)]
    pub violations: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SyncResponsesRequest {
    #[serde(rename = "quizId")]
    #[validate(length(min = 1, max = 100))]
    pub quiz_id: String,

    pub responses: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteResponsesRequest {
    #[serde(rename = "quizId")]
    #[validate(length(min = 1, max = 100))]
    pub quiz_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_accepts_camel_case_payload() {
        let request: SubmitQuizRequest = serde_json::from_str(
            r#"{ "quizId": "quiz-1", "responses": { "q1": "A" }, "violations": "tab-switch" }"#,
        )
        .expect("payload should parse");

        assert_eq!(request.quiz_id, "quiz-1");
        assert_eq!(request.responses["q1"], "A");
        assert_eq!(request.violations.as_deref(), Some("tab-switch"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn submit_request_violations_default_to_none() {
        let request: SubmitQuizRequest =
            serde_json::from_str(r#"{ "quizId": "quiz-1", "responses": {} }"#)
                .expect("payload should parse");

        assert!(request.violations.is_none());
    }

    #[test]
    fn submit_request_rejects_empty_quiz_id() {
        let request: SubmitQuizRequest =
            serde_json::from_str(r#"{ "quizId": "", "responses": {} }"#)
                .expect("payload should parse");

        assert!(request.validate().is_err());
    }
}
