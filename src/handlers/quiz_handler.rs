use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_student, AuthenticatedUser},
    errors::AppError,
    handlers::client_ip::resolve_client_ip,
    models::dto::{
        AttemptInfo, DeleteResponsesRequest, QuizInfo, QuizQuery, QuizSessionResponse,
        SubmitQuizRequest, SubmitQuizResponse, SyncResponsesRequest,
    },
};

#[get("/api/quiz/get")]
async fn get_quiz(
    state: web::Data<AppState>,
    query: web::Query<QuizQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let session = state
        .quiz_session_service
        .start_session(&auth.0.sub, &query.quiz_id)
        .await?;

    Ok(HttpResponse::Ok().json(QuizSessionResponse {
        quiz: QuizInfo::from(&session.quiz),
        questions: session.questions,
        responses: session.responses,
        quiz_attempt: AttemptInfo {
            start_time: session.attempt.start_time,
        },
    }))
}

#[post("/api/quiz/save")]
async fn save_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;
    request.validate()?;

    let request = request.into_inner();
    let ip = resolve_client_ip(&req);

    let updated = state
        .submission_service
        .submit(
            &auth.0.sub,
            &request.quiz_id,
            request.responses,
            request.violations.unwrap_or_default(),
            ip,
        )
        .await?;

    Ok(HttpResponse::Ok().json(SubmitQuizResponse::new(updated)))
}

#[post("/api/quiz/sync")]
async fn sync_responses(
    state: web::Data<AppState>,
    request: web::Json<SyncResponsesRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;
    request.validate()?;

    let request = request.into_inner();
    state
        .quiz_session_service
        .save_partial(&auth.0.sub, &request.quiz_id, request.responses)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

#[post("/api/quiz/delete-response")]
async fn delete_responses(
    state: web::Data<AppState>,
    request: web::Json<DeleteResponsesRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;
    request.validate()?;

    state
        .quiz_session_service
        .discard_partial(&auth.0.sub, &request.quiz_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
