use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.db.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(err) => {
            log::error!("health check failed: {}", err);
            HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({ "status": "unavailable" }))
        }
    }
}
