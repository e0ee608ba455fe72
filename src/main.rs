use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizline_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let jwt_service = JwtService::new(&config.jwt_secret, 24);

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .unwrap_or_else(|err| panic!("failed to initialize application state: {}", err));

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::health_check)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(handlers::get_quiz)
                    .service(handlers::save_quiz)
                    .service(handlers::sync_responses)
                    .service(handlers::delete_responses),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
