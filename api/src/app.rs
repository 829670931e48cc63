//! Application factory.
//!
//! Builds the actix-web `App` from an [`AppState`]: middleware stack,
//! JSON error handling, and the full route table. `main` calls this with
//! the Postgres stores; the integration tests call it with mocks.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{error::InternalError, middleware::Logger, web, App, Error, HttpResponse};

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};
use todo_shared::config::Environment;

use crate::dto::ErrorResponse;
use crate::handlers::error::invalid_json_response;
use crate::middleware::auth::{AccessTokenValidator, JwtAuth};
use crate::middleware::cors::create_cors;
use crate::routes::{auth, todos, users, AppState};

/// Create and configure the application with all dependencies.
pub fn create_app<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    // The auth guard reaches the auth service through this trait object,
    // so the middleware stays non-generic.
    let validator: Arc<dyn AccessTokenValidator> = state.auth_service.clone();

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, invalid_json_response()).into()
    });

    let cors = create_cors(Environment::from_env());

    App::new()
        .app_data(state)
        .app_data(web::Data::new(validator))
        .app_data(json_config)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Public auth endpoints
                .route("/register", web::post().to(auth::register::<U, B, R, T>))
                .route("/login", web::post().to(auth::login::<U, B, R, T>))
                .route("/logout", web::post().to(auth::logout::<U, B, R, T>))
                .route("/refresh", web::post().to(auth::refresh::<U, B, R, T>))
                // Authenticated user endpoints
                .service(
                    web::scope("/me")
                        .wrap(JwtAuth::required())
                        .route("", web::get().to(users::me::<U, B, R, T>)),
                )
                .service(
                    web::scope("/profile")
                        .wrap(JwtAuth::required())
                        .route("", web::put().to(users::update_profile::<U, B, R, T>)),
                )
                // Todo endpoints
                .service(
                    web::scope("/todos")
                        .wrap(JwtAuth::required())
                        .route("", web::get().to(todos::list_todos::<U, B, R, T>))
                        .route("", web::post().to(todos::create_todo::<U, B, R, T>))
                        .route("/{id}", web::get().to(todos::get_todo::<U, B, R, T>))
                        .route("/{id}", web::put().to(todos::update_todo::<U, B, R, T>))
                        .route("/{id}", web::delete().to(todos::delete_todo::<U, B, R, T>))
                        .route(
                            "/{id}/toggle",
                            web::patch().to(todos::toggle_todo::<U, B, R, T>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler.
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Server is healthy",
    }))
}

/// Default 404 handler.
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "リクエストされたリソースが見つかりません",
    ))
}
