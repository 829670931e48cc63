use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use log::{info, warn};

use todo_api::app::create_app;
use todo_api::routes::AppState;
use todo_core::services::auth::AuthService;
use todo_core::services::todo::TodoService;
use todo_core::services::token::{TokenCleanupService, TokenCodec, TokenConfig};
use todo_infra::{
    create_pool, PgRefreshTokenRepository, PgTodoRepository, PgTokenBlacklistRepository,
    PgUserRepository,
};
use todo_shared::config::{AuthConfig, DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting todo API server");

    // Load configuration
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let auth_config = AuthConfig::from_env();

    if auth_config.using_default_secret {
        warn!("JWT_SECRET is not set; using the insecure development default");
    }

    // Database pool
    let pool = create_pool(&database_config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // Stores
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let blacklist_repository = Arc::new(PgTokenBlacklistRepository::new(pool.clone()));
    let refresh_token_repository = Arc::new(PgRefreshTokenRepository::new(pool.clone()));
    let todo_repository = Arc::new(PgTodoRepository::new(pool));

    // Services, composed explicitly: the secret is injected here and
    // nowhere else.
    let codec = TokenCodec::new(TokenConfig::from(&auth_config));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&blacklist_repository),
        Arc::clone(&refresh_token_repository),
        codec,
        auth_config.bcrypt_cost,
    ));
    let todo_service = Arc::new(TodoService::new(todo_repository));

    // Background GC of expired tokens and blacklist entries
    if auth_config.cleanup_interval_secs > 0 {
        let cleanup = TokenCleanupService::new(
            blacklist_repository,
            refresh_token_repository,
            Duration::from_secs(auth_config.cleanup_interval_secs),
        );
        tokio::spawn(cleanup.run_forever());
    }

    let state = web::Data::new(AppState {
        auth_service,
        todo_service,
        cookie_secure: server_config.environment.is_production(),
    });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
