//! テスト共通モジュール
//! テスト用の設定・データベース・アプリケーション状態を提供する

use kumiboard::{
    auth::{jwt::TokenService, password::PasswordHasher},
    config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    db,
    middleware::AppState,
    models::user::{NewUser, Role, User},
    repository::user_repo::UserRepository,
    services::AuthService,
};
use secrecy::Secret;
use sqlx::SqlitePool;
use std::sync::Arc;

/// テスト設定を作成する
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
        },
        database: DatabaseConfig {
            path: ":memory:".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test-secret-key-for-testing-only-min-32-chars".to_string()),
            session_ttl_secs: 604800,
            // テストは最小コストで回す
            bcrypt_cost: 4,
        },
    }
}

/// テストデータベースを初期化する
pub async fn setup_test_db(config: &AppConfig) -> SqlitePool {
    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to create test database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// テスト用アプリケーション状態を作成する
pub fn create_test_app_state(pool: SqlitePool) -> Arc<AppState> {
    let config = create_test_config();
    let token_service =
        Arc::new(TokenService::from_config(&config).expect("Failed to create token service"));
    let auth_service = Arc::new(AuthService::new(
        pool.clone(),
        token_service.clone(),
        &config,
    ));

    Arc::new(AppState {
        config,
        db: pool,
        auth_service,
        token_service,
    })
}

/// テストユーザーを作成する
pub async fn create_test_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> User {
    let hasher = PasswordHasher::new(4);
    let password_hash = hasher.hash(password).expect("Failed to hash password");

    UserRepository::new(pool.clone())
        .create(&NewUser {
            name: name.to_string(),
            email: email.to_string(),
            address: String::new(),
            role,
            password_hash,
        })
        .await
        .expect("Failed to create test user")
}
