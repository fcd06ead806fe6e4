//! 組ぼーど起動エントリ

use kumiboard::{
    auth::{jwt::TokenService, password::PasswordHasher},
    config::AppConfig,
    db,
    middleware::AppState,
    routes,
    services::AuthService,
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env（開発環境用）
    dotenv::dotenv().ok();

    // 1. 設定読込。署名鍵が未設定ならここで起動に失敗する。
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. ログ初期化
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "kumiboard starting...");

    // 3. データベース接続 + マイグレーション + 初期データ
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;
    db::seed_initial_data(&db_pool, &PasswordHasher::from_config(&config)).await?;

    tracing::info!("Database initialized");

    // 4. アプリケーション状態の構築
    let token_service = Arc::new(TokenService::from_config(&config)?);
    let auth_service = Arc::new(AuthService::new(
        db_pool.clone(),
        token_service.clone(),
        &config,
    ));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool,
        auth_service,
        token_service,
    });

    // 5. ルータ構築
    let app = routes::create_router(app_state);

    // 6. サーバ起動
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. グレースフルシャットダウン
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 終了シグナルの待ち受け
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}
