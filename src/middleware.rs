//! HTTPミドルウェアとアプリケーション状態

use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// アプリケーション状態
///
/// 起動時に一度だけ構築し、全ハンドラへ参照で渡す。
/// サービスはArcで包んで共有するため、Cloneはポインタコピーで済む。
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::AppConfig,
    pub db: sqlx::SqlitePool,
    pub auth_service: Arc<crate::services::AuthService>,
    pub token_service: Arc<crate::auth::jwt::TokenService>,
}

/// リクエスト追跡ミドルウェア
/// リクエストごとにrequest_idを振り、完了時にステータスと所要時間を記録する。
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let response = next.run(req).await;

        let elapsed = start.elapsed();

        tracing::info!(
            method = %method,
            uri = %uri,
            status = response.status().as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        let mut response = response;
        response
            .headers_mut()
            .insert("x-request-id", request_id.parse().unwrap());

        response
    }
    .instrument(span)
    .await
}
