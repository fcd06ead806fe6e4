//! ルーティング登録
//! 全ルートを組み立ててミドルウェアを適用する

use axum::{
    extract::Request,
    middleware::{from_fn, from_fn_with_state, Next},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    auth::middleware::{role_guard, session_auth_middleware},
    handlers,
    middleware::AppState,
    models::user::Role,
};

/// 管理画面に入れる役割。adminのみで、leaderを暗黙に含めない。
const ADMIN_ROLES: &[Role] = &[Role::Admin];

/// アプリケーションルータを構築する
pub fn create_router(state: Arc<AppState>) -> Router {
    // 認証不要のルート
    let auth_routes = Router::new()
        .route(
            "/auth/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(
            "/auth/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route("/auth/logout", post(handlers::auth::logout));

    // セッション必須のルート
    let session_routes = Router::new()
        .route("/", get(handlers::home::home))
        .layer(from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    // セッションに加えてadmin役割を要求するルート
    let admin_routes = Router::new()
        .route("/admin/dashboard", get(handlers::home::admin_dashboard))
        .layer(from_fn(|req: Request, next: Next| {
            role_guard(ADMIN_ROLES, req, next)
        }))
        .layer(from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .layer(from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
