//! ホーム画面と管理画面のハンドラ

use crate::{auth::middleware::CurrentUser, views};
use axum::{response::Html, Json};
use serde_json::json;

/// ホームページ。セッションミドルウェアの内側でのみ到達できる。
pub async fn home(user: CurrentUser) -> Html<String> {
    Html(views::home_page(&user))
}

/// 管理ダッシュボード。セッションに加えてadmin役割を要求する。
pub async fn admin_dashboard(user: CurrentUser) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Admin dashboard",
        "name": user.name,
    }))
}
