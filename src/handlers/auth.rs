//! 認証まわりのHTTPハンドラ

use crate::{
    auth::middleware::AUTH_COOKIE,
    error::AppError,
    middleware::AppState,
    models::user::{LoginForm, RegisterForm},
    services::RegisterOutcome,
    views,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::ValidatedForm;

/// ログインページ
pub async fn login_page() -> Html<String> {
    Html(views::login_page())
}

/// ログイン処理
/// 未登録メールとパスワード不一致はどちらも同じフォーム再表示になる。
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth_service.login(&form.email, &form.password).await? {
        Some(token) => {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
                AUTH_COOKIE, token, state.config.security.session_ttl_secs
            );

            Ok((
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                redirect_found("/"),
            )
                .into_response())
        }
        None => Ok(Html(views::login_page()).into_response()),
    }
}

/// 登録ページ
pub async fn register_page() -> Html<String> {
    Html(views::register_page())
}

/// 登録処理。成功したらログインページへ誘導する。
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> Result<Response, AppError> {
    match state.auth_service.register(form).await? {
        RegisterOutcome::Created(_) => Ok(redirect_found("/auth/login")),
        RegisterOutcome::DuplicateEmail => Ok(Html(views::register_page()).into_response()),
    }
}

/// ログアウト処理
/// Cookieを消すだけで、発行済みトークン自体は期限まで有効のままになる。
pub async fn logout() -> Response {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        AUTH_COOKIE
    );

    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        redirect_found("/auth/login"),
    )
        .into_response()
}

/// 302リダイレクトを組み立てる
fn redirect_found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        AppendHeaders([(header::LOCATION, location.to_string())]),
    )
        .into_response()
}
