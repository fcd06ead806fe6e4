//! セッション認証ミドルウェアと役割ガード

use crate::{
    error::AppError,
    middleware::AppState,
    models::user::{Role, User},
    repository::user_repo::UserRepository,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// セッションCookie名
pub const AUTH_COOKIE: &str = "auth_token";

/// 認証済みユーザー（リクエスト拡張に格納）。password_hashは持たない。
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: Role,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role,
            group_id: user.group_id,
            created_at: user.created_at,
        }
    }
}

// handler で直接 CurrentUser を受け取れるようにする
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::AuthenticationRequired)
    }
}

/// CookieヘッダからセッションCookieの値を取り出す
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| {
            raw.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == AUTH_COOKIE).then(|| value.to_string())
            })
        })
}

/// セッション認証ミドルウェア
/// Cookie抽出 → トークン検証 → ユーザー読込 → CurrentUser付与の順で進み、失敗はすべて401で終端する。
pub async fn session_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token =
        extract_session_token(req.headers()).ok_or(AppError::AuthenticationRequired)?;

    let user_id = state.token_service.verify(&token).map_err(|e| {
        tracing::debug!("Session token rejected: {}", e);
        AppError::InvalidOrExpiredToken
    })?;

    // 削除済みアカウントの古いトークンはここで落ちる
    let user = UserRepository::new(state.db.clone())
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    req.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(req).await)
}

/// 役割ガード。許可集合への所属判定のみで、役割間の階層は持たない。
/// セッションミドルウェアの内側に置くこと。認証済みユーザーが無ければ401を返す。
pub async fn role_guard(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::AuthenticationRequired)?;

    if !allowed.contains(&user.role) {
        tracing::warn!(user_id = user.id, role = %user.role, "Role not permitted");
        return Err(AppError::PermissionDenied);
    }

    Ok(next.run(req).await)
}
