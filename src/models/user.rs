//! ユーザー関連のモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 役割。閉じた集合で、文字列の打ち間違いによる権限の素通りを防ぐ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Leader,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Leader => "leader",
            Role::Member => "member",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ユーザー行。password_hash を含むため、ハンドラへは CurrentUser に変換してから渡す。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: Role,
    pub group_id: Option<i64>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// 新規ユーザー挿入用
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Role,
    pub password_hash: String,
}

/// ログインフォーム
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// 登録フォーム。住所は省略可能。
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub address: Option<String>,
    #[validate(length(min = 6))]
    pub password: String,
}
