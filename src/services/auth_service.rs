//! 認証サービス: ログインと登録

use crate::{
    auth::jwt::TokenService,
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::user::{NewUser, RegisterForm, Role, User},
    repository::user_repo::UserRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// 登録結果。メール重複はエラーではなくフォーム再表示に落とすため、成功と区別して返す。
#[derive(Debug)]
pub enum RegisterOutcome {
    Created(User),
    DuplicateEmail,
}

pub struct AuthService {
    db: SqlitePool,
    token_service: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(db: SqlitePool, token_service: Arc<TokenService>, config: &AppConfig) -> Self {
        Self {
            db,
            token_service,
            hasher: PasswordHasher::from_config(config),
        }
    }

    /// ログイン。成功時はセッショントークンを返す。
    /// 未登録メールとパスワード不一致は呼び出し側から区別できない（ユーザー列挙を避ける）。
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<String>, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let Some(user) = user_repo.find_by_email(email).await? else {
            return Ok(None);
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Ok(None);
        }

        let token = self.token_service.issue(user.id)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(Some(token))
    }

    /// 登録。役割は member 固定、住所の省略は空文字列として保存する。
    /// 重複判定は事前チェックではなく email の一意制約違反のみを正とする。
    pub async fn register(&self, form: RegisterForm) -> Result<RegisterOutcome, AppError> {
        let password_hash = self.hasher.hash(&form.password)?;

        let new_user = NewUser {
            name: form.name,
            email: form.email,
            address: form.address.unwrap_or_default(),
            role: Role::Member,
            password_hash,
        };

        let user_repo = UserRepository::new(self.db.clone());

        match user_repo.create(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(RegisterOutcome::Created(user))
            }
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                tracing::debug!("Registration with already-registered email");
                Ok(RegisterOutcome::DuplicateEmail)
            }
            Err(e) => Err(e),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
