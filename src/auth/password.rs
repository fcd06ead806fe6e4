//! bcryptによるパスワードハッシュと照合

use crate::{config::AppConfig, error::AppError};

/// パスワードハッシュ器。コストファクタは設定から与える。
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.security.bcrypt_cost)
    }

    /// パスワードをハッシュ化する。ソルトは呼び出しごとにbcrypt内部で生成される。
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AppError::Internal
        })
    }

    /// 保存済みハッシュと照合する。比較はbcrypt内部で定数時間に行われる。
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash).map_err(|e| {
            tracing::error!("Failed to verify password: {:?}", e);
            AppError::Internal
        })
    }
}
