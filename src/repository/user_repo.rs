//! User repository (データベースアクセス層)
//! password_hash に触れるのはこの層だけ

use crate::{
    error::AppError,
    models::user::{NewUser, User},
};
use sqlx::SqlitePool;

pub struct UserRepository {
    db: SqlitePool,
}

impl UserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// メールアドレスでユーザーを検索
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// IDでユーザーを検索
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// ユーザーを作成する。
    /// email の一意制約違反はそのまま呼び出し側へ返し、重複判定は制約のみを正とする。
    pub async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, address, role, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.address)
        .bind(new_user.role)
        .bind(&new_user.password_hash)
        .bind(chrono::Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }
}
