//! Group repository (データベースアクセス層)

use crate::{error::AppError, models::group::Group};
use sqlx::SqlitePool;

pub struct GroupRepository {
    db: SqlitePool,
}

impl GroupRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// 組を作成
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Group, AppError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, description)
            VALUES (?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.db)
        .await?;

        Ok(group)
    }

    /// IDで組を検索
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        let group = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(group)
    }
}
