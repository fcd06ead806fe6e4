//! 組（回覧板の配布単位）のモデル

use serde::{Deserialize, Serialize};

/// 組。ユーザーと回覧板からidで参照されるだけで、所有関係は持たない。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
