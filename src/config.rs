//! 設定システム
//! 環境変数から全設定を読み込み、秘密情報は Secret で包む

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 待ち受けアドレス。例: "0.0.0.0:3000"
    pub addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLiteデータベースファイルのパス
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// ログレベル: trace, debug, info, warn, error
    pub level: String,
    /// ログ形式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// トークン署名鍵（Secretで包み、ログ流出を防ぐ）。
    /// デフォルト値を持たないため、未設定なら起動に失敗する。
    pub jwt_secret: Secret<String>,
    /// セッショントークンの有効期間（秒）
    pub session_ttl_secs: u64,
    /// bcryptコストファクタ
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("database.path", "kumiboard.db")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.session_ttl_secs", 604800)?
            .set_default("security.bcrypt_cost", 10)?;

        // 環境変数から読み込む（接頭辞 KUMIBOARD_）
        settings = settings.add_source(
            Environment::with_prefix("KUMIBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// 設定の妥当性を検証する
    fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // HS256の鍵は32文字以上を要求する
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.security.session_ttl_secs < 3600 || self.security.session_ttl_secs > 2_592_000 {
            return Err(ConfigError::Message(
                "session_ttl_secs must be between 3600 and 2592000 (1 hour to 30 days)".to_string(),
            ));
        }

        if self.security.bcrypt_cost < 4 || self.security.bcrypt_cost > 14 {
            return Err(ConfigError::Message(
                "bcrypt_cost must be between 4 and 14".to_string(),
            ));
        }

        Ok(())
    }
}
