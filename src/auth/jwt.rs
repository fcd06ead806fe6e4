//! セッショントークンの発行と検証
//! 鍵は起動時に一度読み込む。ローテーション機構は無く、鍵を変えると発行済みトークンは全て無効になる。

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// トークンに埋め込むクレーム
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// 検証失敗の区別。セッションミドルウェアではどちらも401に落ちる。
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
}

/// トークンサービス
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl_secs: u64,
}

impl TokenService {
    /// 設定からトークンサービスを構築する
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256には32バイト以上の鍵を要求する
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl_secs: config.security.session_ttl_secs,
        })
    }

    /// ユーザーIDと有効期限を埋め込んだ署名付きトークンを発行する
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.session_ttl_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal
        })
    }

    /// トークンを検証し、埋め込まれたユーザーIDを返す
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    tracing::debug!("Token validation failed: {:?}", e);
                    TokenError::Invalid
                }
            })?;

        data.claims.sub.parse::<i64>().map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig};
    use secrecy::Secret;

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
            },
            database: DatabaseConfig {
                path: ":memory:".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
                session_ttl_secs: 604800,
                bcrypt_cost: 4,
            },
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::from_config(&test_config()).unwrap();

        let token = service.issue(42).unwrap();
        let user_id = service.verify(&token).unwrap();

        assert_eq!(user_id, 42);
    }

    #[test]
    fn test_tampered_token_fails() {
        let service = TokenService::from_config(&test_config()).unwrap();
        let token = service.issue(42).unwrap();

        // 署名の末尾を書き換える
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(service.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let service = TokenService::from_config(&config).unwrap();

        // 検証側のleewayを超えた過去の有効期限を持つトークンを同じ鍵で作る
        let now = Utc::now();
        let claims = Claims {
            sub: "42".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let key = EncodingKey::from_secret(
            config.security.jwt_secret.expose_secret().as_bytes(),
        );
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_token_fails() {
        let service = TokenService::from_config(&test_config()).unwrap();

        assert!(matches!(service.verify("not_a_token"), Err(TokenError::Invalid)));
        assert!(matches!(service.verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let config = test_config();
        let service = TokenService::from_config(&config).unwrap();

        let now = Utc::now();
        let claims = Claims {
            sub: "not-a-number".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let key = EncodingKey::from_secret(
            config.security.jwt_secret.expose_secret().as_bytes(),
        );
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = test_config();
        config.security.jwt_secret = Secret::new("short".to_string());

        assert!(TokenService::from_config(&config).is_err());
    }
}
