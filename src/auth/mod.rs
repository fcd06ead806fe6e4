//! 認証・認可モジュール

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{
    extract_session_token, role_guard, session_auth_middleware, CurrentUser, AUTH_COOKIE,
};
pub use password::PasswordHasher;
