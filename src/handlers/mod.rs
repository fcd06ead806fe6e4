//! HTTPハンドラ

pub mod auth;
pub mod home;

use crate::error::AppError;
use axum::extract::{FromRequest, Request};
use axum::Form;
use validator::Validate;

/// フォーム入力をデシリアライズと同時にスキーマ検証するextractor。
/// 不正な入力はハンドラ本体に到達する前に400で打ち切られる。
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(Self(value))
    }
}
