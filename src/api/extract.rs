use axum::extract::FromRequest;

use crate::domain::BoardError;

/// `Json` whose rejections are reported as `BoardError::InvalidArgument`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BoardError))]
pub struct ApiJson<T>(pub T);
