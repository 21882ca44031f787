use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("diesel error: `{0}`")]
    Diesel(#[from] diesel::result::Error),
    #[error("postgres pool error: `{0}`")]
    PgPool(#[from] diesel_async::pooled_connection::deadpool::PoolError),
    #[error("multipart error: `{0}`")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("json rejection: `{0}`")]
    JsonRejection(#[from] JsonRejection),
    #[error("io error: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("jwt error: `{0}`")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("listing with given id not found: `{0}`")]
    ListingNotFound(i32),
    #[error("oem spec with given id not found: `{0}`")]
    SpecNotFound(i32),
    #[error("missing required field: `{0}`")]
    MissingField(&'static str),
    #[error("field does not parse as a number: `{0}`")]
    BadField(&'static str),
    #[error("a listing carries at most `{0}` images")]
    TooManyImages(usize),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    BadCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid bearer token")]
    InvalidToken,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::ListingNotFound(..) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::SpecNotFound(..)
            | Self::MissingField(..)
            | Self::BadField(..)
            | Self::TooManyImages(..)
            | Self::JsonRejection(..)
            | Self::Multipart(..) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::EmailTaken => (StatusCode::CONFLICT, self.to_string()),
            Self::BadCredentials | Self::MissingToken | Self::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
            ),
        };

        (status, ApiJson(ErrorResponse { message })).into_response()
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    message: String,
}

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T> IntoResponse for ApiJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
