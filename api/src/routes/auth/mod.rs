use crate::auth::{hash_password, issue_token, verify_password};
use crate::domain::{AuthResponseDto, LoginRequest, RegisterRequest};
use crate::error::{ApiError, ApiJson};
use axum::Json;
use axum::extract::State;
use common::persistence::PgPool;
use common::persistence::models::{Dealer, NewDealer};
use common::persistence::schema::dealer;
use diesel::result::DatabaseErrorKind;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use tracing::info;

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registers a dealer and returns a bearer token", body = AuthResponseDto),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(pool): State<PgPool>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    let new_dealer = NewDealer {
        name: body.name,
        email: body.email,
        password_hash: hash_password(&body.password),
        role: "dealer".to_string(),
    };

    let mut conn = pool.get().await?;
    let created: Dealer = diesel::insert_into(dealer::table)
        .values(&new_dealer)
        .returning(Dealer::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ApiError::EmailTaken
            }
            e => ApiError::Diesel(e),
        })?;
    info!("registered dealer `{}`", created.id);

    let token = issue_token(created.id)?;
    Ok(Json(AuthResponseDto {
        token,
        dealer: created.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    responses(
        (status = 200, description = "Returns a bearer token for valid credentials", body = AuthResponseDto),
        (status = 401, description = "Unknown email or wrong password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<PgPool>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponseDto>, ApiError> {
    let mut conn = pool.get().await?;
    let found: Dealer = dealer::table
        .filter(dealer::email.eq(&body.email))
        .select(Dealer::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or(ApiError::BadCredentials)?;

    if !verify_password(&found.password_hash, &body.password) {
        return Err(ApiError::BadCredentials);
    }

    let token = issue_token(found.id)?;
    Ok(Json(AuthResponseDto {
        token,
        dealer: found.into(),
    }))
}
