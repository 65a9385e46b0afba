//! Bearer-token authentication.
//!
//! Tokens are opaque random strings handed out by the CLI. Only their blake3
//! hash is stored; a request is authenticated by hashing the presented token
//! and looking up the owning account.

use std::future::{ready, Ready as StdReady};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures::future::{ok, LocalBoxFuture, Ready};
use tracing::{debug, error};
use veritas_core::types::user::{User, UserId};

use crate::app::AppState;
use crate::errors::AppError;

/// A fresh API token: 64 hex characters from two v4 UUIDs.
pub fn generate_token() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Hex-encoded blake3 hash of a token, as stored in the users table.
pub fn hash_token(token: &str) -> String {
    blake3::hash(token.as_bytes()).to_hex().to_string()
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid bearer token with 401.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match resolve_user(&req).await {
                Ok(user) => {
                    debug!(user_id = user.id, path = req.path(), "Request authenticated");
                    req.extensions_mut().insert(AuthenticatedUser {
                        id: user.id,
                        username: user.username,
                    });
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    let response = e.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

async fn resolve_user(req: &ServiceRequest) -> Result<User, AppError> {
    let token_hash = bearer_token(req).map(hash_token).ok_or(AppError::Unauthorized)?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

    let found = web::block(move || state.storage.find_user_by_token_hash(&token_hash))
        .await?
        .map_err(|e| {
            error!(error = %e, "Token lookup failed");
            AppError::from(e)
        })?;
    found.ok_or(AppError::Unauthorized)
}

/// The account behind the current request, set by [`AuthMiddleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = StdReady<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or(AppError::Unauthorized),
        )
    }
}
