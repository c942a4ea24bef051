//! Authentication middleware for protecting routes.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::ctx::PresentedToken;
use crate::prelude::*;

/// Middleware that rejects requests presenting no bearer token at all.
///
/// Whether the token is any good is decided by the [`Ctx`](crate::ctx::Ctx)
/// extractor in the handler.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use journal_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn protected_handler() -> &'static str {
///     "This requires a bearer token"
/// }
/// ```
pub async fn mw_require_auth(
    token: Result<PresentedToken>,
    req: Request,
    next: Next,
) -> Result<Response> {
    token?;
    Ok(next.run(req).await)
}
