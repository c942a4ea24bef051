//! Context resolver: finds the bearer token a request presents and turns it
//! into a [`Ctx`].

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts, Path, Request},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use journal_auth::{
    AUTH_HEADER, AUTH_HEADER_PREFIX, auth_body::AuthBody, controller::AccessController,
    error::Error as AuthError,
};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::credentials::LoginForm;
use crate::ctx::{Ctx, PresentedToken, TokenSource};
use crate::prelude::*;

/// The name of the cookie used to store authentication tokens.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

type TokenResult = std::result::Result<PresentedToken, AuthError>;

fn bearer_from_headers(headers: &HeaderMap) -> Option<PresentedToken> {
    headers
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .map(|s| PresentedToken {
            token: s.trim().to_string(),
            source: TokenSource::Header,
        })
}

fn token_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_TOKEN_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

fn remove_token_cookie(cookies: &Cookies) {
    let mut cookie = Cookie::from(AUTH_TOKEN_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);
}

/// Middleware recording the presented token in the request extensions.
///
/// An explicit `Authorization: Bearer` header wins over the `auth-token`
/// cookie. Validation is left to the [`Ctx`] extractor, which knows the
/// route's `{username}` parameter when there is one.
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token: TokenResult = bearer_from_headers(&headers)
        .or_else(|| {
            cookies.get(AUTH_TOKEN_COOKIE).map(|c| PresentedToken {
                token: c.value().to_string(),
                source: TokenSource::Cookie,
            })
        })
        .filter(|presented| !presented.token.is_empty())
        .ok_or(AuthError::TokenMissing);

    req.extensions_mut().insert(token);

    next.run(req).await
}

/// Logs in with a username/password pair and stores the issued token in the
/// `auth-token` cookie.
pub fn login_with_password(
    controller: &AccessController,
    credentials: LoginForm,
    cookies: &Cookies,
) -> Result<AuthBody> {
    let credentials = credentials.require_complete()?;
    let body = controller.login(&credentials.username, &credentials.password)?;
    cookies.add(token_cookie(body.access_token.clone()));
    Ok(body)
}

impl<S: Send + Sync> FromRequestParts<S> for PresentedToken {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<TokenResult>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
    AccessController: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let presented = PresentedToken::from_request_parts(parts, state).await?;
        let username = Path::<String>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|Path(username)| username);

        let controller = AccessController::from_ref(state);
        match controller.authorize(&presented.token, username.as_deref()) {
            Ok(account) => Ok(Ctx::new(account)),
            Err(err) => {
                if presented.source == TokenSource::Cookie {
                    debug!("Dropping rejected auth cookie");
                    if let Some(cookies) = parts.extensions.get::<Cookies>() {
                        remove_token_cookie(cookies);
                    }
                }
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_header_is_read() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        let presented = bearer_from_headers(&headers).unwrap();
        assert_eq!(presented.token, "abc.def");
        assert_eq!(presented.source, TokenSource::Header);
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(bearer_from_headers(&headers).is_none());
        assert!(bearer_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn token_cookie_is_http_only_and_site_wide() {
        let cookie = token_cookie(String::from("abc"));
        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
