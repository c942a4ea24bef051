//! HTTP routes.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    Form, Json, Router,
    extract::State,
    http::HeaderMap,
    middleware,
    routing::{get, post},
};
use journal_auth::{
    account::{AccountView, EnrolledAccount, Enrollment},
    auth_body::AuthBody,
    controller::AccessController,
};
use journal_web::{
    credentials::LoginForm,
    ctx::{
        Ctx,
        resolver::{login_with_password, mw_ctx_resolver},
    },
    mw_auth::mw_require_auth,
    prelude::Result as JournalWebResult,
};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::prelude::*;

fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

/// Builds the journald router around `controller`.
pub fn router(controller: AccessController) -> Router {
    let journal_routes = Router::new()
        .route(&v1("journal"), get(get_journal))
        .route(&v1("journal/{username}"), get(get_journal))
        .route_layer(middleware::from_fn(mw_require_auth));

    let public_routes = Router::new()
        .route(&v1("journal"), post(post_journal))
        .route(&v1("login"), post(login_form).get(login_basic));

    Router::new()
        .merge(journal_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(mw_ctx_resolver))
        .layer(CookieManagerLayer::new())
        .with_state(controller)
}

/// Binds `bind` and serves the API until `shutdown` resolves.
///
/// Returns the address actually bound, which differs from `bind` when it
/// asks for port 0.
pub async fn setup_api<F>(
    bind: SocketAddr,
    controller: AccessController,
    shutdown: F,
) -> Result<(SocketAddr, JoinHandle<Result<()>>)>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(controller);

    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;
    debug!("listening on {addr}");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    });

    Ok((addr, handle))
}

async fn post_journal(
    State(controller): State<AccessController>,
    Json(payload): Json<Enrollment>,
) -> JournalWebResult<Json<EnrolledAccount>> {
    let enrolled = controller.enroll(payload)?;
    info!("Enrolled journal '{}'", enrolled.username);
    Ok(Json(enrolled))
}

async fn login_form(
    State(controller): State<AccessController>,
    cookies: Cookies,
    Form(credentials): Form<LoginForm>,
) -> JournalWebResult<Json<AuthBody>> {
    Ok(Json(login_with_password(&controller, credentials, &cookies)?))
}

async fn login_basic(
    State(controller): State<AccessController>,
    cookies: Cookies,
    headers: HeaderMap,
) -> JournalWebResult<Json<AuthBody>> {
    let credentials = LoginForm::from_basic(&headers)?;
    Ok(Json(login_with_password(&controller, credentials, &cookies)?))
}

async fn get_journal(ctx: Ctx) -> Json<AccountView> {
    debug!("Serving journal '{}'", ctx.username());
    Json(ctx.view())
}
