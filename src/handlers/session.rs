use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use http::header::SET_COOKIE;
use tracing::instrument;

use crate::auth::jwt::{sign_token, TOKEN_TTL_HOURS};
use crate::auth::Credentials;
use crate::dtos::product::SearchParams;
use crate::dtos::session::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::middleware::session::{clear_session_cookie, session_cookie, CurrentSession};
use crate::state::AppState;
use crate::view::html::page_href;
use crate::view::overlay::{LoginForm, ModalState, Overlay};

use super::pages::render_catalog;

const TOKEN_TTL_SECONDS: i64 = TOKEN_TTL_HOURS * 60 * 60;

// POST /api/login - Simulated sign-in, returns a bearer token
#[instrument(skip(state, payload))]
pub async fn api_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .auth
        .login(Credentials {
            email: payload.email,
            password: payload.password,
        })
        .await?;
    let token = sign_token(&session, &state.settings.jwt_secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_TTL_SECONDS,
        display_name: session.display_name,
    }))
}

// POST /login - Sign-in dialog submission
#[instrument(skip(state, current, form))]
pub async fn login(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(params): Query<SearchParams>,
    Form(form): Form<LoginRequest>,
) -> Response {
    let search = params.q.unwrap_or_default();
    let mut dialog = LoginForm::new(form.email);

    let outcome = match dialog.submit(state.auth.as_ref(), form.password).await {
        Ok(session) => sign_token(&session, &state.settings.jwt_secret),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(token) => (
            [(SET_COOKIE, session_cookie(&token, TOKEN_TTL_SECONDS))],
            Redirect::to(&page_href(&search, None, None)),
        )
            .into_response(),
        Err(e) => {
            // Token signing fails after the dialog settled; show it there too.
            if dialog.state.error().is_none() {
                dialog.state = ModalState::OpenWithError(e.to_string());
            }
            let status = e.status();
            render_catalog(&state, current, search, Overlay::Login(dialog), status).await
        }
    }
}

// POST /logout
pub async fn logout(Query(params): Query<SearchParams>) -> Response {
    let search = params.q.unwrap_or_default();
    (
        [(SET_COOKIE, clear_session_cookie())],
        Redirect::to(&page_href(&search, None, None)),
    )
        .into_response()
}
