// src/handlers/pages.rs
//! HTML catalog page and the dialog submissions that post back to it.
//!
//! Successful submissions redirect to `/` so the list is fetched again;
//! failed ones re-render the page with the same dialog open.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::dtos::product::{ProductDraft, SearchParams};
use crate::middleware::session::CurrentSession;
use crate::state::AppState;
use crate::view::html::{page_href, render_page, Page};
use crate::view::list::ListView;
use crate::view::overlay::{DeleteConfirm, FormMode, Overlay, OverlayKind, ProductForm};

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub q: Option<String>,
    pub overlay: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteFormBody {
    pub name: String,
}

/// Loads the list and renders it with `overlay` on top.
pub(crate) async fn render_catalog(
    state: &AppState,
    current: CurrentSession,
    search: String,
    overlay: Overlay,
    status: StatusCode,
) -> Response {
    let mut list = ListView::new(search);
    list.load(&state.repo).await;
    render_loaded(state, &current, &list, &overlay, status)
}

fn render_loaded(
    state: &AppState,
    current: &CurrentSession,
    list: &ListView,
    overlay: &Overlay,
    status: StatusCode,
) -> Response {
    let html = render_page(&Page {
        store_name: &state.settings.store_name,
        currency: &state.settings.currency,
        session: current.0.as_ref(),
        list,
        overlay,
    });
    (status, Html(html)).into_response()
}

fn back_to_list(search: &str) -> Response {
    Redirect::to(&page_href(search, None, None)).into_response()
}

// GET / - Catalog table, optionally with a dialog open
#[instrument(skip(state, current))]
pub async fn catalog(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(params): Query<PageParams>,
) -> Response {
    let mut list = ListView::new(params.q.unwrap_or_default());
    list.load(&state.repo).await;

    let kind = params.overlay.as_deref().and_then(OverlayKind::parse);
    let overlay = Overlay::open(kind, params.id.as_deref(), &list);
    render_loaded(&state, &current, &list, &overlay, StatusCode::OK)
}

// POST /products - Add dialog submission
#[instrument(skip(state, current, draft))]
pub async fn add_product(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(params): Query<SearchParams>,
    Form(draft): Form<ProductDraft>,
) -> Response {
    submit_form(state, current, params, FormMode::Add, draft).await
}

// POST /products/{id} - Edit dialog submission
#[instrument(skip(state, current, draft))]
pub async fn edit_product(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
    Form(draft): Form<ProductDraft>,
) -> Response {
    submit_form(state, current, params, FormMode::Edit { id }, draft).await
}

async fn submit_form(
    state: AppState,
    current: CurrentSession,
    params: SearchParams,
    mode: FormMode,
    draft: ProductDraft,
) -> Response {
    let search = params.q.unwrap_or_default();
    let mut form = ProductForm::with_draft(mode, draft);

    match form.submit(&state.repo).await {
        Ok(()) => {
            info!(editing = form.is_editing(), "Product saved");
            back_to_list(&search)
        }
        Err(e) => {
            let status = e.status();
            render_catalog(&state, current, search, Overlay::ProductForm(form), status).await
        }
    }
}

// POST /products/{id}/delete - Delete confirmation
#[instrument(skip(state, current, body))]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
    Form(body): Form<DeleteFormBody>,
) -> Response {
    let search = params.q.unwrap_or_default();
    let mut dialog = DeleteConfirm::new(id, body.name);

    match dialog.confirm(&state.repo).await {
        Ok(()) => {
            info!(id = %dialog.id, "Product deleted");
            back_to_list(&search)
        }
        Err(e) => {
            let status = e.status();
            render_catalog(&state, current, search, Overlay::ConfirmDelete(dialog), status).await
        }
    }
}
