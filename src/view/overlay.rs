// src/view/overlay.rs
//! Modal dialogs over the catalog table.
//!
//! At most one dialog is open at a time: [`Overlay`] is that single slot.
//! Each dialog with a submit action walks the same states
//! (`Open -> Submitting -> closed | OpenWithError`) and takes `&mut self`
//! while submitting, so a dialog never has two submissions in flight.

use tracing::warn;

use crate::auth::{Authenticator, Credentials, Session};
use crate::dtos::product::ProductDraft;
use crate::error::AppError;
use crate::models::product::Product;
use crate::repository::{ProductRepository, RepositoryError};
use crate::validation::validate;

use super::list::ListView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Open,
    Submitting,
    OpenWithError(String),
}

impl ModalState {
    pub fn error(&self) -> Option<&str> {
        match self {
            ModalState::OpenWithError(msg) => Some(msg),
            _ => None,
        }
    }

    fn begin(&mut self) -> Result<(), AppError> {
        if *self == ModalState::Submitting {
            return Err(AppError::validation("A submission is already in progress"));
        }
        *self = ModalState::Submitting;
        Ok(())
    }

    fn settle<T>(&mut self, result: Result<T, AppError>) -> Result<T, AppError> {
        *self = match &result {
            Ok(_) => ModalState::Open,
            Err(e) => ModalState::OpenWithError(e.to_string()),
        };
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// Add/Edit dialog.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub mode: FormMode,
    pub draft: ProductDraft,
    pub state: ModalState,
}

impl ProductForm {
    pub fn add() -> Self {
        Self::with_draft(FormMode::Add, ProductDraft::default())
    }

    pub fn edit(product: &Product) -> Self {
        Self::with_draft(
            FormMode::Edit {
                id: product.id.clone(),
            },
            ProductDraft::from(product),
        )
    }

    pub fn with_draft(mode: FormMode, draft: ProductDraft) -> Self {
        Self {
            mode,
            draft,
            state: ModalState::Open,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit product" } else { "Add product" }
    }

    pub fn submit_label(&self) -> &'static str {
        match (&self.state, self.is_editing()) {
            (ModalState::Submitting, _) => "Saving...",
            (_, true) => "Update",
            (_, false) => "Save",
        }
    }

    /// Validates the draft and writes it. On `Ok` the dialog should close
    /// and the list reload; on `Err` it stays open showing the message.
    pub async fn submit(&mut self, repo: &ProductRepository) -> Result<(), AppError> {
        self.state.begin()?;
        let result = self.persist(repo).await;
        self.state.settle(result)
    }

    async fn persist(&self, repo: &ProductRepository) -> Result<(), AppError> {
        let product = validate(&self.draft)?;
        let written = match &self.mode {
            FormMode::Add => repo.create(product).await.map(|_| ()),
            FormMode::Edit { id } => repo.update(id, product).await,
        };
        written.map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::not_found("This product no longer exists. Reload the list and try again.")
            }
            RepositoryError::StoreUnavailable(_) => {
                AppError::unavailable("Could not save the product. Please try again.")
            }
        })
    }
}

/// Delete confirmation dialog.
#[derive(Debug, Clone)]
pub struct DeleteConfirm {
    pub id: String,
    pub name: String,
    pub state: ModalState,
}

impl DeleteConfirm {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: ModalState::Open,
        }
    }

    pub fn for_product(product: &Product) -> Self {
        Self::new(product.id.clone(), product.name.clone())
    }

    pub fn submit_label(&self) -> &'static str {
        if self.state == ModalState::Submitting { "Deleting..." } else { "Delete" }
    }

    pub async fn confirm(&mut self, repo: &ProductRepository) -> Result<(), AppError> {
        self.state.begin()?;
        let result = repo.delete(&self.id).await.map_err(|e| {
            warn!(id = %self.id, error = %e, "Delete failed");
            AppError::unavailable("Could not delete the product. Please try again.")
        });
        self.state.settle(result)
    }
}

/// Sign-in dialog. Only the email is kept for re-display.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub state: ModalState,
}

impl LoginForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            state: ModalState::Open,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.state == ModalState::Submitting { "Signing in..." } else { "Sign in" }
    }

    pub async fn submit(
        &mut self,
        auth: &dyn Authenticator,
        password: String,
    ) -> Result<Session, AppError> {
        self.state.begin()?;
        let credentials = Credentials {
            email: self.email.clone(),
            password,
        };
        let result = auth.login(credentials).await.map_err(AppError::from);
        self.state.settle(result)
    }
}

/// Which dialog a page request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Add,
    Edit,
    Delete,
    View,
    Login,
}

impl OverlayKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "add" => Some(OverlayKind::Add),
            "edit" => Some(OverlayKind::Edit),
            "delete" => Some(OverlayKind::Delete),
            "view" => Some(OverlayKind::View),
            "login" => Some(OverlayKind::Login),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OverlayKind::Add => "add",
            OverlayKind::Edit => "edit",
            OverlayKind::Delete => "delete",
            OverlayKind::View => "view",
            OverlayKind::Login => "login",
        }
    }
}

/// The one dialog currently shown over the table, if any.
#[derive(Debug, Clone, Default)]
pub enum Overlay {
    #[default]
    None,
    ProductForm(ProductForm),
    ConfirmDelete(DeleteConfirm),
    Details(Product),
    Login(LoginForm),
}

impl Overlay {
    /// Opens `kind` against the loaded list. Dialogs that need a product
    /// stay closed when `id` is absent or no longer listed.
    pub fn open(kind: Option<OverlayKind>, id: Option<&str>, list: &ListView) -> Self {
        let product = id.and_then(|id| list.find(id));
        match (kind, product) {
            (Some(OverlayKind::Add), _) => Overlay::ProductForm(ProductForm::add()),
            (Some(OverlayKind::Login), _) => Overlay::Login(LoginForm::new("")),
            (Some(OverlayKind::Edit), Some(p)) => Overlay::ProductForm(ProductForm::edit(p)),
            (Some(OverlayKind::Delete), Some(p)) => Overlay::ConfirmDelete(DeleteConfirm::for_product(p)),
            (Some(OverlayKind::View), Some(p)) => Overlay::Details(p.clone()),
            _ => Overlay::None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }
}
