//! Catalog page: list state, modal dialogs and HTML rendering.

pub mod format;
pub mod html;
pub mod list;
pub mod overlay;
