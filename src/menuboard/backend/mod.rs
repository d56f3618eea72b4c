//! # API Collaborator
//!
//! The screens never talk to the network directly. They go through the
//! [`Backend`] trait, which mirrors the menu REST API one method per endpoint.
//!
//! ## Implementations
//!
//! - [`http::HttpBackend`]: the production client for a running API server.
//! - [`memory::InMemoryBackend`]: keeps records in memory and mimics the
//!   server's rules (generated ids, menu counts per category, refusing to
//!   delete a category that still has items). Used by tests.
//!
//! ## Error Contract
//!
//! - `success: false` becomes [`MenuboardError::Application`] carrying the
//!   server's `error` message.
//! - A non-2xx response becomes [`MenuboardError::Server`] with the body's
//!   `error` or `detail` field, or `Server error`.
//! - Network failures surface as [`MenuboardError::Http`].
//!
//! Callers attach the attempted action with [`MenuboardError::during`].
//!
//! [`MenuboardError::Application`]: crate::error::MenuboardError::Application
//! [`MenuboardError::Server`]: crate::error::MenuboardError::Server
//! [`MenuboardError::Http`]: crate::error::MenuboardError::Http
//! [`MenuboardError::during`]: crate::error::MenuboardError::during

use crate::error::Result;
use crate::form::{CategoryPayload, MenuPayload};
use crate::model::{Category, MenuItem};
use std::path::Path;

pub mod http;
pub mod memory;

pub trait Backend {
    /// `GET /categories`
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// `GET /menus`
    fn list_menus(&self) -> Result<Vec<MenuItem>>;

    /// `POST /categories`
    fn create_category(&mut self, payload: &CategoryPayload) -> Result<()>;

    /// `PUT /categories/{id}`
    fn update_category(&mut self, id: &str, payload: &CategoryPayload) -> Result<()>;

    /// `DELETE /categories/{id}`
    fn delete_category(&mut self, id: &str) -> Result<()>;

    /// `POST /menus`
    fn create_menu(&mut self, payload: &MenuPayload) -> Result<()>;

    /// `PUT /menus/{id}`
    fn update_menu(&mut self, id: &str, payload: &MenuPayload) -> Result<()>;

    /// `DELETE /menus/{id}`
    fn delete_menu(&mut self, id: &str) -> Result<()>;

    /// `POST /upload`, returning the stored image path.
    fn upload_image(&mut self, file: &Path) -> Result<String>;
}
