use super::Backend;
use crate::error::{MenuboardError, Result};
use crate::form::{CategoryPayload, MenuPayload};
use crate::model::{Category, MenuItem};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const FALLBACK_ERROR: &str = "Server error";

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    success: bool,
    #[serde(default)]
    categories: Option<Vec<Category>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MenusResponse {
    success: bool,
    #[serde(default)]
    menus: Option<Vec<MenuItem>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Picks the message out of an error response body.
fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
        return error;
    }
    match parsed.detail {
        Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail,
        Some(serde_json::Value::Null) | None => FALLBACK_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

fn application_error(error: Option<String>) -> MenuboardError {
    MenuboardError::Application(error.unwrap_or_else(|| FALLBACK_ERROR.to_string()))
}

/// Client for the menu REST API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let message = error_message(&body);
            warn!(status = status.as_u16(), %message, "request failed");
            return Err(MenuboardError::Server {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "unexpected response body");
            MenuboardError::InvalidResponse
        })
    }

    fn send_status(&self, request: RequestBuilder) -> Result<()> {
        let response: StatusResponse = self.send(request)?;
        if response.success {
            Ok(())
        } else {
            Err(application_error(response.error))
        }
    }

    fn send_json<P: Serialize>(&self, request: RequestBuilder, payload: &P) -> Result<()> {
        self.send_status(request.json(payload))
    }
}

impl Backend for HttpBackend {
    #[instrument(skip(self))]
    fn list_categories(&self) -> Result<Vec<Category>> {
        let response: CategoriesResponse = self.send(self.client.get(self.url("categories")))?;
        match (response.success, response.categories) {
            (true, Some(categories)) => {
                debug!(count = categories.len(), "categories fetched");
                Ok(categories)
            }
            (true, None) => Err(MenuboardError::InvalidResponse),
            (false, _) => Err(application_error(response.error)),
        }
    }

    #[instrument(skip(self))]
    fn list_menus(&self) -> Result<Vec<MenuItem>> {
        let response: MenusResponse = self.send(self.client.get(self.url("menus")))?;
        match (response.success, response.menus) {
            (true, Some(menus)) => {
                debug!(count = menus.len(), "menus fetched");
                Ok(menus)
            }
            (true, None) => Err(MenuboardError::InvalidResponse),
            (false, _) => Err(application_error(response.error)),
        }
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    fn create_category(&mut self, payload: &CategoryPayload) -> Result<()> {
        self.send_json(self.client.post(self.url("categories")), payload)
    }

    #[instrument(skip(self, payload))]
    fn update_category(&mut self, id: &str, payload: &CategoryPayload) -> Result<()> {
        let url = self.url(&format!("categories/{}", id));
        self.send_json(self.client.put(url), payload)
    }

    #[instrument(skip(self))]
    fn delete_category(&mut self, id: &str) -> Result<()> {
        let url = self.url(&format!("categories/{}", id));
        self.send_status(self.client.delete(url))
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    fn create_menu(&mut self, payload: &MenuPayload) -> Result<()> {
        self.send_json(self.client.post(self.url("menus")), payload)
    }

    #[instrument(skip(self, payload))]
    fn update_menu(&mut self, id: &str, payload: &MenuPayload) -> Result<()> {
        let url = self.url(&format!("menus/{}", id));
        self.send_json(self.client.put(url), payload)
    }

    #[instrument(skip(self))]
    fn delete_menu(&mut self, id: &str) -> Result<()> {
        let url = self.url(&format!("menus/{}", id));
        self.send_status(self.client.delete(url))
    }

    #[instrument(skip(self, file), fields(file = %file.display()))]
    fn upload_image(&mut self, file: &Path) -> Result<String> {
        let form = multipart::Form::new().file("image", file)?;
        let response: UploadResponse =
            self.send(self.client.post(self.url("upload")).multipart(form))?;
        match (response.success, response.image_path) {
            (true, Some(path)) => {
                debug!(%path, "image uploaded");
                Ok(path)
            }
            (true, None) => Err(MenuboardError::InvalidResponse),
            (false, _) => Err(application_error(response.error)),
        }
    }
}
