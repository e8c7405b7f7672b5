//! HTTP implementation of [`NavbarService`] over reqwest.
//!
//! Endpoints, relative to the configured base URL:
//!
//! ```text
//! GET    navbar/getAll        -> [NavbarRecord]
//! POST   navbar/post          multipart(logo?, logoText, buttonText)
//! PUT    navbar/update/{id}   multipart(logo?, logoText, buttonText)
//! DELETE navbar/delete/{id}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::multipart::{Form, Part};

use super::service::{NavbarService, ServiceError};
use super::types::{NavbarForm, NavbarRecord, extract_error_message, parse_saved_record};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Navbar collection served by a REST backend.
pub struct HttpNavbarService {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpNavbarService {
    /// Builds a client for `base_url`. A trailing slash is optional.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::Config(format!(
                "base URL cannot carry paths: {base_url}"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        info!("Navbar service at {}", base_url);
        Ok(Self { base_url, client })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::Config(format!("base URL cannot carry paths: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder, label: &str) -> Result<String, ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} response status: {}", label, status);

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("{} failed: {} - {}", label, status, body);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }
        Ok(body)
    }

    async fn save(
        &self,
        request: reqwest::RequestBuilder,
        form: NavbarForm,
        label: &str,
    ) -> Result<Option<NavbarRecord>, ServiceError> {
        info!(
            "{}: logo={}, logo_text_len={}, button_text_len={}",
            label,
            form.logo.as_ref().map_or("none", |l| l.file_name.as_str()),
            form.logo_text.len(),
            form.button_text.len()
        );
        let body = self.send(request.multipart(to_multipart(form)?), label).await?;
        let record = parse_saved_record(&body);
        if record.is_none() {
            debug!("{} body was not a record: {}", label, body);
        }
        Ok(record)
    }
}

/// Builds the multipart body. The logo part is omitted when no file is selected.
fn to_multipart(form: NavbarForm) -> Result<Form, ServiceError> {
    let mut multipart = Form::new();
    if let Some(logo) = form.logo {
        let part = Part::bytes(logo.bytes)
            .file_name(logo.file_name)
            .mime_str(&logo.content_type)
            .map_err(|e| ServiceError::Config(format!("invalid logo content type: {e}")))?;
        multipart = multipart.part("logo", part);
    }
    Ok(multipart
        .text("logoText", form.logo_text)
        .text("buttonText", form.button_text))
}

#[async_trait]
impl NavbarService for HttpNavbarService {
    fn name(&self) -> &str {
        "http"
    }

    async fn list(&self) -> Result<Vec<NavbarRecord>, ServiceError> {
        let url = self.endpoint(&["navbar", "getAll"])?;
        let body = self.send(self.client.get(url), "List navbars").await?;
        let records: Vec<NavbarRecord> =
            serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))?;
        info!("Fetched {} navbar records", records.len());
        Ok(records)
    }

    async fn create(&self, form: NavbarForm) -> Result<Option<NavbarRecord>, ServiceError> {
        let url = self.endpoint(&["navbar", "post"])?;
        self.save(self.client.post(url), form, "Create navbar").await
    }

    async fn update(
        &self,
        id: &str,
        form: NavbarForm,
    ) -> Result<Option<NavbarRecord>, ServiceError> {
        let url = self.endpoint(&["navbar", "update", id])?;
        self.save(self.client.put(url), form, "Update navbar").await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["navbar", "delete", id])?;
        self.send(self.client.delete(url), "Delete navbar").await?;
        info!("Deleted navbar {}", id);
        Ok(())
    }
}
