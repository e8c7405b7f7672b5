//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::api::{NavbarForm, NavbarRecord, NavbarService, ServiceError};

/// A record with a small PNG data URI as its logo.
pub fn record(id: &str, logo_text: &str, button_text: &str) -> NavbarRecord {
    NavbarRecord {
        id: id.to_string(),
        logo: Some("data:image/png;base64,AAAA".to_string()),
        logo_text: logo_text.to_string(),
        button_text: button_text.to_string(),
    }
}

/// One call made against [`MemoryService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create,
    Update(String),
    Delete(String),
}

#[derive(Default)]
struct Inner {
    records: Vec<NavbarRecord>,
    calls: Vec<Call>,
    last_form: Option<NavbarForm>,
    fail_next: Option<ServiceError>,
    next_id: u32,
}

/// An in-memory navbar collection that records every call.
#[derive(Default)]
pub struct MemoryService {
    inner: Mutex<Inner>,
}

impl MemoryService {
    pub fn with_records(records: Vec<NavbarRecord>) -> Self {
        let service = Self::default();
        service.inner.lock().unwrap().records = records;
        service
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn last_form(&self) -> Option<NavbarForm> {
        self.inner.lock().unwrap().last_form.clone()
    }

    /// Makes the next call fail with `err`, whatever it is.
    pub fn fail_next(&self, err: ServiceError) {
        self.inner.lock().unwrap().fail_next = Some(err);
    }

    fn begin(&self, call: Call) -> Result<std::sync::MutexGuard<'_, Inner>, ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        match inner.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(inner),
        }
    }
}

fn apply(record: &mut NavbarRecord, form: &NavbarForm) {
    record.logo_text = form.logo_text.clone();
    record.button_text = form.button_text.clone();
    if let Some(logo) = &form.logo {
        record.logo = Some(format!(
            "data:{};base64,{}",
            logo.content_type,
            STANDARD.encode(&logo.bytes)
        ));
    }
}

#[async_trait]
impl NavbarService for MemoryService {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<NavbarRecord>, ServiceError> {
        let inner = self.begin(Call::List)?;
        Ok(inner.records.clone())
    }

    async fn create(&self, form: NavbarForm) -> Result<Option<NavbarRecord>, ServiceError> {
        let mut inner = self.begin(Call::Create)?;
        inner.next_id += 1;
        let mut record = NavbarRecord {
            id: format!("mem-{}", inner.next_id),
            logo: None,
            logo_text: String::new(),
            button_text: String::new(),
        };
        apply(&mut record, &form);
        inner.records.push(record.clone());
        inner.last_form = Some(form);
        Ok(Some(record))
    }

    async fn update(
        &self,
        id: &str,
        form: NavbarForm,
    ) -> Result<Option<NavbarRecord>, ServiceError> {
        let mut inner = self.begin(Call::Update(id.to_string()))?;
        let updated = match inner.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                apply(record, &form);
                record.clone()
            }
            None => {
                return Err(ServiceError::Api {
                    status: 404,
                    message: Some("Navbar not found".to_string()),
                });
            }
        };
        inner.last_form = Some(form);
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut inner = self.begin(Call::Delete(id.to_string()))?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(ServiceError::Api {
                status: 404,
                message: None,
            });
        }
        Ok(())
    }
}
