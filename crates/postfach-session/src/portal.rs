//! Portal transport

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use crate::error::SessionError;
use crate::form::{FormMethod, FormSubmission};
use crate::page::Page;
use crate::Result;

/// A browsing context that can load pages and submit forms.
///
/// Implementations keep their own cookie state; callers only see pages.
/// Non-2xx responses are returned as pages, transport failures as errors.
#[async_trait]
pub trait Portal: Send + Sync {
    async fn navigate(&self, url: &Url) -> Result<Page>;

    async fn submit(&self, form: &FormSubmission) -> Result<Page>;
}

/// Cookie-keeping HTTP session against the live portal
pub struct HttpPortal {
    client: reqwest::Client,
}

impl HttpPortal {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::limited(10))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SessionError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Page> {
        let response = request
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        let url = response.url().clone();
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        tracing::trace!(url = %url, status, bytes = body.len(), "Loaded page");

        Ok(Page::new(url, status, body.to_vec()))
    }
}

#[async_trait]
impl Portal for HttpPortal {
    async fn navigate(&self, url: &Url) -> Result<Page> {
        self.send(self.client.get(url.clone())).await
    }

    async fn submit(&self, form: &FormSubmission) -> Result<Page> {
        let request = match form.method {
            FormMethod::Get => self.client.get(form.action.clone()).query(&form.fields),
            FormMethod::Post => self.client.post(form.action.clone()).form(&form.fields),
        };

        self.send(request).await
    }
}
