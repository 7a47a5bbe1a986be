//! HTTP Entity Writer - Implementation of EntityWriter against REST mutation endpoints.
//!
//! `POST <base>/<resource>` creates, `PUT <base>/<resource>/{id}` updates,
//! `DELETE <base>/<resource>/{id}` deletes. Create and update return the
//! server's representation of the entity, which callers feed into the
//! list store's optimistic `Insert`/`Replace` operations.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::ports::{EntityWriter, FetchError, SessionContext};

/// HTTP implementation of the entity writer port.
///
/// Entity ids are rendered into the URL path, so they are plain strings
/// at this boundary; typed ids format themselves via `Display` upstream.
pub struct HttpEntityWriter<T> {
    base_url: String,
    resource: String,
    timeout: Duration,
    client: Client,
    session: Arc<dyn SessionContext>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpEntityWriter<T> {
    /// Creates a writer for one resource's mutation endpoints.
    pub fn new(
        base_url: impl Into<String>,
        resource: impl Into<String>,
        timeout: Duration,
        session: Arc<dyn SessionContext>,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            resource: resource.into(),
            timeout,
            client,
            session,
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.resource)
    }

    fn entity_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn authorized(&self, method: Method, url: String) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    fn map_request_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout.as_secs() as u32,
            }
        } else if err.is_connect() {
            FetchError::transport(format!("Connection failed: {}", err))
        } else {
            FetchError::transport(err.to_string())
        }
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<reqwest::Response, FetchError> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(FetchError::server(status.as_u16(), detail));
        }
        Ok(response)
    }
}

#[async_trait]
impl<T> EntityWriter<T> for HttpEntityWriter<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    type Id = String;

    async fn create<P: Serialize + Send + Sync>(&self, payload: &P) -> Result<T, FetchError> {
        let builder = self
            .authorized(Method::POST, self.collection_url())
            .json(payload);
        let response = self.send_checked(builder).await?;
        response
            .json()
            .await
            .map_err(|e| FetchError::transport(format!("response body could not be decoded: {}", e)))
    }

    async fn update<P: Serialize + Send + Sync>(
        &self,
        id: &String,
        payload: &P,
    ) -> Result<T, FetchError> {
        let builder = self
            .authorized(Method::PUT, self.entity_url(id))
            .json(payload);
        let response = self.send_checked(builder).await?;
        response
            .json()
            .await
            .map_err(|e| FetchError::transport(format!("response body could not be decoded: {}", e)))
    }

    async fn delete(&self, id: &String) -> Result<(), FetchError> {
        let builder = self.authorized(Method::DELETE, self.entity_url(id));
        self.send_checked(builder).await?;
        Ok(())
    }
}
