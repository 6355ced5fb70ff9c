//! HTTP operation invoker

use super::types::{JsonRequest, JsonResponse};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::loader::OperationDefinition;
use crate::pagination::OperationInvoker;
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Invokes a described operation over HTTP, one call per page
#[derive(Debug, Clone)]
pub struct HttpOperation {
    client: HttpClient,
    name: String,
    path: String,
    method: Method,
    cursor_path: String,
    items_path: String,
}

impl HttpOperation {
    /// Build the invoker for an operation definition
    pub fn from_definition(def: &OperationDefinition) -> Result<Self> {
        let mut builder = HttpClientConfig::builder()
            .base_url(def.base_url.clone())
            .timeout(Duration::from_secs(def.timeout_secs));
        for (key, value) in &def.headers {
            builder = builder.header(key, value);
        }
        let client = HttpClient::with_config(builder.build())?;

        Ok(Self {
            client,
            name: def.name.clone(),
            path: def.path.clone(),
            method: def.method,
            cursor_path: def.pagination.cursor_path.clone(),
            items_path: def.items_path.clone(),
        })
    }

    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn request_config(&self, request: &JsonRequest) -> RequestConfig {
        let mut config = RequestConfig::new();
        if self.method.uses_query() {
            for (key, value) in request.params() {
                config = config.query(key, query_value(value));
            }
        } else {
            config = config.json(request.to_value());
        }

        config
    }
}

/// Render a parameter for the query string; strings go unquoted
fn query_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl OperationInvoker<JsonRequest> for HttpOperation {
    type Response = JsonResponse;
    type Error = Error;

    async fn invoke(&self, request: &JsonRequest) -> Result<JsonResponse> {
        debug!(
            operation = %self.name,
            cursor = request.cursor(),
            "Invoking operation"
        );

        let config = self.request_config(request);
        let body: JsonValue = self
            .client
            .request_json(self.method.into(), &self.path, config)
            .await?;

        Ok(JsonResponse::new(
            body,
            self.cursor_path.clone(),
            self.items_path.clone(),
        ))
    }
}
