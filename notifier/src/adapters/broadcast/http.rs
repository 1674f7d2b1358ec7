//! HTTP broadcaster
//!
//! Publishes count updates to an external message bus over HTTP. The bus is
//! expected to accept `POST {base_url}/publish` with a JSON body of
//! `{"channel": .., "data": .., "user_ids": [..]}` and deliver the data only
//! to the listed users.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::domain::entities::{CountPayload, UserId};
use crate::domain::ports::CountBroadcaster;
use crate::error::BroadcastError;

/// Request body for the message bus publish endpoint
#[derive(Serialize)]
struct PublishRequest<'a> {
    channel: &'a str,
    data: &'a CountPayload,
    user_ids: &'a [UserId],
}

/// Implementation of the count broadcaster over HTTP
pub struct HttpBroadcaster {
    http: Client,
    base_url: String,
}

impl HttpBroadcaster {
    pub fn new(base_url: &str, api_key: Option<&str>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", key))
                    .context("Invalid broadcast API key format")?,
            );
        }

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn publish_url(&self) -> String {
        format!("{}/publish", self.base_url)
    }

    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
    ) -> Result<(), BroadcastError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(BroadcastError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl CountBroadcaster for HttpBroadcaster {
    async fn publish(
        &self,
        channel: &str,
        payload: &CountPayload,
        user_ids: &[UserId],
    ) -> Result<(), BroadcastError> {
        let body = serde_json::to_vec(&PublishRequest {
            channel,
            data: payload,
            user_ids,
        })?;

        let resp = self
            .http
            .post(self.publish_url())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        self.handle_empty_response(resp).await
    }
}
