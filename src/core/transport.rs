use crate::core::{ConfigProvider, Transport};
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Plain GET over reqwest. One request per call, no retries, and no headers
/// beyond the client defaults unless a user agent is configured.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout());

        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // Error bodies are never handed to the parser.
        if !status.is_success() {
            return Err(MapError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes", body.len());
        Ok(body.to_vec())
    }
}
