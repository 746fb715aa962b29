use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::app::{ContentError, Result};
use crate::transport::{Method, Transport};

pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// `api_base_path` must be an absolute URL; endpoints are joined onto it.
    pub fn new(api_base_path: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(api_base_path)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent("cukraren/0.1.0")
            .build()?;

        Ok(Self { client, base })
    }

    pub fn url_for(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base.join(endpoint.trim_start_matches('/'))?)
    }

    fn reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn check_status(response: &Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ContentError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn read(&self, endpoint: &str) -> Result<Value> {
        let url = self.url_for(endpoint)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        Self::check_status(&response)?;
        Ok(response.json::<Value>().await?)
    }

    async fn write(&self, endpoint: &str, method: Method, body: &Value) -> Result<Value> {
        let url = self.url_for(endpoint)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(Self::reqwest_method(method), url);
        request = if method == Method::Get {
            request.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        } else {
            request.json(body)
        };

        let response = request.send().await?;
        Self::check_status(&response)?;

        // 204 and other empty replies echo what was sent
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(body.clone());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base_rejected() {
        let result = HttpTransport::new("/api/", Duration::from_secs(1));
        assert!(matches!(result, Err(ContentError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_for_joins_under_base() {
        let transport =
            HttpTransport::new("https://cukrarenjanka.sk/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            transport.url_for("produkty.json").unwrap().as_str(),
            "https://cukrarenjanka.sk/api/produkty.json"
        );
        assert_eq!(
            transport.url_for("/novinky.json").unwrap().as_str(),
            "https://cukrarenjanka.sk/api/novinky.json"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport =
            HttpTransport::new("http://127.0.0.1:9/api/", Duration::from_secs(1)).unwrap();
        let result = transport.read("produkty.json").await;
        assert!(matches!(result, Err(ContentError::Http(_))));
    }
}
