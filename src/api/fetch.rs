// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::payload::{HomeSectionsPayload, SearchPayload};

use super::ContentSource;

/// [`ContentSource`] backed by the two JSON endpoints over HTTP
#[derive(Clone)]
pub struct HttpContentSource<C: HttpClient> {
    client: C,
    config: ApiConfig,
}

impl<C: HttpClient> HttpContentSource<C> {
    pub fn new(client: C, config: ApiConfig) -> Self {
        Self { client, config }
    }
}

/// Append a single query parameter to an endpoint URL
pub fn endpoint_url(base: &str, key: &str, value: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut().append_pair(key, value);
    Ok(url)
}

/// Fetch a URL and decode its JSON body
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: &Url,
) -> Result<T, ApiError> {
    debug!(url = %url, "requesting");

    let response = client
        .get(url.as_str())
        .await
        .map_err(|e| ApiError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(ApiError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| ApiError::DecodeFailed {
        url: url.to_string(),
        source: e,
    })
}

#[async_trait]
impl<C: HttpClient> ContentSource for HttpContentSource<C> {
    async fn fetch_home_sections(&self, page: u32) -> Result<HomeSectionsPayload, ApiError> {
        let url = endpoint_url(&self.config.home_url, "page", &page.to_string())?;
        fetch_json(&self.client, &url).await
    }

    async fn fetch_search_results(&self, query: &str) -> Result<SearchPayload, ApiError> {
        let url = endpoint_url(&self.config.search_url, "query", query)?;
        fetch_json(&self.client, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use crate::http::HttpResponse;

    #[derive(Clone, Default)]
    struct MockHttpClient {
        status: u16,
        body: String,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl MockHttpClient {
        fn responding(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                ..Default::default()
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from(self.body.clone()),
            })
        }
    }

    fn config() -> ApiConfig {
        ApiConfig {
            home_url: "https://api.example.com/home_sections".to_string(),
            search_url: "https://api.example.com/search".to_string(),
            ..Default::default()
        }
    }

    const HOME_BODY: &str = r#"{
        "sections": [{
            "name": "Top Podcasts",
            "type": "square",
            "content_type": "podcast",
            "order": 1,
            "content": [{ "name": "P1", "podcast_id": "1", "episode_count": 10 }]
        }],
        "pagination": { "next_page": "/home_sections?page=3", "total_pages": 5 }
    }"#;

    #[tokio::test]
    async fn home_request_carries_page() {
        let client = MockHttpClient::responding(200, HOME_BODY);
        let source = HttpContentSource::new(client.clone(), config());

        let payload = source.fetch_home_sections(2).await.unwrap();

        assert_eq!(payload.sections.len(), 1);
        assert_eq!(
            client.requested(),
            vec!["https://api.example.com/home_sections?page=2".to_string()]
        );
    }

    #[tokio::test]
    async fn search_query_is_encoded() {
        let client = MockHttpClient::responding(200, r#"{"sections": []}"#);
        let source = HttpContentSource::new(client.clone(), config());

        let payload = source.fetch_search_results("deep work").await.unwrap();

        assert!(payload.sections.is_empty());
        assert_eq!(
            client.requested(),
            vec!["https://api.example.com/search?query=deep+work".to_string()]
        );
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let client = MockHttpClient::responding(500, "oops");
        let source = HttpContentSource::new(client, config());

        let err = source.fetch_home_sections(1).await.unwrap_err();

        assert!(matches!(err, ApiError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let client = MockHttpClient::responding(200, "<html>not json</html>");
        let source = HttpContentSource::new(client, config());

        let err = source.fetch_search_results("ko").await.unwrap_err();

        assert!(matches!(err, ApiError::DecodeFailed { .. }));
    }

    #[tokio::test]
    async fn invalid_base_url_is_rejected() {
        let client = MockHttpClient::responding(200, "{}");
        let source = HttpContentSource::new(
            client.clone(),
            ApiConfig {
                home_url: "not a url".to_string(),
                ..config()
            },
        );

        let err = source.fetch_home_sections(1).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(client.requested().is_empty());
    }

    #[test]
    fn endpoint_url_keeps_existing_query() {
        let url = endpoint_url("https://api.example.com/search?lang=ar", "query", "ko").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/search?lang=ar&query=ko");
    }
}
