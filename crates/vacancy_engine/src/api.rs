use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;
use vacancy_core::raw::{RawIndustryGroup, RawSearchResponse};
use vacancy_core::SearchRequest;
use vacancy_logging::vacancy_debug;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: String,
    pub access_token: Option<String>,
    pub per_page: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.hh.ru/".to_string(),
            user_agent: format!("vacancy_search/{}", env!("CARGO_PKG_VERSION")),
            access_token: None,
            per_page: 20,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait VacancyApi: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, FetchError>;

    async fn industries(&self) -> Result<Vec<RawIndustryGroup>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestVacancyApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestVacancyApi {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn search_url(&self, request: &SearchRequest) -> Result<Url, FetchError> {
        let mut url = self.endpoint("vacancies")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("text", &request.query)
                .append_pair("page", &request.page.to_string())
                .append_pair("per_page", &self.settings.per_page.to_string());
            if let Some(industry) = &request.industry_id {
                pairs.append_pair("industry", industry);
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        vacancy_debug!("GET {}", url);
        let mut builder = self
            .client
            .get(url)
            .header("HH-User-Agent", &self.settings.user_agent);
        if let Some(token) = &self.settings.access_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl VacancyApi for ReqwestVacancyApi {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, FetchError> {
        let url = self.search_url(request)?;
        self.get_json(url).await
    }

    async fn industries(&self) -> Result<Vec<RawIndustryGroup>, FetchError> {
        let url = self.endpoint("industries")?;
        self.get_json(url).await
    }
}

/// Parses the base URL; a trailing slash keeps `join` from dropping the last segment.
fn parse_base(raw: &str) -> Result<Url, FetchError> {
    let mut base =
        Url::parse(raw).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be a base url"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> ReqwestVacancyApi {
        ReqwestVacancyApi::new(ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn search_url_carries_query_paging_and_filter() {
        let request = SearchRequest {
            query: "rust developer".to_string(),
            industry_id: Some("7.540".to_string()),
            page: 2,
        };
        let url = api("https://api.example.com/v1").search_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/vacancies?text=rust+developer&page=2&per_page=20&industry=7.540"
        );
    }

    #[test]
    fn search_url_omits_missing_filter() {
        let request = SearchRequest {
            query: "go".to_string(),
            industry_id: None,
            page: 0,
        };
        let url = api("https://api.example.com/").search_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/vacancies?text=go&page=0&per_page=20"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestVacancyApi::new(ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
