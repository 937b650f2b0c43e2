//! Roblox upstream APIs
//!
//! [`RobloxApi`] is the seam between the lookup pipeline and the network.
//! [`HttpRobloxApi`] talks to the real endpoints with reqwest.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::fields::as_id;

/// Raw outcome of a search call, whatever its status
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub status: u16,
    pub url: String,
    /// Decoded body, or `None` when it was not valid JSON
    pub document: Option<Value>,
}

impl SearchPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait RobloxApi: Send + Sync {
    /// Run a free-text omni-search
    async fn search(&self, query: &str) -> Result<SearchPage, UpstreamError>;

    /// Translate a place id into its universe id
    async fn universe_for_place(&self, place_id: u64) -> Result<u64, UpstreamError>;

    /// Fetch game detail objects for a batch of universe ids.
    ///
    /// A body that cannot be decoded yields an empty batch.
    async fn game_details(&self, universe_ids: &[u64]) -> Result<Vec<Value>, UpstreamError>;
}

/// Decode a body as JSON, treating malformed input as "no data"
pub fn decode_or_none(body: &str) -> Option<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("[RobloxApi] Discarding undecodable body: {}", e);
            None
        }
    }
}

/// The `data` array of a games response, or nothing
fn games_batch(document: Option<Value>) -> Vec<Value> {
    match document {
        Some(Value::Object(mut map)) => match map.remove("data") {
            Some(Value::Array(games)) => games,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

pub struct HttpRobloxApi {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpRobloxApi {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn search_url(&self, query: &str) -> Result<url::Url, UpstreamError> {
        Ok(url::Url::parse_with_params(
            &self.config.search_url,
            &[("searchQuery", query), ("sessionId", "0"), ("pageType", "all")],
        )?)
    }

    fn universe_url(&self, place_id: u64) -> Result<url::Url, UpstreamError> {
        Ok(url::Url::parse(&format!(
            "{}/{}/universe",
            self.config.universe_url, place_id
        ))?)
    }

    fn games_url(&self, universe_ids: &[u64]) -> Result<url::Url, UpstreamError> {
        let ids = universe_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Ok(url::Url::parse_with_params(
            &self.config.games_url,
            &[("universeIds", ids)],
        )?)
    }
}

#[async_trait]
impl RobloxApi for HttpRobloxApi {
    async fn search(&self, query: &str) -> Result<SearchPage, UpstreamError> {
        let url = self.search_url(query)?;
        log::debug!("[RobloxApi] Searching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(SearchPage {
            status,
            url: url.to_string(),
            document: decode_or_none(&body),
        })
    }

    async fn universe_for_place(&self, place_id: u64) -> Result<u64, UpstreamError> {
        let url = self.universe_url(place_id)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        decode_or_none(&body)
            .as_ref()
            .and_then(|document| document.get("universeId"))
            .and_then(as_id)
            .ok_or_else(|| {
                UpstreamError::Decode(format!("no universeId for place {}", place_id))
            })
    }

    async fn game_details(&self, universe_ids: &[u64]) -> Result<Vec<Value>, UpstreamError> {
        let url = self.games_url(universe_ids)?;
        log::debug!("[RobloxApi] Fetching game details {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        Ok(games_batch(decode_or_none(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::time::Duration;

    fn api_for(server: &Server) -> HttpRobloxApi {
        let base = server.url();
        HttpRobloxApi::new(UpstreamConfig {
            search_url: format!("{}/search-api/omni-search", base),
            universe_url: format!("{}/universes/v1/places", base),
            games_url: format!("{}/v1/games", base),
            timeout: Duration::from_secs(5),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn decode_or_none_swallows_malformed_json() {
        assert_eq!(decode_or_none("{\"a\":1}"), Some(json!({"a": 1})));
        assert_eq!(decode_or_none("<html>rate limited</html>"), None);
        assert_eq!(decode_or_none(""), None);
    }

    #[test]
    fn games_batch_requires_data_array() {
        assert_eq!(games_batch(Some(json!({"data": [{"id": 1}]}))).len(), 1);
        assert!(games_batch(Some(json!({"data": {"id": 1}}))).is_empty());
        assert!(games_batch(Some(json!([{"id": 1}]))).is_empty());
        assert!(games_batch(None).is_empty());
    }

    #[tokio::test]
    async fn search_sends_expected_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search-api/omni-search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("searchQuery".into(), "pizza place".into()),
                Matcher::UrlEncoded("sessionId".into(), "0".into()),
                Matcher::UrlEncoded("pageType".into(), "all".into()),
            ]))
            .match_header("user-agent", "oldest-game-finder/1.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"searchResults": []}"#)
            .create_async()
            .await;

        let page = api_for(&server).search("pizza place").await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.status, 200);
        assert!(page.is_success());
        assert_eq!(page.document, Some(json!({"searchResults": []})));
        assert!(page.url.contains("searchQuery=pizza+place"));
    }

    #[tokio::test]
    async fn search_reports_status_and_tolerates_bad_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search-api/omni-search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let page = api_for(&server).search("obby").await.unwrap();

        assert_eq!(page.status, 500);
        assert!(!page.is_success());
        assert!(page.document.is_none());
    }

    #[tokio::test]
    async fn universe_lookup_reads_universe_id() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/universes/v1/places/1818/universe")
            .with_status(200)
            .with_body(r#"{"universeId": 13058}"#)
            .create_async()
            .await;

        let universe = api_for(&server).universe_for_place(1818).await;
        assert_eq!(universe, Ok(13058));
    }

    #[tokio::test]
    async fn universe_lookup_fails_on_status_and_missing_field() {
        let mut server = Server::new_async().await;
        let _missing = server
            .mock("GET", "/universes/v1/places/1/universe")
            .with_status(404)
            .create_async()
            .await;
        let _empty = server
            .mock("GET", "/universes/v1/places/2/universe")
            .with_status(200)
            .with_body(r#"{"universeId": null}"#)
            .create_async()
            .await;

        let api = api_for(&server);
        assert_eq!(
            api.universe_for_place(1).await,
            Err(UpstreamError::Status(404))
        );
        assert!(matches!(
            api.universe_for_place(2).await,
            Err(UpstreamError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn game_details_joins_ids_and_returns_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/games")
            .match_query(Matcher::UrlEncoded("universeIds".into(), "10,20".into()))
            .with_status(200)
            .with_body(r#"{"data": [{"id": 10}, {"id": 20}]}"#)
            .create_async()
            .await;

        let games = api_for(&server).game_details(&[10, 20]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(games, vec![json!({"id": 10}), json!({"id": 20})]);
    }

    #[tokio::test]
    async fn game_details_status_is_an_error_but_bad_body_is_empty() {
        let mut server = Server::new_async().await;
        let _failing = server
            .mock("GET", "/v1/games")
            .match_query(Matcher::UrlEncoded("universeIds".into(), "1".into()))
            .with_status(503)
            .create_async()
            .await;
        let _garbled = server
            .mock("GET", "/v1/games")
            .match_query(Matcher::UrlEncoded("universeIds".into(), "2".into()))
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let api = api_for(&server);
        assert_eq!(
            api.game_details(&[1]).await,
            Err(UpstreamError::Status(503))
        );
        assert_eq!(api.game_details(&[2]).await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn unanswered_request_times_out() {
        // Accepts connections and holds them open without ever replying
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let api = HttpRobloxApi::new(UpstreamConfig {
            search_url: format!("http://{}/search-api/omni-search", addr),
            universe_url: format!("http://{}/universes/v1/places", addr),
            games_url: format!("http://{}/v1/games", addr),
            timeout: Duration::from_millis(200),
            ..UpstreamConfig::default()
        })
        .unwrap();

        assert_eq!(
            api.universe_for_place(1).await,
            Err(UpstreamError::Timeout)
        );
        assert_eq!(api.game_details(&[1]).await, Err(UpstreamError::Timeout));
    }
}
