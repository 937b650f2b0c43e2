//! Server API Types
//!
//! Request and response types for the REST API. Every handled outcome is
//! answered with HTTP 200 and a boolean `ok` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use oldest_finder_core::{Candidate, DebugReport, LookupError, OldestGame};

// ============== Lookup Types ==============

#[derive(Debug, Default)]
pub struct OldestRequest {
    pub q: Value,
}

impl OldestRequest {
    /// Read `q` from a decoded body. Anything but an object carries no query.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut map) => Self {
                q: map.remove("q").unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }

    /// The query as text. Scalars are rendered, anything else is empty.
    pub fn query_text(&self) -> String {
        match &self.q {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OldestResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub game: OldestGame,
}

impl From<OldestGame> for OldestResponse {
    fn from(game: OldestGame) -> Self {
        Self { ok: true, game }
    }
}

// ============== Debug Types ==============

#[derive(Debug, Default, Deserialize)]
pub struct DebugQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub ok: bool,
    pub status: u16,
    pub search_url: String,
    pub top_level_keys: Option<Vec<String>>,
    pub preview_count: usize,
    pub preview: Vec<Candidate>,
}

impl From<DebugReport> for DebugResponse {
    fn from(report: DebugReport) -> Self {
        Self {
            ok: true,
            status: report.status,
            search_url: report.search_url,
            top_level_keys: report.top_level_keys,
            preview_count: report.preview.len(),
            preview: report.preview,
        }
    }
}

// ============== Error Types ==============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_titles: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            sample_titles: None,
        }
    }

    pub fn with_sample_titles(mut self, titles: Vec<String>) -> Self {
        self.sample_titles = Some(titles);
        self
    }
}

impl From<LookupError> for ErrorResponse {
    fn from(error: LookupError) -> Self {
        let response = ErrorResponse::new(error.to_string());
        match error {
            LookupError::NoMatchingTitles { sample_titles } => {
                response.with_sample_titles(sample_titles)
            }
            _ => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oldest_finder_core::UpstreamError;
    use serde_json::json;

    #[test]
    fn query_text_renders_scalars() {
        let request = OldestRequest::from_body(json!({"q": " obby "}));
        assert_eq!(request.query_text(), " obby ");

        let request = OldestRequest::from_body(json!({"q": 1337}));
        assert_eq!(request.query_text(), "1337");

        let request = OldestRequest::from_body(json!({}));
        assert_eq!(request.query_text(), "");

        let request = OldestRequest::from_body(json!({"q": ["a"]}));
        assert_eq!(request.query_text(), "");
    }

    #[test]
    fn non_object_bodies_carry_no_query() {
        assert_eq!(OldestRequest::from_body(json!([1])).query_text(), "");
        assert_eq!(OldestRequest::from_body(json!("obby")).query_text(), "");
        assert_eq!(OldestRequest::from_body(Value::Null).query_text(), "");
    }

    #[test]
    fn success_response_flattens_the_game() {
        let response = OldestResponse::from(OldestGame {
            place_id: 1818,
            name: "Classic Crossroads".to_string(),
            creator: "Roblox".to_string(),
            created: "2007-05-01T01:07:04.78Z".to_string(),
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "ok": true,
                "placeId": 1818,
                "name": "Classic Crossroads",
                "creator": "Roblox",
                "created": "2007-05-01T01:07:04.78Z"
            })
        );
    }

    #[test]
    fn error_response_includes_samples_only_when_present() {
        let response = ErrorResponse::from(LookupError::Search(UpstreamError::Status(500)));
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"ok": false, "error": "Roblox search error: 500"})
        );

        let response = ErrorResponse::from(LookupError::NoMatchingTitles {
            sample_titles: vec!["Tycoon".to_string()],
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "ok": false,
                "error": "No matching titles in results",
                "sampleTitles": ["Tycoon"]
            })
        );
    }

    #[test]
    fn debug_response_counts_preview() {
        let response = DebugResponse::from(DebugReport {
            status: 200,
            search_url: "https://search.test/".to_string(),
            top_level_keys: None,
            preview: vec![Candidate {
                name: "Obby".to_string(),
                place_id: None,
                universe_id: Some(4),
            }],
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "ok": true,
                "status": 200,
                "searchUrl": "https://search.test/",
                "topLevelKeys": null,
                "previewCount": 1,
                "preview": [{"name": "Obby", "placeId": null, "universeId": 4}]
            })
        );
    }
}
