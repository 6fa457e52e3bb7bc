//! Client for the external song-detail API.
//!
//! The API is queried as `GET {api_url}?group=<group>&song=<title>` and answers
//! with release date, lyrics and link for the song.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::CoreError;

/// Details returned by the enrichment API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

/// Source of song details; the server depends on this rather than on HTTP.
#[async_trait]
pub trait SongDetailApi: Send + Sync {
    async fn fetch_detail(&self, group: &str, song: &str) -> Result<SongDetail, CoreError>;
}

pub struct HttpSongDetailClient {
    client: reqwest::Client,
    api_url: String,
}

impl HttpSongDetailClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("song-library/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))?;
        Ok(Self { client, api_url: api_url.into() })
    }
}

/// Only a JSON object is a valid reply; derived structs would also accept an array.
fn decode_detail(body: serde_json::Value) -> Result<SongDetail, CoreError> {
    if !body.is_object() {
        return Err(CoreError::Parse("song detail response is not a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| CoreError::Parse(e.to_string()))
}

#[async_trait]
impl SongDetailApi for HttpSongDetailClient {
    async fn fetch_detail(&self, group: &str, song: &str) -> Result<SongDetail, CoreError> {
        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%group, %song, status = status.as_u16(), "song detail api returned an error");
            return Err(CoreError::Upstream(status.as_u16()));
        }

        let body = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        let detail = decode_detail(body)?;
        debug!(%group, %song, release_date = %detail.release_date, "fetched song detail");
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, response::IntoResponse, response::Response, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn info(Query(q): Query<HashMap<String, String>>) -> Response {
        match (q.get("group").map(String::as_str), q.get("song").map(String::as_str)) {
            (Some("Muse"), Some("Supermassive Black Hole")) => Json(serde_json::json!({
                "releaseDate": "16.07.2006",
                "text": "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?",
                "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
            }))
            .into_response(),
            (Some("broken"), _) => Json(serde_json::json!(["not", "an", "object"])).into_response(),
            (Some("garbled"), _) => ([("content-type", "application/json")], "<html>oops</html>").into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_api() -> anyhow::Result<String> {
        let app = Router::new().route("/info", get(info));
        let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{}/info", addr))
    }

    #[tokio::test]
    async fn fetches_and_decodes_detail() -> anyhow::Result<()> {
        let url = spawn_api().await?;
        let client = HttpSongDetailClient::new(url, Duration::from_secs(5))?;
        let detail = client.fetch_detail("Muse", "Supermassive Black Hole").await?;
        assert_eq!(detail.release_date, "16.07.2006");
        assert_eq!(detail.text.lines().count(), 2);
        assert!(detail.link.starts_with("https://"));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() -> anyhow::Result<()> {
        let url = spawn_api().await?;
        let client = HttpSongDetailClient::new(url, Duration::from_secs(5))?;
        let err = client.fetch_detail("Unknown", "Nothing").await.unwrap_err();
        assert!(matches!(err, CoreError::Upstream(404)));
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_body_is_parse_error() -> anyhow::Result<()> {
        let url = spawn_api().await?;
        let client = HttpSongDetailClient::new(url, Duration::from_secs(5))?;
        let err = client.fetch_detail("broken", "x").await.unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
        let err = client.fetch_detail("garbled", "x").await.unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
        Ok(())
    }

    #[test]
    fn decode_detail_accepts_objects_only() {
        let ok = decode_detail(serde_json::json!({"releaseDate": "2006", "text": "a\nb"})).unwrap();
        assert_eq!(ok.release_date, "2006");
        assert_eq!(ok.link, "");
        assert!(matches!(decode_detail(serde_json::json!(["2006", "a", "b"])), Err(CoreError::Parse(_))));
        assert!(matches!(decode_detail(serde_json::json!("2006")), Err(CoreError::Parse(_))));
        assert!(matches!(decode_detail(serde_json::json!({"text": 5})), Err(CoreError::Parse(_))));
    }
}
