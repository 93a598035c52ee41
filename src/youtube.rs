//! YouTube Data API v3 access: the search and statistics calls the report is built from.

use clap::ValueEnum;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest page/batch size the API accepts for both search and videos.list.
pub const MAX_RESULTS: usize = 50;

/// Ordering requested from `search.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchOrder {
    #[value(name = "viewCount")]
    ViewCount,
    Date,
    Rating,
    Title,
}

impl SearchOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOrder::ViewCount => "viewCount",
            SearchOrder::Date => "date",
            SearchOrder::Rating => "rating",
            SearchOrder::Title => "title",
        }
    }
}

/// One `search.list` request.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    pub channel_id: &'a str,
    pub order: SearchOrder,
    pub published_before: Option<&'a str>,
    pub published_after: Option<&'a str>,
    pub page_token: Option<&'a str>,
}

/// A search hit; the title is still HTML-escaped as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub video_id: String,
    pub view_count: u64,
}

/// The two calls the report pipeline makes against the platform.
#[allow(async_fn_in_trait)]
pub trait VideoApi {
    /// Fetch a single page of channel search results.
    async fn search_page(&self, query: &SearchQuery<'_>) -> Result<SearchPage>;

    /// Fetch view counts for at most [`MAX_RESULTS`] ids in one request.
    async fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStats>>;
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: ResourceId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: String,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoStatistics {
    /// Sent as a decimal string.
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl SearchListResponse {
    fn into_page(self) -> SearchPage {
        let items = self
            .items
            .into_iter()
            .filter_map(|result| {
                let video_id = result.id.video_id.filter(|id| !id.is_empty())?;
                let title = result.snippet.map(|s| s.title).unwrap_or_default();
                Some(SearchItem { video_id, title })
            })
            .collect();

        SearchPage {
            items,
            next_page_token: self.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

impl VideoListResponse {
    fn into_stats(self) -> Vec<VideoStats> {
        self.items
            .into_iter()
            .map(|video| VideoStats {
                view_count: video
                    .statistics
                    .and_then(|s| s.view_count)
                    .and_then(|count| count.parse().ok())
                    .unwrap_or(0),
                video_id: video.id,
            })
            .collect()
    }
}

/// API-key authenticated YouTube Data API client
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("yt-views/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<P: Serialize + ?Sized>(&self, endpoint: &str, params: &P) -> Result<Response> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &text));
        }

        Ok(response)
    }
}

impl VideoApi for YouTubeClient {
    async fn search_page(&self, query: &SearchQuery<'_>) -> Result<SearchPage> {
        let params = search_params(query);
        let response: SearchListResponse = self.get("search", &params).await?.json().await?;
        Ok(response.into_page())
    }

    async fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStats>> {
        let ids = video_ids.join(",");
        let params = [("part", "statistics"), ("id", ids.as_str())];

        let response: VideoListResponse = self.get("videos", &params).await?.json().await?;
        Ok(response.into_stats())
    }
}

/// Query parameters for one `search.list` call, minus the API key.
fn search_params(query: &SearchQuery<'_>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("part", "snippet".to_string()),
        ("type", "video".to_string()),
        ("order", query.order.as_str().to_string()),
        ("channelId", query.channel_id.to_string()),
        ("maxResults", MAX_RESULTS.to_string()),
    ];
    if let Some(before) = query.published_before {
        params.push(("publishedBefore", before.to_string()));
    }
    if let Some(after) = query.published_after {
        params.push(("publishedAfter", after.to_string()));
    }
    if let Some(token) = query.page_token {
        params.push(("pageToken", token.to_string()));
    }
    params
}

/// Build an API error, preferring the message from Google's error envelope.
fn api_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    Error::Api { status, message }
}
