use std::collections::HashMap;

use crate::config::ProgramInputs;
use crate::error::Result;
use crate::youtube::{MAX_RESULTS, SearchQuery, VideoApi};

pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// A video as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub video_id: String,
    /// HTML entities already decoded
    pub title: String,
    /// Zero until [`update_view_counts`] has run
    pub view_count: u64,
}

impl VideoDetails {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
            view_count: 0,
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.video_id)
    }
}

/// List every video of the channel, following page tokens until the API stops returning one.
///
/// Order is whatever the search API returned.
pub async fn list_channel_videos(api: &impl VideoApi, inputs: &ProgramInputs) -> Result<Vec<VideoDetails>> {
    let mut videos = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let query = SearchQuery {
            channel_id: &inputs.channel_id,
            order: inputs.order,
            published_before: inputs.published_before.as_deref(),
            published_after: inputs.published_after.as_deref(),
            page_token: page_token.as_deref(),
        };
        let page = api.search_page(&query).await?;
        pages += 1;
        tracing::debug!(page = pages, items = page.items.len(), "fetched search page");

        videos.extend(
            page.items
                .into_iter()
                .map(|item| VideoDetails::new(item.video_id, html_escape::decode_html_entities(&item.title))),
        );

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::info!(videos = videos.len(), pages, channel = %inputs.channel_id, "listed channel videos");
    Ok(videos)
}

/// Fill in view counts in batches of [`MAX_RESULTS`] ids.
///
/// Counts are matched back by video id, so the API may reorder or omit entries.
/// Videos without a statistics entry keep a count of 0.
pub async fn update_view_counts(api: &impl VideoApi, videos: &mut [VideoDetails]) -> Result<()> {
    for (batch, chunk) in videos.chunks_mut(MAX_RESULTS).enumerate() {
        let ids: Vec<String> = chunk.iter().map(|v| v.video_id.clone()).collect();
        let stats = api.video_statistics(&ids).await?;
        tracing::debug!(batch, requested = ids.len(), returned = stats.len(), "fetched statistics");

        let counts: HashMap<String, u64> = stats
            .into_iter()
            .map(|s| (s.video_id, s.view_count))
            .collect();

        for video in chunk.iter_mut() {
            match counts.get(&video.video_id) {
                Some(&count) => video.view_count = count,
                None => {
                    tracing::warn!(video_id = %video.video_id, "no statistics returned, reporting 0 views");
                    video.view_count = 0;
                }
            }
        }
    }
    Ok(())
}

/// Stable sort, most viewed first.
pub fn sort_by_views(videos: &mut [VideoDetails]) {
    videos.sort_by(|a, b| b.view_count.cmp(&a.view_count));
}
