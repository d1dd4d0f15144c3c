//! Video search response types

use serde::{Deserialize, Serialize};

/// A cooking video found for a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Uploading channel
    pub channel: String,
}

impl Video {
    /// Link for watching in a browser
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }

    /// Link for embedding in a page
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.id)
    }
}

/// Search endpoint response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchItem {
    pub id: ItemId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
}

impl SearchResponse {
    /// First item that carries a video id
    pub fn into_first_video(self) -> Option<Video> {
        self.items.into_iter().find_map(|item| {
            let id = item.id.video_id?;
            let snippet = item.snippet.unwrap_or(Snippet {
                title: String::new(),
                channel_title: String::new(),
            });
            Some(Video {
                id,
                title: snippet.title,
                channel: snippet.channel_title,
            })
        })
    }
}
