use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Aggregated (or embedded) usage count for a single tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagStat {
    pub tag: String,
    /// `None` while the count is unresolved
    #[serde(default)]
    pub count: Option<u64>,
}

impl TagStat {
    pub fn new(tag: impl Into<String>, count: u64) -> Self {
        Self {
            tag: tag.into(),
            count: Some(count),
        }
    }

    pub fn unresolved(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            count: None,
        }
    }
}

/// Post identifier; larger means more recent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: PostId,
    #[serde(default)]
    pub short_code: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub preview_link: String,
    /// Caption, when the backend includes it
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: Vec<TagStat>,
    #[serde(default)]
    pub likes: u64,
}

/// Failures that come from the payload rather than the transport
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("empty result")]
    Empty,
}

/// Helper function to deserialize null as the type's default
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    data: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry {
    count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagHistory {
    last_history_entry: HistoryEntry,
}

/// The stats endpoint either answers with the tag itself or wraps it in the list envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagStatResponse {
    Single(TagHistory),
    Listed { data: Vec<TagHistory> },
}

fn parse_envelope<T: for<'de> Deserialize<'de>>(body: &str) -> Result<Vec<T>, ResponseError> {
    let envelope: ListEnvelope<T> =
        serde_json::from_str(body).map_err(|e| ResponseError::Malformed(e.to_string()))?;

    match envelope.data {
        None => Err(ResponseError::Malformed("missing data field".to_string())),
        Some(items) if items.is_empty() => Err(ResponseError::Empty),
        Some(items) => Ok(items),
    }
}

/// Drop empty tag names and keep the first entry of each duplicate
pub(crate) fn dedup_tags(tags: Vec<TagStat>) -> Vec<TagStat> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|t| !t.tag.is_empty())
        .filter(|t| seen.insert(t.tag.clone()))
        .collect()
}

/// Parse the profile tag aggregation body: `{data: [{tag, count}]}`
pub fn parse_tag_list(body: &str) -> Result<Vec<TagStat>, ResponseError> {
    let tags = dedup_tags(parse_envelope(body)?);
    if tags.is_empty() {
        return Err(ResponseError::Empty);
    }
    Ok(tags)
}

/// Parse the profile post listing body: `{data: [{id, shortCode, previewLink, tags, likes}]}`
pub fn parse_post_list(body: &str) -> Result<Vec<PostSummary>, ResponseError> {
    let mut posts: Vec<PostSummary> = parse_envelope(body)?;
    for post in &mut posts {
        post.tags = dedup_tags(std::mem::take(&mut post.tags));
    }
    Ok(posts)
}

/// Parse the single-tag stats body and extract the latest count
pub fn parse_tag_stat(body: &str) -> Result<u64, ResponseError> {
    let response: TagStatResponse =
        serde_json::from_str(body).map_err(|e| ResponseError::Malformed(e.to_string()))?;

    match response {
        TagStatResponse::Single(history) => Ok(history.last_history_entry.count),
        TagStatResponse::Listed { data } => data
            .first()
            .map(|h| h.last_history_entry.count)
            .ok_or(ResponseError::Empty),
    }
}

#[derive(Clone)]
pub struct ProfileClient {
    base_url: String,
    client: Client,
}

impl ProfileClient {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn profile_tags_url(&self, handle: &str) -> String {
        format!(
            "{}/profile/tags/{}/counted=true",
            self.base_url,
            urlencoding::encode(handle)
        )
    }

    pub fn profile_posts_url(&self, handle: &str) -> String {
        format!(
            "{}/profile/posts/{}/counted=true",
            self.base_url,
            urlencoding::encode(handle)
        )
    }

    pub fn tag_stat_url(&self, tag: &str) -> String {
        format!("{}/tag/{}", self.base_url, urlencoding::encode(tag))
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        // Surface HTTP errors as reqwest errors so they keep their status code
        let response = response.error_for_status()?;

        response.text().await.context("Failed to read response")
    }

    pub async fn get_profile_tags(&self, handle: &str) -> Result<Vec<TagStat>> {
        let body = self.get_text(&self.profile_tags_url(handle)).await?;
        let tags = parse_tag_list(&body).context("Failed to parse profile tags")?;
        Ok(tags)
    }

    pub async fn get_profile_posts(&self, handle: &str) -> Result<Vec<PostSummary>> {
        let body = self.get_text(&self.profile_posts_url(handle)).await?;
        let posts = parse_post_list(&body).context("Failed to parse profile posts")?;
        Ok(posts)
    }

    pub async fn get_tag_stat(&self, tag: &str) -> Result<u64> {
        let body = self.get_text(&self.tag_stat_url(tag)).await?;
        let count = parse_tag_stat(&body).context("Failed to parse tag stats")?;
        Ok(count)
    }
}
