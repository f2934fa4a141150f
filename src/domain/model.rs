use serde::{Deserialize, Serialize};

/// Inputs for one generated article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub title: String,
    pub focus_keyword: String,
    pub permalink: String,
    pub semantic_keywords: String,
}

/// Canonical front matter plus the cleaned model output.
#[derive(Debug, Clone)]
pub struct Article {
    pub front_matter: String,
    pub body: String,
}

impl Article {
    /// Front matter, one blank line, then the body.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.front_matter, self.body)
    }
}

/// Who receives a push notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Segments(Vec<String>),
    Players(Vec<String>),
}

impl Default for Audience {
    fn default() -> Self {
        Audience::Segments(vec!["All".to_string()])
    }
}

impl Audience {
    /// Non-empty segments win over non-empty player ids; with neither, everyone.
    pub fn resolve(segments: Option<Vec<String>>, player_ids: Option<Vec<String>>) -> Self {
        match (segments, player_ids) {
            (Some(segments), _) if !segments.is_empty() => Audience::Segments(segments),
            (_, Some(ids)) if !ids.is_empty() => Audience::Players(ids),
            _ => Audience::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    pub target_url: Option<String>,
    pub image_url: Option<String>,
    pub audience: Audience,
}

/// A freshly published post, as announced by `send_blog_notification`.
#[derive(Debug, Clone)]
pub struct BlogPost {
    pub title: String,
    pub focus_keyword: String,
    pub permalink: String,
    pub image_url: Option<String>,
}

impl BlogPost {
    pub fn url(&self, site_url: &str) -> String {
        format!(
            "{}/{}",
            site_url.trim_end_matches('/'),
            self.permalink.trim_start_matches('/')
        )
    }
}

/// Body of a successful notification response. Unknown fields are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationReceipt {
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl NotificationReceipt {
    pub fn id(&self) -> Option<&str> {
        self.data.get("id").and_then(|v| v.as_str())
    }

    pub fn recipients(&self) -> Option<u64> {
        self.data.get("recipients").and_then(|v| v.as_u64())
    }
}
