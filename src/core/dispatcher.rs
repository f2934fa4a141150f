use crate::config::toml_config::{BlogConfig, OneSignalConfig, OneSignalCredentials};
use crate::core::front_matter::describe;
use crate::domain::model::{Audience, BlogPost, NotificationReceipt, NotificationRequest};
use crate::utils::error::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocalizedText {
    pub en: String,
}

/// JSON body of a OneSignal create-notification call.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub app_id: String,
    pub headings: LocalizedText,
    pub contents: LocalizedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_segments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_player_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
}

impl NotificationPayload {
    pub fn new(app_id: &str, request: &NotificationRequest) -> Self {
        let (included_segments, include_player_ids) = match &request.audience {
            Audience::Segments(segments) => (Some(segments.clone()), None),
            Audience::Players(ids) => (None, Some(ids.clone())),
        };

        Self {
            app_id: app_id.to_string(),
            headings: LocalizedText {
                en: request.title.clone(),
            },
            contents: LocalizedText {
                en: request.message.clone(),
            },
            included_segments,
            include_player_ids,
            url: request.target_url.clone(),
            // The same image serves as the expanded picture and the icon.
            big_picture: request.image_url.clone(),
            large_icon: request.image_url.clone(),
        }
    }
}

/// Sends push notifications through the OneSignal REST API.
///
/// Failures never reach the caller as errors: they are logged and reported
/// as `None`, meaning "not sent".
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    client: Client,
    endpoint: String,
    credentials: OneSignalCredentials,
}

impl NotificationDispatcher {
    pub fn new(endpoint: &str, credentials: OneSignalCredentials) -> Self {
        Self::with_client(Client::new(), endpoint, credentials)
    }

    pub fn with_client(client: Client, endpoint: &str, credentials: OneSignalCredentials) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            credentials,
        }
    }

    /// Fails with `MissingConfigError` when either credential is unset.
    pub fn from_config(config: &OneSignalConfig) -> Result<Self> {
        let credentials = config.credentials()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_client(builder.build()?, &config.endpoint, credentials))
    }

    pub fn build_payload(&self, request: &NotificationRequest) -> NotificationPayload {
        NotificationPayload::new(&self.credentials.app_id, request)
    }

    pub async fn send_notification(
        &self,
        title: &str,
        message: &str,
        target_url: Option<&str>,
        image_url: Option<&str>,
        segments: Option<Vec<String>>,
        player_ids: Option<Vec<String>>,
    ) -> Option<NotificationReceipt> {
        let request = NotificationRequest {
            title: title.to_string(),
            message: message.to_string(),
            target_url: target_url.map(str::to_string),
            image_url: image_url.map(str::to_string),
            audience: Audience::resolve(segments, player_ids),
        };
        self.send(&request).await
    }

    pub async fn send(&self, request: &NotificationRequest) -> Option<NotificationReceipt> {
        let payload = self.build_payload(request);
        tracing::debug!("📡 Posting notification to {}: {:?}", self.endpoint, payload);

        let response = match self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(AUTHORIZATION, format!("Basic {}", self.credentials.rest_api_key))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Error sending notification: {}", e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ Error sending notification: HTTP {}", status);
            if !body.is_empty() {
                tracing::error!("Response: {}", body);
            }
            return None;
        }

        match response.json::<NotificationReceipt>().await {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                tracing::error!("❌ Notification response was not valid JSON: {}", e);
                None
            }
        }
    }
}

/// Announces a new post to every subscriber.
///
/// The heading is the post title, the message is the post description and
/// the click-through URL is `site_url/permalink`. Missing credentials are
/// logged and return `None` before any request is made.
pub async fn send_blog_notification(
    onesignal: &OneSignalConfig,
    blog: &BlogConfig,
    post: &BlogPost,
) -> Option<NotificationReceipt> {
    let dispatcher = match NotificationDispatcher::from_config(onesignal) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            tracing::error!("❌ OneSignal is not configured: {}", e);
            tracing::error!("💡 {}", e.recovery_suggestion());
            return None;
        }
    };

    let request = NotificationRequest {
        title: post.title.clone(),
        message: describe(&post.focus_keyword),
        target_url: Some(post.url(&blog.site_url)),
        image_url: post.image_url.clone(),
        audience: Audience::default(),
    };

    let result = dispatcher.send(&request).await;
    match &result {
        Some(receipt) => {
            tracing::info!("✅ Notification sent successfully!");
            tracing::info!(
                "Recipients: {}",
                receipt
                    .recipients()
                    .map_or_else(|| "N/A".to_string(), |n| n.to_string())
            );
            tracing::info!("Notification ID: {}", receipt.id().unwrap_or("N/A"));
        }
        None => tracing::warn!("✗ Failed to send notification"),
    }
    result
}
