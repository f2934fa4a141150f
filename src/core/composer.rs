use crate::adapters::gemini::GeminiClient;
use crate::config::toml_config::{AppConfig, BlogConfig};
use crate::core::front_matter::{normalize, FrontMatter};
use crate::domain::model::{Article, ArticleRequest};
use crate::domain::ports::TextGenerator;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Builds the drafting prompt for one article.
pub fn article_prompt(request: &ArticleRequest, site_url: &str) -> String {
    format!(
        r#"
Write an SEO-optimised blog post titled {title}, using the focus keyword {focus} and also {semantic}.

Rules:
- Simple English, but a professional guide tone
- The article will be published on {site_url}
- No more than 3 sentences per paragraph; start a new paragraph after 3 sentences
- Address the reader as "you"
- When needed, link to legal websites for legal information
- Do not highlight keywords
- Include practical examples related to {focus}
- Use H2, H3, H4, H5 and H6 headings, no H1
- Use lists, tables, snippets and other data formats
- Write more than 1500 words
- Write in Jekyll markdown format, for a file with the .md extension only
- Naturally include the focus and semantic keywords
"#,
        title = request.title,
        focus = request.focus_keyword,
        semantic = request.semantic_keywords,
        site_url = site_url,
    )
}

pub fn image_prompt_request(title: &str) -> String {
    format!(
        r#"
Create a photorealistic featured image prompt for this blog post:
Title: {title}

Requirements:
- Professional, high quality
- NO text or words in the image
- Suitable as a blog featured image
- 16:9 aspect ratio
- Relevant to the topic

Return ONLY the image prompt, nothing else.
"#
    )
}

/// Jekyll post file name: `YYYY-MM-DD-<permalink>.md`.
pub fn post_file_name(permalink: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.md",
        date.format("%Y-%m-%d"),
        permalink.trim_matches('/')
    )
}

/// Drafts articles and image prompts through a [`TextGenerator`].
///
/// Errors from the generator are returned unchanged; nothing is retried.
pub struct ArticleComposer<G: TextGenerator> {
    generator: G,
    site_url: String,
    author: String,
}

impl<G: TextGenerator> ArticleComposer<G> {
    pub fn new(generator: G, blog: &BlogConfig) -> Self {
        Self {
            generator,
            site_url: blog.site_url.clone(),
            author: blog.author.clone(),
        }
    }

    pub async fn generate_article(&self, request: &ArticleRequest) -> Result<Article> {
        tracing::info!("🤖 Generating article: {}", request.title);
        let prompt = article_prompt(request, &self.site_url);
        let raw = self.generator.generate(&prompt).await?;

        let body = normalize(&raw);
        tracing::debug!(
            "Model returned {} chars, {} after front matter cleanup",
            raw.len(),
            body.len()
        );

        let front_matter = FrontMatter::new(&request.title, &request.focus_keyword, &request.permalink)
            .with_author(&self.author)
            .render();

        Ok(Article { front_matter, body })
    }

    pub async fn generate_image_prompt(&self, title: &str) -> Result<String> {
        tracing::info!("🎨 Generating image prompt: {}", title);
        let response = self.generator.generate(&image_prompt_request(title)).await?;
        Ok(response.trim().to_string())
    }
}

impl ArticleComposer<GeminiClient> {
    /// Composer backed by Gemini. Fails when `gemini.api_key` is missing.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = GeminiClient::new(&config.gemini)?;
        tracing::debug!("Using Gemini model {}", client.model());
        Ok(Self::new(client, &config.blog))
    }
}
