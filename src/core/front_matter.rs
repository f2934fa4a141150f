//! Front matter handling for generated posts.
//!
//! Models tend to echo a YAML block of their own at the top of the article.
//! [`normalize`] removes it and [`FrontMatter`] renders the block we publish
//! instead.

use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_AUTHOR: &str = "Mary";

// Anchored at the start of the text, not at every line.
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\s*\n.*?\n---\s*\n").unwrap());

/// Strips a leading `---` fenced block and any stray `key: value` lines.
///
/// Leading whitespace before the opening fence is ignored. After the fenced
/// block is removed, leading lines are dropped while they are blank or contain
/// a colon without being a heading. The first heading or colon-free line ends
/// the scan. This is a heuristic: a body that opens with a sentence such as
/// `Note: ...` loses that sentence.
pub fn normalize(content: &str) -> String {
    let without_block = FENCED_BLOCK.replace(content.trim_start(), "");

    let kept: Vec<&str> = without_block
        .split('\n')
        .skip_while(|line| is_residual_metadata(line))
        .collect();

    kept.join("\n").trim().to_string()
}

fn is_residual_metadata(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return false;
    }
    trimmed.is_empty() || line.contains(':')
}

/// The one-line summary used both as `description` and as notification text.
pub fn describe(focus_keyword: &str) -> String {
    format!("Learn about {} and make informed decisions.", focus_keyword)
}

#[derive(Debug, Clone)]
pub struct FrontMatter<'a> {
    title: &'a str,
    focus_keyword: &'a str,
    permalink: &'a str,
    author: &'a str,
}

impl<'a> FrontMatter<'a> {
    pub fn new(title: &'a str, focus_keyword: &'a str, permalink: &'a str) -> Self {
        Self {
            title,
            focus_keyword,
            permalink,
            author: DEFAULT_AUTHOR,
        }
    }

    pub fn with_author(mut self, author: &'a str) -> Self {
        self.author = author;
        self
    }

    /// Only the title is escaped. Keyword and permalink go in verbatim.
    pub fn render(&self) -> String {
        let escaped_title = self.title.replace('"', "\\\"");

        [
            "---".to_string(),
            "layout: post".to_string(),
            format!("title: \"{}\"", escaped_title),
            format!("description: \"{}\"", describe(self.focus_keyword)),
            format!("author: {}", self.author),
            format!("tags: [{}]", self.focus_keyword),
            "featured: false".to_string(),
            format!("image: '/images/{}.webp'", self.permalink),
            "---".to_string(),
        ]
        .join("\n")
    }
}

pub fn build_front_matter(title: &str, focus_keyword: &str, permalink: &str) -> String {
    FrontMatter::new(title, focus_keyword, permalink).render()
}
