//! Link Extractor — pulls candidate apply links out of markdown or HTML.
//!
//! Relevance is a plain keyword filter: a URL (or, for HTML, the anchor text)
//! must contain one of the configured keywords, case-insensitively. Document
//! order is kept and the result is capped at `max_links`.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};

/// Hrefs with these prefixes never lead to a job page.
const IGNORED_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:"];

fn url_literal() -> &'static Regex {
    static URL_LITERAL: OnceLock<Regex> = OnceLock::new();
    URL_LITERAL.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").expect("valid regex"))
}

fn anchor_selector() -> &'static Selector {
    static ANCHOR: OnceLock<Selector> = OnceLock::new();
    ANCHOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"))
}

/// `keywords` are expected lower-case; `haystack` is lower-cased here.
fn contains_keyword(haystack: &str, keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

/// Scans markdown for URL literals and keeps the keyword-matching ones.
pub fn links_from_markdown(markdown: &str, keywords: &[String], max_links: usize) -> Vec<String> {
    url_literal()
        .find_iter(markdown)
        .map(|m| m.as_str())
        .filter(|url| contains_keyword(url, keywords))
        .take(max_links)
        .map(str::to_string)
        .collect()
}

/// Walks every `<a href>` and keeps those whose resolved URL or visible text matches a keyword.
pub fn links_from_html(
    html: &str,
    base_url: &str,
    keywords: &[String],
    max_links: usize,
) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(anchor_selector())
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let resolved = normalize_url(href, base_url)?;
            let text: String = anchor.text().collect();

            (contains_keyword(&resolved, keywords) || contains_keyword(&text, keywords))
                .then_some(resolved)
        })
        .take(max_links)
        .collect()
}

/// Resolves `href` against the page it was found on.
///
/// Absolute URLs pass through untouched, `//host/...` inherits the page scheme,
/// everything else is joined onto `base_url`. Returns `None` for fragment,
/// `mailto:`, `tel:` and `javascript:` hrefs.
pub fn normalize_url(href: &str, base_url: &str) -> Option<String> {
    let lower = href.to_ascii_lowercase();
    if IGNORED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return None;
    }

    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(href.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        let scheme = if base_url.starts_with("https") {
            "https"
        } else {
            "http"
        };
        return Some(format!("{scheme}://{rest}"));
    }

    // Unparseable base: keep the raw href rather than dropping the link.
    let joined = Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string());
    Some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkKeywords;

    fn markdown_keywords() -> Vec<String> {
        LinkKeywords::default().markdown
    }

    fn html_keywords() -> Vec<String> {
        LinkKeywords::default().html
    }

    #[test]
    fn test_normalize_root_relative_href() {
        assert_eq!(
            normalize_url("/job/42", "https://example.com/careers").as_deref(),
            Some("https://example.com/job/42")
        );
    }

    #[test]
    fn test_normalize_scheme_relative_href_uses_page_scheme() {
        assert_eq!(
            normalize_url("//cdn.example.com/x", "https://example.com/careers").as_deref(),
            Some("https://cdn.example.com/x")
        );
        assert_eq!(
            normalize_url("//cdn.example.com/x", "http://example.com/careers").as_deref(),
            Some("http://cdn.example.com/x")
        );
    }

    #[test]
    fn test_normalize_absolute_href_is_verbatim() {
        let href = "https://Jobs.Example.com/Apply?id=1";
        assert_eq!(
            normalize_url(href, "https://example.com/careers").as_deref(),
            Some(href)
        );
    }

    #[test]
    fn test_normalize_path_relative_href_joins_base() {
        assert_eq!(
            normalize_url("openings/7", "https://example.com/careers/").as_deref(),
            Some("https://example.com/careers/openings/7")
        );
    }

    #[test]
    fn test_normalize_ignores_non_navigational_hrefs() {
        let base = "https://example.com/careers";
        assert!(normalize_url("#apply", base).is_none());
        assert!(normalize_url("mailto:jobs@example.com", base).is_none());
        assert!(normalize_url("javascript:openJob(1)", base).is_none());
        assert!(normalize_url("tel:+15555550100", base).is_none());
    }

    #[test]
    fn test_markdown_links_filtered_by_keyword() {
        let markdown = "\
            [Home](https://example.com/)\n\
            [Engineer](https://example.com/jobs/123)\n\
            See https://example.com/blog/post and https://example.com/Careers/open\n\
            [Open roles](https://example.com/positions/9)";
        let links = links_from_markdown(markdown, &markdown_keywords(), 10);
        assert_eq!(
            links,
            vec![
                "https://example.com/jobs/123",
                "https://example.com/Careers/open",
                "https://example.com/positions/9",
            ]
        );
    }

    #[test]
    fn test_markdown_url_stops_at_closing_bracket() {
        let links = links_from_markdown(
            "[x](https://example.com/apply/1) [y]: https://example.com/job]rest",
            &markdown_keywords(),
            10,
        );
        assert_eq!(
            links,
            vec!["https://example.com/apply/1", "https://example.com/job"]
        );
    }

    #[test]
    fn test_markdown_links_never_exceed_cap() {
        let markdown: String = (0..50)
            .map(|i| format!("- https://example.com/jobs/{i}\n"))
            .collect();
        let links = links_from_markdown(&markdown, &markdown_keywords(), 5);
        assert_eq!(links.len(), 5);
        assert_eq!(links[0], "https://example.com/jobs/0");
        assert_eq!(links[4], "https://example.com/jobs/4");
    }

    #[test]
    fn test_html_anchor_text_can_qualify_a_link() {
        let html = r#"
            <html><body>
              <a href="/about">About us</a>
              <a href="/r/1001">Apply now</a>
              <a href="/jobs/42">Senior Engineer</a>
              <a href="">Jobs</a>
              <a href="mailto:jobs@example.com">Email jobs</a>
            </body></html>"#;
        let links = links_from_html(html, "https://example.com/careers", &html_keywords(), 10);
        assert_eq!(
            links,
            vec!["https://example.com/r/1001", "https://example.com/jobs/42"]
        );
    }

    #[test]
    fn test_html_links_never_exceed_cap() {
        let html: String = (0..40)
            .map(|i| format!(r#"<a href="/job/{i}">Role {i}</a>"#))
            .collect();
        let links = links_from_html(&html, "https://example.com/careers", &html_keywords(), 3);
        assert_eq!(
            links,
            vec![
                "https://example.com/job/0",
                "https://example.com/job/1",
                "https://example.com/job/2",
            ]
        );
    }

    #[test]
    fn test_html_keyword_match_is_case_insensitive() {
        let html = r#"<a href="https://example.com/x">CAREERS</a>"#;
        let links = links_from_html(html, "https://example.com", &html_keywords(), 5);
        assert_eq!(links, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_custom_keywords_replace_defaults() {
        let keywords = vec!["vacancy".to_string()];
        let markdown = "https://example.com/jobs/1 https://example.com/vacancy/2";
        assert_eq!(
            links_from_markdown(markdown, &keywords, 5),
            vec!["https://example.com/vacancy/2"]
        );
    }
}
