//! Pure extraction over parsed HTML. Nothing here performs I/O except the
//! [`fetch_and_parse`] convenience used at indexing time.

use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Lowercase a host and strip a leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Normalize a URL in place: drop the fragment, strip `www.` from the host,
/// canonicalize the path. Returns `None` when the host cannot be rewritten.
pub fn normalize_url(mut url: Url) -> Option<Url> {
    url.set_fragment(None);
    let host = normalize_host(url.host_str()?);
    url.set_host(Some(&host)).ok()?;
    let path = canonicalize_path(url.path());
    url.set_path(&path);
    Some(url)
}

/// Collapse duplicate slashes and resolve `.`/`..` segments, keeping the
/// path absolute.
fn canonicalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            seg => segments.push(seg),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Extract all same-host links from a document, normalized and absolute.
///
/// Relative hrefs resolve against `page_url`; only http(s) links whose
/// normalized host equals `host_scope` survive. Empty, fragment-only and
/// `mailto:` hrefs are ignored.
pub fn extract_links(doc: &Html, page_url: &Url, host_scope: &str) -> Vec<String> {
    let sel = Selector::parse("a[href]").expect("valid selector");
    let mut links = Vec::new();
    for a in doc.select(&sel) {
        let Some(href) = a.value().attr("href") else { continue };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') || href.starts_with("mailto:") {
            continue;
        }
        let Ok(url) = Url::parse(href).or_else(|_| page_url.join(href)) else {
            continue;
        };
        if url.scheme() != "http" && url.scheme() != "https" {
            continue;
        }
        let Some(host) = url.host_str() else { continue };
        if normalize_host(host) != host_scope {
            continue;
        }
        if let Some(normalized) = normalize_url(url) {
            links.push(normalized.to_string());
        }
    }
    links
}

/// Depth-first concatenation of all text-node content, each node trimmed.
/// Word boundaries are not re-inserted; concatenation is adjacency-preserving.
pub fn extract_text(doc: &Html) -> String {
    doc.root_element().text().map(str::trim).collect()
}

/// Text of the `<title>` element, trimmed; empty when absent.
pub fn extract_title(doc: &Html) -> String {
    let sel = Selector::parse("title").expect("valid selector");
    doc.select(&sel)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Text content of every `h1`-`h6` element, in document order.
pub fn extract_headings(doc: &Html) -> Vec<String> {
    let sel = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
    doc.select(&sel)
        .map(|h| h.text().collect::<String>())
        .collect()
}

/// Text content of every `pre` or `code` element, in document order.
/// A `pre > code` pair yields both elements' text.
pub fn extract_code_snippets(doc: &Html) -> Vec<String> {
    let sel = Selector::parse("pre, code").expect("valid selector");
    doc.select(&sel)
        .map(|n| n.text().collect::<String>())
        .collect()
}

/// Fetch a URL and parse its body. Non-success statuses are errors.
pub async fn fetch_and_parse(client: &Client, url: &str) -> Result<Html> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let body = resp.text().await?;
    Ok(Html::parse_document(&body))
}
