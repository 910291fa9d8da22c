//! Page fetch unit
//!
//! One [`CrawlRequest`] in, one [`FetchedPage`] out: GET the target, project
//! the document through the parser, filter and resolve the discovered links
//! against the page's own scheme+host base, and build the immutable page
//! record. Nothing here touches shared state; publication is the
//! orchestrator's job.

use crate::crawler::parser::parse_page;
use crate::store::Page;
use crate::EngineError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// One frontier entry: where to fetch, which page discovered it, how deep.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub url: String,
    pub previous: String,
    pub depth: u32,
}

impl CrawlRequest {
    pub fn new(url: String, previous: String, depth: u32) -> Self {
        Self {
            url,
            previous,
            depth,
        }
    }

    /// A depth-zero request with no referring page.
    pub fn seed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            previous: String::new(),
            depth: 0,
        }
    }
}

/// The yield of one successful fetch.
pub struct FetchedPage {
    pub page: Arc<Page>,

    /// Requests for the links found on the page, each one level deeper.
    pub discovered: Vec<CrawlRequest>,
}

/// Builds the HTTP client shared by every fetch in a run.
pub fn build_http_client(request_timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("tidepool/", env!("CARGO_PKG_VERSION")))
        .timeout(request_timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one request and builds its page record and child requests.
///
/// On any transport failure the whole unit fails: no page, no links, one
/// error for the caller to record. The crawl continues without this URL.
pub async fn fetch_page(
    client: &Client,
    request: &CrawlRequest,
) -> Result<FetchedPage, EngineError> {
    let response = client
        .get(&request.url)
        .send()
        .await
        .map_err(|source| EngineError::Fetch {
            url: request.url.clone(),
            source,
        })?;

    let body = response
        .text()
        .await
        .map_err(|source| EngineError::Fetch {
            url: request.url.clone(),
            source,
        })?;

    let parsed = parse_page(&body);

    let base = base_url(&request.url);
    let discovered = parsed
        .links
        .iter()
        .filter(|href| keep_link(href, request))
        .filter_map(|href| resolve_link(&base, href))
        .map(|url| CrawlRequest::new(url, request.url.clone(), request.depth + 1))
        .collect();

    let page = Arc::new(Page::new(&request.url, parsed.title, parsed.words));

    Ok(FetchedPage { page, discovered })
}

/// The scheme+host(+port) prefix used as the base for link resolution.
///
/// Empty when the URL does not parse into a scheme and host, in which case
/// relative links on the page cannot be resolved and are dropped.
fn base_url(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    let host = match parsed.host_str() {
        Some(host) => host,
        None => return String::new(),
    };

    match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    }
}

/// Scrubs hrefs that should never re-enter the frontier: the bare root,
/// the page itself, the page that led here, mail links, and archives.
fn keep_link(href: &str, request: &CrawlRequest) -> bool {
    href != "/"
        && href != request.url
        && href != request.previous
        && !href.starts_with("mailto")
        && !href.ends_with(".zip")
}

/// Resolves an href against the page's base prefix.
///
/// Deliberately not RFC 3986: a target already under the base passes
/// through, a root-relative target is joined to the base, and every other
/// relative form is dropped. Good enough for a prototype that only follows
/// same-site links.
fn resolve_link(base: &str, href: &str) -> Option<String> {
    if !base.is_empty() && href.starts_with(base) {
        return Some(href.to_string());
    }

    if href.starts_with('/') {
        return Some(format!("{}{}", base, href));
    }

    None
}
