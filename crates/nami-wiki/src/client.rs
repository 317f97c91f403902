//! Blocking MediaWiki action API client.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use nami_core::config::SourceConfig;
use nami_core::{Document, DocumentSource, LookupResult};

use crate::error::WikiError;
use crate::variants::title_variants;

// =============================================================================
// Response shape (formatversion=2)
// =============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    fullurl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

// =============================================================================
// WikiSource
// =============================================================================

/// Document source backed by one Wikipedia language edition.
pub struct WikiSource {
    agent: ureq::Agent,
    endpoint: String,
    article_base: String,
}

impl WikiSource {
    /// Build a client from the `[source]` config section.
    pub fn new(config: &SourceConfig) -> Result<Self, WikiError> {
        if config.timeout_secs == 0 {
            return Err(WikiError::InvalidConfig("timeout must be > 0".into()));
        }
        let endpoint = config.endpoint();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(WikiError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(&config.user_agent)
            .build();

        debug!(endpoint = %endpoint, "Wikipedia source ready");

        Ok(Self {
            agent,
            article_base: article_base(&endpoint),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the intro of the page titled exactly `title`, following redirects.
    ///
    /// `Ok(None)` means the page does not exist.
    pub fn fetch_page(&self, title: &str) -> Result<Option<Document>, WikiError> {
        debug!(title = %title, "Requesting page");
        let response = self
            .agent
            .get(&self.endpoint)
            .query("action", "query")
            .query("format", "json")
            .query("formatversion", "2")
            .query("prop", "extracts|info")
            .query("exintro", "1")
            .query("explaintext", "1")
            .query("inprop", "url")
            .query("redirects", "1")
            .query("titles", title)
            .call()?;

        let body = response.into_string()?;
        parse_page(&body, &self.article_base)
    }

    /// The exact term first, then each title variant, stopping at the first hit.
    pub fn resolve(&self, term: &str) -> Result<Option<Document>, WikiError> {
        resolve_with(term, |title| self.fetch_page(title))
    }
}

impl DocumentSource for WikiSource {
    fn lookup(&self, term: &str) -> LookupResult {
        match self.resolve(term) {
            Ok(Some(doc)) => LookupResult::Found(doc),
            Ok(None) => LookupResult::NotFound {
                term: term.to_string(),
            },
            Err(e) => {
                warn!(term = %term, error = %e, "Wikipedia lookup failed");
                e.into()
            }
        }
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Try `term`, then its title variants, through `fetch`.
///
/// The first error ends the search.
fn resolve_with<F>(term: &str, mut fetch: F) -> Result<Option<Document>, WikiError>
where
    F: FnMut(&str) -> Result<Option<Document>, WikiError>,
{
    if let Some(doc) = fetch(term)? {
        return Ok(Some(doc));
    }
    for variant in title_variants(term) {
        if let Some(doc) = fetch(&variant)? {
            debug!(term = %term, variant = %variant, "Matched title variant");
            return Ok(Some(doc));
        }
    }
    Ok(None)
}

/// Decode a `prop=extracts|info` query response.
fn parse_page(body: &str, article_base: &str) -> Result<Option<Document>, WikiError> {
    let response: QueryResponse = serde_json::from_str(body)?;

    if let Some(err) = response.error {
        return Err(WikiError::Api {
            code: err.code,
            info: err.info,
        });
    }

    let page = match response
        .query
        .and_then(|q| q.pages.into_iter().next())
    {
        Some(page) if !page.missing && !page.invalid => page,
        _ => return Ok(None),
    };

    let url = page
        .fullurl
        .unwrap_or_else(|| format!("{}{}", article_base, page.title.replace(' ', "_")));

    Ok(Some(Document {
        title: page.title,
        summary: page.extract.unwrap_or_default().trim().to_string(),
        url,
    }))
}

/// Article URL prefix for an API endpoint, e.g. `https://en.wikipedia.org/wiki/`.
fn article_base(endpoint: &str) -> String {
    match endpoint.strip_suffix("/w/api.php") {
        Some(host) => format!("{}/wiki/", host),
        None => {
            let host = endpoint.rsplit_once('/').map_or(endpoint, |(h, _)| h);
            format!("{}/", host)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://en.wikipedia.org/wiki/";

    // ---- Decoding ----

    #[test]
    fn test_parse_existing_page() {
        let body = r#"{
            "batchcomplete": true,
            "query": {
                "normalized": [{"fromencoded": false, "from": "quantum physics", "to": "Quantum physics"}],
                "redirects": [{"from": "Quantum physics", "to": "Quantum mechanics"}],
                "pages": [{
                    "pageid": 25202,
                    "ns": 0,
                    "title": "Quantum mechanics",
                    "extract": "Quantum mechanics is a fundamental theory.\n",
                    "fullurl": "https://en.wikipedia.org/wiki/Quantum_mechanics"
                }]
            }
        }"#;
        let doc = parse_page(body, BASE).unwrap().unwrap();
        assert_eq!(doc.title, "Quantum mechanics");
        assert_eq!(doc.summary, "Quantum mechanics is a fundamental theory.");
        assert_eq!(doc.url, "https://en.wikipedia.org/wiki/Quantum_mechanics");
    }

    #[test]
    fn test_parse_missing_page() {
        let body = r#"{"batchcomplete": true, "query": {"pages": [
            {"ns": 0, "title": "Xyz123qq", "missing": true}
        ]}}"#;
        assert!(parse_page(body, BASE).unwrap().is_none());
    }

    #[test]
    fn test_parse_invalid_title() {
        let body = r#"{"batchcomplete": true, "query": {"pages": [
            {"title": "a|b", "invalidreason": "contains |", "invalid": true}
        ]}}"#;
        assert!(parse_page(body, BASE).unwrap().is_none());
    }

    #[test]
    fn test_parse_without_pages() {
        assert!(parse_page(r#"{"batchcomplete": true}"#, BASE)
            .unwrap()
            .is_none());
        assert!(parse_page(r#"{"query": {"pages": []}}"#, BASE)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_parse_missing_extract_and_url() {
        let body = r#"{"query": {"pages": [{"title": "Ada Lovelace"}]}}"#;
        let doc = parse_page(body, BASE).unwrap().unwrap();
        assert_eq!(doc.summary, "");
        assert_eq!(doc.url, "https://en.wikipedia.org/wiki/Ada_Lovelace");
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{"error": {"code": "badvalue", "info": "Unrecognized value for parameter \"prop\"."}}"#;
        let err = parse_page(body, BASE).unwrap_err();
        assert!(matches!(err, WikiError::Api { ref code, .. } if code == "badvalue"));
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        let err = parse_page("<html>502 Bad Gateway</html>", BASE).unwrap_err();
        assert!(matches!(err, WikiError::Decode(_)));
    }

    // ---- Title retry ----

    fn doc(title: &str) -> Document {
        Document {
            title: title.to_string(),
            summary: format!("About {}.", title),
            url: format!("{}{}", BASE, title.replace(' ', "_")),
        }
    }

    /// Runs `resolve_with` over scripted per-title outcomes and returns the
    /// result with the titles requested, in order.
    fn resolve_scripted(
        term: &str,
        script: impl Fn(&str) -> Result<Option<Document>, WikiError>,
    ) -> (Result<Option<Document>, WikiError>, Vec<String>) {
        let mut requested = Vec::new();
        let result = resolve_with(term, |title| {
            requested.push(title.to_string());
            script(title)
        });
        (result, requested)
    }

    #[test]
    fn test_resolve_exact_title_first() {
        let (result, requested) = resolve_scripted("quantum physics", |t| Ok(Some(doc(t))));
        assert_eq!(result.unwrap().unwrap().title, "quantum physics");
        assert_eq!(requested, vec!["quantum physics"]);
    }

    #[test]
    fn test_resolve_tries_variants_in_order_until_hit() {
        let (result, requested) = resolve_scripted("quantum physics", |t| {
            Ok((t == "Quantum physics").then(|| doc("Quantum mechanics")))
        });
        assert_eq!(result.unwrap().unwrap().title, "Quantum mechanics");
        assert_eq!(
            requested,
            vec!["quantum physics", "Quantum Physics", "Quantum physics"]
        );
    }

    #[test]
    fn test_resolve_all_missing_is_none() {
        let (result, requested) = resolve_scripted("quantum physics", |_| Ok(None));
        assert!(result.unwrap().is_none());
        assert_eq!(
            requested,
            vec![
                "quantum physics",
                "Quantum Physics",
                "Quantum physics",
                "quantum_physics"
            ]
        );
    }

    #[test]
    fn test_resolve_error_stops_retry() {
        let (result, requested) = resolve_scripted("quantum physics", |t| {
            if t == "Quantum Physics" {
                Err(WikiError::Transport("connection reset".into()))
            } else {
                Ok(None)
            }
        });
        assert!(matches!(result, Err(WikiError::Transport(_))));
        assert_eq!(requested, vec!["quantum physics", "Quantum Physics"]);
    }

    #[test]
    fn test_resolve_decode_error_on_exact_title() {
        let (result, requested) = resolve_scripted("napoleon", |_| {
            Err(WikiError::Decode("expected value".into()))
        });
        assert!(matches!(result, Err(WikiError::Decode(_))));
        assert_eq!(requested, vec!["napoleon"]);
    }

    #[test]
    fn test_resolve_outcomes_map_to_lookup_results() {
        let (result, _) = resolve_scripted("xyzzy", |_| Ok(None));
        assert!(result.unwrap().is_none());

        let (result, _) = resolve_scripted("xyzzy", |_| Err(WikiError::Status { status: 503 }));
        let lookup: LookupResult = result.unwrap_err().into();
        assert_eq!(
            lookup,
            LookupResult::SourceError {
                message: "Wikipedia returned HTTP 503".into()
            }
        );
    }

    // ---- Construction ----

    #[test]
    fn test_new_with_defaults() {
        let source = WikiSource::new(&SourceConfig::default()).unwrap();
        assert_eq!(source.endpoint(), "https://en.wikipedia.org/w/api.php");
        assert_eq!(source.name(), "wikipedia");
    }

    #[test]
    fn test_new_uses_language() {
        let config = SourceConfig {
            language: "de".into(),
            ..SourceConfig::default()
        };
        let source = WikiSource::new(&config).unwrap();
        assert_eq!(source.endpoint(), "https://de.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let config = SourceConfig {
            timeout_secs: 0,
            ..SourceConfig::default()
        };
        assert!(matches!(
            WikiSource::new(&config),
            Err(WikiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_rejects_non_http_endpoint() {
        let config = SourceConfig {
            api_url: "ftp://example.org/api".into(),
            ..SourceConfig::default()
        };
        assert!(matches!(
            WikiSource::new(&config),
            Err(WikiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_source_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WikiSource>();
    }

    // ---- Article URLs ----

    #[test]
    fn test_article_base() {
        assert_eq!(
            article_base("https://fr.wikipedia.org/w/api.php"),
            "https://fr.wikipedia.org/wiki/"
        );
        assert_eq!(
            article_base("http://localhost:8080/api.php"),
            "http://localhost:8080/"
        );
    }
}
