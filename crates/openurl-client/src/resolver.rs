//! Queries an OpenURL resolver and extracts direct resource links

use crate::error::Result;
use crate::types::ResolverEntry;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for a WorldCat-style OpenURL link resolver
///
/// Performs one GET per lookup and returns the resource links embedded in
/// the JSON response, each stripped of the `wskey` credential parameter so
/// it is safe to hand to a client browser. Holds no per-call state.
pub struct LinkResolver {
    http: reqwest::Client,
}

impl LinkResolver {
    /// Create a resolver with default settings (30 second timeout)
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a resolver with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// Query the resolver and return sanitized resource links
    ///
    /// Always yields a (possibly empty) list: a missing URL, a non-200
    /// response, malformed JSON, and unusable response items all degrade
    /// to empty. Only transport-level failures surface as an error.
    pub async fn resolve(&self, open_url: Option<&str>) -> Result<Vec<String>> {
        let json = self.query(open_url).await?;
        Ok(Self::parse_response(json.as_ref()))
    }

    /// Perform the resolver GET and decode the body as JSON
    ///
    /// Returns `Ok(None)` when there is nothing to decode: no URL was
    /// given, the status was not 200, or the body was not valid JSON.
    /// No schema validation happens at this stage.
    pub async fn query(&self, open_url: Option<&str>) -> Result<Option<Value>> {
        let Some(open_url) = open_url else {
            return Ok(None);
        };

        let response = self.http.get(open_url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(decode_body(status, &body))
    }

    /// Extract sanitized links from a decoded resolver response
    ///
    /// Anything that is not an array of objects carrying a non-empty
    /// `linkerurl` contributes nothing; malformed items are skipped, never
    /// fatal. Item order is preserved.
    pub fn parse_response(json: Option<&Value>) -> Vec<String> {
        let Some(Value::Array(items)) = json else {
            debug!("Resolver response is missing or not an array");
            return Vec::new();
        };

        let links: Vec<String> = items
            .iter()
            .filter_map(|item| serde_json::from_value::<ResolverEntry>(item.clone()).ok())
            .filter_map(|entry| entry.link().and_then(filter_link))
            .collect();

        if links.is_empty() {
            debug!("No usable linker URLs in resolver response");
        } else {
            debug!(count = links.len(), "Found linker URLs in resolver response");
        }

        links
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a resolver response body, treating any non-200 status or an
/// unparseable body as "no result"
fn decode_body(status: StatusCode, body: &str) -> Option<Value> {
    if status != StatusCode::OK {
        debug!(status = %status, "Resolver returned non-200 status");
        return None;
    }

    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Resolver body was not valid JSON");
            None
        }
    }
}

/// Sanitize a linker URL: drop the `wskey` parameter and rebuild the link
/// from scheme, host, path and the remaining query
///
/// A linker URL without a query string is not actionable and yields `None`.
/// The query text is handled raw, with no decode/re-encode round trip, so
/// the resolver's original encoding reaches the client unchanged. Fragment,
/// userinfo and port are not carried over (legacy contract: scheme, host,
/// path and query only).
fn filter_link(linkerurl: &str) -> Option<String> {
    let parsed = Url::parse(linkerurl).ok()?;
    let raw_query = parsed.query()?;

    // Group duplicate keys, keeping first-occurrence key order and
    // within-key value order.
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for piece in raw_query.split('&') {
        let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key, vec![value])),
        }
    }

    let filtered = groups
        .iter()
        .filter(|(key, _)| *key != "wskey")
        .flat_map(|(key, values)| values.iter().map(move |value| format!("{key}={value}")))
        .collect::<Vec<_>>()
        .join("&");

    let host = parsed.host_str()?;
    // A bare "/" renders as no path, so "http://host?wskey=1" filters to
    // "http://host" rather than "http://host/".
    let path = match parsed.path() {
        "/" => "",
        path => path,
    };

    let link = if filtered.is_empty() {
        format!("{}://{}{}", parsed.scheme(), host, path)
    } else {
        format!("{}://{}{}?{}", parsed.scheme(), host, path, filtered)
    };

    Some(link)
}
