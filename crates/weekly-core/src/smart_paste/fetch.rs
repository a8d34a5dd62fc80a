//! Page fetch for title extraction.
//!
//! Uses the curl crate (libcurl) for a single GET. Redirects are not followed
//! by libcurl: exactly one hop is taken by hand, and whatever the second
//! response is gets accepted as-is (a second redirect is not chased).
//! Because libcurl's redirect protocol limits never apply, the hop target's
//! scheme is checked here.
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

mod error;

pub use error::FetchError;

use std::str;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Identifies the client to the remote site.
pub const USER_AGENT: &str = "WeeklyTool SmartPaste/0.0.1 (+vscode)";

/// One raw HTTP exchange: status, `Location` (if any) and body bytes.
#[derive(Debug, Clone)]
struct RawResponse {
    status: u32,
    location: Option<String>,
    body: Vec<u8>,
}

/// GETs `url` and returns its body as text, following at most one redirect.
///
/// `timeout` bounds connecting and any stretch with no bytes received; a page
/// that keeps streaming is not cut off. Only `http` and `https` are fetched,
/// for the pasted URL and the redirect target alike. If `abort` is set while
/// the transfer runs, the request is torn down and `FetchError::Cancelled` is
/// returned.
pub fn fetch_text(
    url: &str,
    timeout: Duration,
    abort: Option<&AtomicBool>,
) -> Result<String, FetchError> {
    let url = parse_http_url(url)?;
    let first = get_once(url.as_str(), timeout, abort)?;

    if (300..400).contains(&first.status) {
        if let Some(location) = first.location.as_deref() {
            let target = resolve_location(url.as_str(), location)?;
            tracing::debug!(status = first.status, from = %url, to = %target, "following redirect");
            let second = get_once(&target, timeout, abort)?;
            return into_text(second);
        }
    }

    into_text(first)
}

fn into_text(resp: RawResponse) -> Result<String, FetchError> {
    if resp.status >= 400 {
        return Err(FetchError::Http(resp.status));
    }
    Ok(String::from_utf8_lossy(&resp.body).into_owned())
}

fn require_http(url: url::Url) -> Result<url::Url, FetchError> {
    if matches!(url.scheme(), "http" | "https") {
        return Ok(url);
    }
    Err(FetchError::InvalidUrl(format!(
        "{}: scheme {} not allowed",
        url,
        url.scheme()
    )))
}

fn parse_http_url(raw: &str) -> Result<url::Url, FetchError> {
    let url = url::Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    require_http(url)
}

/// Resolves a `Location` value against the URL that produced it.
/// Absolute targets pass through unchanged; anything but http(s) is refused.
pub(crate) fn resolve_location(base: &str, location: &str) -> Result<String, FetchError> {
    let base = parse_http_url(base)?;
    let target = base
        .join(location)
        .map_err(|e| FetchError::InvalidUrl(format!("{location}: {e}")))?;
    require_http(target).map(String::from)
}

fn is_aborted(abort: Option<&AtomicBool>) -> bool {
    abort.is_some_and(|a| a.load(Ordering::Relaxed))
}

/// Tracks time since the last received byte.
#[derive(Debug)]
pub(crate) struct IdleWatch {
    limit: Duration,
    last_bytes: f64,
    last_activity: Instant,
}

impl IdleWatch {
    pub(crate) fn new(limit: Duration, now: Instant) -> Self {
        Self {
            limit,
            last_bytes: 0.0,
            last_activity: now,
        }
    }

    /// Feeds the downloaded-byte counter; true once nothing arrived for `limit`.
    pub(crate) fn expired(&mut self, dlnow: f64, now: Instant) -> bool {
        if dlnow > self.last_bytes {
            self.last_bytes = dlnow;
            self.last_activity = now;
            return false;
        }
        now.saturating_duration_since(self.last_activity) >= self.limit
    }
}

fn get_once(
    url: &str,
    timeout: Duration,
    abort: Option<&AtomicBool>,
) -> Result<RawResponse, FetchError> {
    if is_aborted(abort) {
        return Err(FetchError::Cancelled);
    }

    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    let mut idle = IdleWatch::new(timeout, Instant::now());
    let mut idle_expired = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::from_curl)?;
    easy.get(true).map_err(FetchError::from_curl)?;
    easy.follow_location(false).map_err(FetchError::from_curl)?;
    easy.useragent(USER_AGENT).map_err(FetchError::from_curl)?;
    easy.connect_timeout(timeout).map_err(FetchError::from_curl)?;
    // Progress callbacks are off by default; they drive the abort and idle checks.
    easy.progress(true).map_err(FetchError::from_curl)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(FetchError::from_curl)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(FetchError::from_curl)?;
        transfer
            .progress_function(|_, dlnow, _, _| {
                if is_aborted(abort) {
                    return false;
                }
                if idle.expired(dlnow, Instant::now()) {
                    idle_expired = true;
                    return false;
                }
                true
            })
            .map_err(FetchError::from_curl)?;
        transfer.perform()
    };

    match performed {
        Ok(()) => {}
        Err(_) if idle_expired => return Err(FetchError::Timeout),
        Err(e) => return Err(FetchError::from_curl(e)),
    }

    let status = easy.response_code().map_err(FetchError::from_curl)?;
    Ok(RawResponse {
        status,
        location: location_header(&headers),
        body,
    })
}

/// Picks the `Location` header out of collected header lines.
pub(crate) fn location_header(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if !name.trim().eq_ignore_ascii_case("location") {
            return None;
        }
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_header_found_case_insensitive() {
        let lines = [
            "HTTP/1.1 302 Found".to_string(),
            "content-type: text/html".to_string(),
            "LOCATION: https://example.com/next".to_string(),
        ];
        assert_eq!(
            location_header(&lines).as_deref(),
            Some("https://example.com/next")
        );
    }

    #[test]
    fn location_header_missing_or_empty() {
        let lines = ["HTTP/1.1 301 Moved".to_string(), "Location:   ".to_string()];
        assert!(location_header(&lines).is_none());
        assert!(location_header(&[]).is_none());
    }

    #[test]
    fn resolve_relative_location() {
        assert_eq!(
            resolve_location("https://example.com/a/b?q=1", "/c").unwrap(),
            "https://example.com/c"
        );
        assert_eq!(
            resolve_location("https://example.com/a/b", "d").unwrap(),
            "https://example.com/a/d"
        );
    }

    #[test]
    fn resolve_absolute_location_passes_through() {
        assert_eq!(
            resolve_location("https://example.com/a", "http://other.org/x").unwrap(),
            "http://other.org/x"
        );
    }

    #[test]
    fn resolve_against_bad_base_is_invalid_url() {
        assert!(matches!(
            resolve_location("not a url", "/x"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn redirect_to_non_http_scheme_refused() {
        for location in ["file:///etc/passwd", "ftp://example.com/x", "gopher://h/1"] {
            assert!(
                matches!(
                    resolve_location("https://example.com/a", location),
                    Err(FetchError::InvalidUrl(_))
                ),
                "{location}"
            );
        }
    }

    #[test]
    fn non_http_start_url_refused() {
        let r = fetch_text("file:///etc/hostname", Duration::from_secs(1), None);
        assert!(matches!(r, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn idle_watch_resets_on_progress() {
        let t0 = Instant::now();
        let mut idle = IdleWatch::new(Duration::from_millis(500), t0);
        assert!(!idle.expired(0.0, t0 + Duration::from_millis(400)));
        assert!(!idle.expired(100.0, t0 + Duration::from_millis(900)));
        assert!(!idle.expired(100.0, t0 + Duration::from_millis(1300)));
        assert!(idle.expired(100.0, t0 + Duration::from_millis(1400)));
    }

    #[test]
    fn idle_watch_expires_without_bytes() {
        let t0 = Instant::now();
        let mut idle = IdleWatch::new(Duration::from_millis(300), t0);
        assert!(idle.expired(0.0, t0 + Duration::from_millis(300)));
    }

    #[test]
    fn pre_aborted_fetch_never_connects() {
        let abort = AtomicBool::new(true);
        let r = fetch_text(
            "http://127.0.0.1:9/never",
            Duration::from_secs(1),
            Some(&abort),
        );
        assert!(matches!(r, Err(FetchError::Cancelled)));
    }
}
