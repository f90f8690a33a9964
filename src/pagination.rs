//! Lazy pagination over Canvas list endpoints.
//!
//! Canvas paginates with RFC 5988 `Link` response headers: every page of a
//! list endpoint carries a `rel="next"` URL until the last page, which
//! omits it. [`PageSequence`] follows those links on demand.

use std::marker::PhantomData;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::CanvasClient;
use crate::error::{CanvasError, Result};

/// Maximum pages to fetch in [`PageSequence::collect_all`] (safety limit).
const MAX_PAGES: u32 = 1000;

/// Where the next fetch goes.
enum Cursor {
    /// Nothing fetched yet; the first request is built from a relative
    /// path plus query params.
    Start {
        path: String,
        params: Vec<(String, String)>,
    },
    /// Absolute URL taken from the previous page's `Link` header.
    Next(Url),
    Exhausted,
}

/// A lazy, forward-only sequence of items from a paginated endpoint.
///
/// Construction performs no I/O; the first HTTP request happens on the
/// first [`next_page`](Self::next_page) call, and each subsequent page is
/// fetched only when asked for. The sequence is finite (it ends when the
/// server stops sending a `rel="next"` link) and is not restartable:
/// re-invoke the originating method for a fresh sequence.
///
/// Items are yielded in server order; no client-side reordering or
/// deduplication is applied.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> canvasapi::Result<()> {
/// use canvasapi::{CanvasClient, Course, Get};
///
/// let client = CanvasClient::new("token", "https://canvas.example.edu")?;
/// let course = Course::get(&client, 1).await?;
///
/// let mut assignments = course.assignments(&client);
/// while let Some(page) = assignments.next_page().await? {
///     for assignment in page {
///         println!("{assignment}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct PageSequence<T> {
    client: CanvasClient,
    cursor: Cursor,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for PageSequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cursor = match &self.cursor {
            Cursor::Start { path, .. } => format!("start({path})"),
            Cursor::Next(url) => format!("next({url})"),
            Cursor::Exhausted => "exhausted".to_string(),
        };
        f.debug_struct("PageSequence")
            .field("cursor", &cursor)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> PageSequence<T> {
    pub(crate) fn new(client: &CanvasClient, path: impl Into<String>) -> Self {
        Self::with_params(client, path, Vec::new())
    }

    pub(crate) fn with_params(
        client: &CanvasClient,
        path: impl Into<String>,
        params: Vec<(String, String)>,
    ) -> Self {
        Self {
            client: client.clone(),
            cursor: Cursor::Start {
                path: path.into(),
                params,
            },
            _marker: PhantomData,
        }
    }

    /// Request a specific page size from the server.
    ///
    /// Only meaningful before the first fetch; the server echoes the size
    /// into the `Link` URLs it hands back.
    #[must_use]
    pub fn per_page(mut self, count: u32) -> Self {
        if let Cursor::Start { params, .. } = &mut self.cursor {
            params.push(("per_page".to_string(), count.to_string()));
        }
        self
    }

    /// Fetch the next page of items.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted. A failed fetch
    /// exhausts the sequence; the error propagates to the caller.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let response = match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
            Cursor::Start { path, params } => {
                if params.is_empty() {
                    self.client.get(&path).await?
                } else {
                    self.client.get_with_query(&path, &params).await?
                }
            }
            Cursor::Next(url) => self.client.get_url(url).await?,
            Cursor::Exhausted => return Ok(None),
        };

        if let Some(next) = next_link(response.headers()) {
            self.cursor = Cursor::Next(Url::parse(&next)?);
        }

        let items: Vec<T> = response.json().await.map_err(CanvasError::HttpError)?;
        Ok(Some(items))
    }

    /// Drain the remaining pages into a single vector.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut pages = 0u32;

        while let Some(items) = self.next_page().await? {
            all_items.extend(items);
            pages += 1;

            // Safety limit to prevent infinite loops
            if pages >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}

/// Extract the `rel="next"` target from the response headers, if present.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    parse_next_link(value)
}

/// Parse a `Link` header value and return the `rel="next"` URL.
///
/// The header format is `<url>; rel="current", <url>; rel="next", ...`.
/// Canvas sends absolute URLs, so the result is returned verbatim.
pub(crate) fn parse_next_link(header_value: &str) -> Option<String> {
    for link in header_value.split(',') {
        let link = link.trim();

        let rel = link.split(';').find_map(|part| {
            part.trim()
                .strip_prefix("rel=")
                .map(|r| r.trim_matches('"'))
        });
        if rel != Some("next") {
            continue;
        }

        let url = link
            .split(';')
            .next()
            .map(|s| s.trim().trim_start_matches('<').trim_end_matches('>'))?;
        if url.is_empty() {
            return None;
        }
        return Some(url.to_string());
    }

    None
}
