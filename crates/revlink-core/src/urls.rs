//! Redirect target rendering.

use revlink_config::UrlsConfig;
use revlink_types::{CanonicalPath, CanonicalRevision};
use url::Url;

use crate::{CoreError, CoreResult, Resolution};

/// Seconds the portal page waits before redirecting.
const PORTAL_REFRESH_SECS: u32 = 3;

/// Builds tracker, browser and portal URLs from configured bases.
///
/// Repository path components and project slugs are percent-encoded one
/// segment at a time, so a `#`, `?` or non-ASCII name stays inside its
/// segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    tracker: Url,
    browser: Url,
    portal: String,
}

impl UrlBuilder {
    /// Creates a builder. Trailing `/` on the bases is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`] if a base does not parse as an
    /// absolute URL, or if the tracker or browser base cannot carry a path.
    pub fn new(tracker: &str, browser: &str, portal: &str) -> CoreResult<Self> {
        parse("urls.portal", portal)?;

        Ok(Self {
            tracker: path_base("urls.tracker", tracker)?,
            browser: path_base("urls.browser", browser)?,
            portal: portal.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a builder from the `[urls]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`] naming the unusable field.
    pub fn from_config(config: &UrlsConfig) -> CoreResult<Self> {
        Self::new(&config.tracker, &config.browser, &config.portal)
    }

    /// Project tracker URL for a revision of the project at the end of `chain`.
    #[must_use]
    pub fn tracker_url(&self, chain: &[String], revision: &CanonicalRevision) -> String {
        let segments = std::iter::once("projects")
            .chain(chain.iter().map(String::as_str))
            .chain(["repository", "revisions", revision.as_str()]);
        append_segments(&self.tracker, segments)
    }

    /// Code browser URL for a revision of the repository at `path`.
    #[must_use]
    pub fn browser_url(&self, path: &CanonicalPath, revision: &CanonicalRevision) -> String {
        let segments = path
            .relative()
            .split('/')
            .chain(["commit", revision.as_str()]);
        append_segments(&self.browser, segments)
    }

    /// Portal URL.
    #[must_use]
    pub fn portal_url(&self) -> &str {
        &self.portal
    }

    /// Renders the URL a resolution redirects to.
    #[must_use]
    pub fn render(&self, resolution: &Resolution) -> String {
        match resolution {
            Resolution::Tracker { chain, revision } => self.tracker_url(chain, revision),
            Resolution::Browser { path, revision } => self.browser_url(path, revision),
            Resolution::Portal => self.portal_url().to_string(),
        }
    }

    /// Informational page sent when nothing resolves; refreshes to the portal.
    #[must_use]
    pub fn portal_page(&self) -> String {
        let portal = escape_html(&self.portal);
        format!(
            "<html><head><meta http-equiv=\"refresh\" content=\"{PORTAL_REFRESH_SECS};url={portal}\"></head>\
             <body>The repository or commit cannot be found, or the commit is not unique. \
             Redirecting to <a href=\"{portal}\">{portal}</a>...</body></html>"
        )
    }
}

fn parse(field: &'static str, raw: &str) -> CoreResult<Url> {
    Url::parse(raw.trim()).map_err(|e| CoreError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

fn path_base(field: &'static str, raw: &str) -> CoreResult<Url> {
    let url = parse(field, raw)?;
    if url.cannot_be_a_base() {
        return Err(CoreError::InvalidUrl {
            field,
            reason: "cannot carry a path".to_string(),
        });
    }
    Ok(url)
}

fn append_segments<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut url = base.clone();
    // `path_base` only admits bases that can carry a path.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.into()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
