//! Media reference resolution
//!
//! Sign clips come back from the backend as paths like
//! `assets/signs/thankyou.mp4`. They are resolved against a configured base,
//! which may be a URL or a local directory.

use reqwest::Url;
use std::path::PathBuf;

/// Where relative media references live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaBase {
    Url(Url),
    Dir(PathBuf),
}

impl MediaBase {
    /// Interpret a configured base
    ///
    /// Anything that parses as an absolute URL is a URL, everything else a
    /// directory.
    pub fn parse(base: &str) -> Self {
        match Url::parse(base) {
            Ok(mut url) if !url.cannot_be_a_base() => {
                // Url::join replaces the last segment unless the path ends in '/'
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Self::Url(url)
            }
            _ => Self::Dir(PathBuf::from(base)),
        }
    }

    /// Resolve a media reference to something a player can open
    pub fn resolve(&self, reference: &str) -> String {
        if Url::parse(reference).is_ok() {
            return reference.to_string();
        }

        match self {
            Self::Url(base) => base
                .join(reference)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| reference.to_string()),
            Self::Dir(dir) => dir
                .join(reference.trim_start_matches('/'))
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Default for MediaBase {
    fn default() -> Self {
        Self::Dir(PathBuf::from("frontend"))
    }
}
