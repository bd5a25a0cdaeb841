//! Turns a victory clip link into an embeddable player URL.
//!
//! The clip host only serves embeds to pages whose hostname is passed as
//! `parent`, so callers supply the hostname the viewer is browsing.

use thiserror::Error;

const EMBED_BASE: &str = "https://clips.twitch.tv/embed";
const CLIP_PATH_MARKER: &str = "/clip/";
const CLIP_HOST_MARKER: &str = "clips.twitch.tv/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    #[error("Could not extract clip ID from URL: {0}")]
    MissingClipId(String),
}

/// Pull the clip identifier out of any of the supported link shapes:
/// `https://www.twitch.tv/<user>/clip/<id>`, `https://clips.twitch.tv/<id>`,
/// or as a last resort the final path segment.
pub fn extract_clip_id(clip_url: &str) -> Option<&str> {
    let clean = clip_url.split('?').next().unwrap_or_default();

    let candidate = if let Some((_, rest)) = clean.split_once(CLIP_PATH_MARKER) {
        rest
    } else if let Some((_, rest)) = clean.split_once(CLIP_HOST_MARKER) {
        rest
    } else {
        clean.rsplit('/').next().unwrap_or_default()
    };

    let id = candidate.split('/').next().unwrap_or_default();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Build the embed URL for `clip_url`, allowing it to play on `parent_host`
pub fn resolve_embed_url(clip_url: &str, parent_host: &str) -> Result<String, ClipError> {
    let clip_id =
        extract_clip_id(clip_url).ok_or_else(|| ClipError::MissingClipId(clip_url.to_string()))?;

    Ok(format!(
        "{}?clip={}&parent={}",
        EMBED_BASE,
        urlencoding::encode(clip_id),
        urlencoding::encode(parent_host)
    ))
}

/// Lenient form of [`resolve_embed_url`] for views: logs the failure and
/// yields an empty string so no player is rendered.
pub fn embed_url_or_empty(clip_url: &str, parent_host: &str) -> String {
    match resolve_embed_url(clip_url, parent_host) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("{}", e);
            String::new()
        }
    }
}
