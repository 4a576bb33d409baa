//! Access resolver - who may read a post and what they get to see
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. the post author always gets full content
//! 2. a post flagged free is open to everyone
//! 3. a post gated by no tier is open to everyone
//! 4. anonymous readers are denied
//! 5. a reader with effective access to any gating tier is granted

use serde::Serialize;
use tracing::debug;

use crate::entities::Post;
use crate::error::DomainError;

use super::viewer::Viewer;

/// Number of characters kept in a locked preview
pub const PREVIEW_CHARS: usize = 150;

/// Shown instead of a preview when the content is short
pub const LOCKED_PLACEHOLDER: &str = "This content is available to subscribers only.";

/// Rule that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    Author,
    FreePost,
    Untiered,
    Subscribed,
    Anonymous,
    NotSubscribed,
}

/// Rendered body of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    Full(String),
    Preview(String),
}

impl PostContent {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Full(text) | Self::Preview(text) => text,
        }
    }

    #[inline]
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Preview(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Full(text) | Self::Preview(text) => text,
        }
    }
}

/// Result of resolving a viewer against a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub granted: bool,
    pub reason: AccessReason,
    pub content: PostContent,
}

impl AccessDecision {
    fn grant(post: &Post, reason: AccessReason) -> Self {
        Self {
            granted: true,
            reason,
            content: PostContent::Full(post.content.clone()),
        }
    }

    fn deny(post: &Post, reason: AccessReason) -> Self {
        Self {
            granted: false,
            reason,
            content: PostContent::Preview(preview(&post.content)),
        }
    }
}

/// Decide the viewer's access to `post`
pub fn resolve(viewer: Option<&Viewer>, post: &Post) -> AccessDecision {
    let reason = decide(viewer, post);
    let decision = match reason {
        AccessReason::Anonymous | AccessReason::NotSubscribed => AccessDecision::deny(post, reason),
        _ => AccessDecision::grant(post, reason),
    };

    debug!(
        post_id = %post.id,
        user_id = ?viewer.map(|v| v.user_id),
        granted = decision.granted,
        reason = ?reason,
        "Resolved post access"
    );

    decision
}

/// Binary form of [`resolve`], used by filters
pub fn can_access(viewer: Option<&Viewer>, post: &Post) -> bool {
    matches!(
        decide(viewer, post),
        AccessReason::Author | AccessReason::FreePost | AccessReason::Untiered | AccessReason::Subscribed
    )
}

fn decide(viewer: Option<&Viewer>, post: &Post) -> AccessReason {
    if viewer.is_some_and(|v| v.is(post.author_id)) {
        return AccessReason::Author;
    }
    if post.is_free {
        return AccessReason::FreePost;
    }
    if post.tier_ids.is_empty() {
        return AccessReason::Untiered;
    }
    match viewer {
        None => AccessReason::Anonymous,
        Some(v) if v.entitlements.intersects(&post.tier_ids) => AccessReason::Subscribed,
        Some(_) => AccessReason::NotSubscribed,
    }
}

/// Teaser for locked content
///
/// Keeps the first [`PREVIEW_CHARS`] characters followed by `...` when the
/// content is longer; otherwise returns [`LOCKED_PLACEHOLDER`].
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => LOCKED_PLACEHOLDER.to_string(),
    }
}

/// Whether the viewer may leave a comment on `post`
pub fn can_comment(viewer: Option<&Viewer>, post: &Post) -> Result<(), DomainError> {
    let Some(v) = viewer else {
        return Err(DomainError::Unauthenticated);
    };
    if v.is(post.author_id) || (post.is_published() && can_access(viewer, post)) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            "You don't have access to comment on this post",
        ))
    }
}
