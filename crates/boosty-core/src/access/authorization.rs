//! Authorization gate for mutations
//!
//! Reading is decided by the resolver; this module only covers writes.
//! A missing actor is `Unauthenticated`, anything else that fails is
//! `Forbidden`, including invalid lifecycle transitions.

use std::fmt;

use tracing::warn;

use crate::entities::{Comment, Post, PostStatus, Profile, Tier, TierSubscription};
use crate::error::DomainError;

use super::viewer::Actor;

/// Object a mutation is aimed at
#[derive(Debug, Clone, Copy)]
pub enum MutationTarget<'a> {
    Post(&'a Post),
    Comment(&'a Comment),
    Tier(&'a Tier),
    Subscription(&'a TierSubscription),
    Profile(&'a Profile),
}

impl MutationTarget<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::Comment(_) => "comment",
            Self::Tier(_) => "tier",
            Self::Subscription(_) => "subscription",
            Self::Profile(_) => "profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Update,
    Delete,
    Publish,
    Archive,
    Cancel,
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Publish => "publish",
            Self::Archive => "archive",
            Self::Cancel => "cancel",
        })
    }
}

/// Check that `actor` may perform `action` on `target`
pub fn authorize_mutation(
    actor: Option<&Actor>,
    target: MutationTarget<'_>,
    action: MutationAction,
) -> Result<(), DomainError> {
    let Some(actor) = actor else {
        return Err(DomainError::Unauthenticated);
    };

    let result = check(actor, target, action);
    if let Err(ref e) = result {
        warn!(
            user_id = %actor.user_id,
            target = target.kind(),
            action = %action,
            error = %e,
            "Mutation rejected"
        );
    }
    result
}

fn check(actor: &Actor, target: MutationTarget<'_>, action: MutationAction) -> Result<(), DomainError> {
    use MutationAction::{Archive, Cancel, Delete, Publish, Update};

    match (target, action) {
        (MutationTarget::Post(post), Update | Delete) => {
            owned(post.is_authored_by(actor.user_id), "You can only modify your own posts")
        }
        (MutationTarget::Post(post), Publish) => owned(
            post.is_authored_by(actor.user_id) && post.status == PostStatus::Draft,
            "You can only publish your own draft posts",
        ),
        (MutationTarget::Post(post), Archive) => owned(
            post.is_authored_by(actor.user_id) && post.status == PostStatus::Published,
            "You can only archive your own published posts",
        ),
        (MutationTarget::Comment(comment), Update | Delete) => owned(
            comment.author_id == actor.user_id,
            "You can only modify your own comments",
        ),
        (MutationTarget::Tier(tier), Update | Delete) => owned(
            tier.is_owned_by(actor.profile_id),
            "You can only modify your own tiers",
        ),
        (MutationTarget::Subscription(sub), Cancel) => owned(
            sub.subscriber_id == actor.user_id,
            "You can only cancel your own subscriptions",
        ),
        (MutationTarget::Profile(profile), Update) => owned(
            profile.is_owned_by(actor.user_id),
            "You can only edit your own profile",
        ),
        (target, action) => Err(DomainError::forbidden(format!(
            "Cannot {action} a {}",
            target.kind()
        ))),
    }
}

#[inline]
fn owned(allowed: bool, reason: &str) -> Result<(), DomainError> {
    if allowed {
        Ok(())
    } else {
        Err(DomainError::forbidden(reason))
    }
}

/// Creator-only operations (tier creation, dashboard)
pub fn require_creator(profile: &Profile) -> Result<(), DomainError> {
    if profile.is_creator {
        Ok(())
    } else {
        Err(DomainError::NotCreator)
    }
}
