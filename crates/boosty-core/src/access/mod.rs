//! Access engine - pure rules over entity snapshots
//!
//! Nothing here touches storage. Callers load the post, the viewer's
//! subscriptions and the relevant tiers, then ask these functions.

mod authorization;
mod resolver;
mod tier_limit;
mod viewer;
mod visibility;

pub use authorization::{authorize_mutation, require_creator, MutationAction, MutationTarget};
pub use resolver::{
    can_access, can_comment, preview, resolve, AccessDecision, AccessReason,
    PostContent, LOCKED_PLACEHOLDER, PREVIEW_CHARS,
};
pub use tier_limit::{validate_tier_insert, validate_tier_name};
pub use viewer::{Actor, Entitlements, Viewer};
pub use visibility::{can_retrieve, filter_listable, filter_listable_comments, is_listable_comment};
