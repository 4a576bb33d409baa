//! Access service
//!
//! Turns a caller's user id into the principals the access engine works
//! with: a [`Viewer`] for reads and an [`Actor`] for writes.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use boosty_core::{Actor, Entitlements, Profile, Snowflake, Viewer};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::profile::ProfileService;

/// Principal resolution for the other services
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    /// Create a new AccessService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the viewer for `user_id`, or `None` for an anonymous caller
    #[instrument(skip(self))]
    pub async fn viewer(&self, user_id: Option<Snowflake>) -> ServiceResult<Option<Viewer>> {
        self.viewer_at(user_id, Utc::now()).await
    }

    /// Build the viewer with entitlements evaluated at `now`
    #[instrument(skip(self))]
    pub async fn viewer_at(
        &self,
        user_id: Option<Snowflake>,
        now: DateTime<Utc>,
    ) -> ServiceResult<Option<Viewer>> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let subscriptions = self.ctx.subscription_repo().find_by_subscriber(user_id).await?;
        let entitlements = Entitlements::from_subscriptions(&subscriptions, now);
        debug!(user_id = %user_id, tiers = entitlements.len(), "Loaded viewer entitlements");

        Ok(Some(Viewer::new(user_id, entitlements)))
    }

    /// Resolve the acting user and their profile
    ///
    /// An anonymous caller is `Unauthenticated`; the profile is created on
    /// first use.
    #[instrument(skip(self))]
    pub async fn require_actor(&self, user_id: Option<Snowflake>) -> ServiceResult<(Actor, Profile)> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let profile = ProfileService::new(self.ctx).ensure_profile_exists(user_id).await?;
        Ok((Actor::new(user_id, profile.id), profile))
    }
}
