//! Profile service
//!
//! Lazy profile creation, profile reads and edits, creator listing.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use boosty_core::access::{authorize_mutation, MutationAction, MutationTarget};
use boosty_core::{Actor, Profile, Snowflake};

use crate::dto::{ProfileResponse, ProfileWithCounts, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Return the user's profile, creating it on first reference
    ///
    /// Safe to call concurrently; the store keeps one profile per user.
    #[instrument(skip(self))]
    pub async fn ensure_profile_exists(&self, user_id: Snowflake) -> ServiceResult<Profile> {
        if let Some(profile) = self.ctx.profile_repo().find_by_user(user_id).await? {
            return Ok(profile);
        }

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let candidate = Profile::new(self.ctx.generate_id(), user_id);
        let profile = self.ctx.profile_repo().create_if_absent(&candidate).await?;
        if profile.id == candidate.id {
            info!(user_id = %user_id, profile_id = %profile.id, "Profile created");
        }

        Ok(profile)
    }

    /// Get a profile by id
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", profile_id.to_string()))?;

        Ok(self.with_counts(profile).await?.into())
    }

    /// Get the profile belonging to a user
    #[instrument(skip(self))]
    pub async fn get_user_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let profile = self.ensure_profile_exists(user_id).await?;
        Ok(self.with_counts(profile).await?.into())
    }

    /// Edit a profile; only its owner may
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Option<Snowflake>,
        profile_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;

        let mut profile = self
            .ctx
            .profile_repo()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", profile_id.to_string()))?;

        let actor = Actor::new(user_id, profile.id);
        authorize_mutation(Some(&actor), MutationTarget::Profile(&profile), MutationAction::Update)?;

        if let Some(bio) = request.bio {
            Profile::validate_bio(&bio)?;
            profile.bio = bio;
        }
        if let Some(avatar) = request.avatar {
            profile.avatar = (!avatar.is_empty()).then_some(avatar);
        }
        if let Some(is_creator) = request.is_creator {
            if is_creator != profile.is_creator {
                info!(profile_id = %profile.id, is_creator, "Creator flag changed");
            }
            profile.is_creator = is_creator;
        }
        profile.updated_at = Utc::now();

        self.ctx.profile_repo().update(&profile).await?;
        Ok(self.with_counts(profile).await?.into())
    }

    /// Creator profiles, optionally only those with published posts in a category
    #[instrument(skip(self))]
    pub async fn list_creators(
        &self,
        category_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<ProfileResponse>> {
        let creators = self.ctx.profile_repo().find_creators(category_id).await?;

        let mut responses = Vec::with_capacity(creators.len());
        for profile in creators {
            responses.push(self.with_counts(profile).await?.into());
        }
        Ok(responses)
    }

    pub(crate) async fn with_counts(&self, profile: Profile) -> ServiceResult<ProfileWithCounts> {
        let (follower_count, following_count) = tokio::try_join!(
            self.ctx.follow_repo().count_followers(profile.id),
            self.ctx.follow_repo().count_following(profile.user_id),
        )?;

        Ok(ProfileWithCounts {
            profile,
            follower_count,
            following_count,
        })
    }
}
