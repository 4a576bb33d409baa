//! Creator dashboard

use tracing::instrument;

use boosty_core::access::{require_creator, resolve};
use boosty_core::{PostStatus, Snowflake, Viewer};

use crate::dto::{
    CommentResponse, DashboardResponse, FollowResponse, PostResponse, PostStats, PostWithAccess,
    ProfileResponse, TierResponse, TierWithCount,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::profile::ProfileService;

/// Items shown in each "recent" section
pub const RECENT_LIMIT: usize = 5;

/// Dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new DashboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Overview of the caller's creator activity
    #[instrument(skip(self))]
    pub async fn dashboard(&self, user_id: Option<Snowflake>) -> ServiceResult<DashboardResponse> {
        let (actor, profile) = AccessService::new(self.ctx).require_actor(user_id).await?;
        require_creator(&profile)?;

        let (mut posts, comments, followers, mut tiers) = tokio::try_join!(
            self.ctx.post_repo().find_by_author(actor.user_id, None),
            self.ctx.comment_repo().find_on_posts_by(actor.user_id, RECENT_LIMIT as i64),
            self.ctx.follow_repo().find_by_creator(profile.id),
            self.ctx.tier_repo().find_by_creator(profile.id),
        )?;

        let stats = posts.iter().fold(PostStats::default(), |mut stats, post| {
            stats.total += 1;
            match post.status {
                PostStatus::Draft => stats.drafts += 1,
                PostStatus::Published => stats.published += 1,
                PostStatus::Archived => stats.archived += 1,
            }
            stats
        });

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        let author = Viewer::unsubscribed(actor.user_id);
        let recent_posts: Vec<PostResponse> = posts
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|post| {
                let decision = resolve(Some(&author), &post);
                PostResponse::from(PostWithAccess { post, decision })
            })
            .collect();

        tiers.sort_by_key(boosty_core::Tier::display_key);
        let mut tier_responses = Vec::with_capacity(tiers.len());
        let mut paid_subscriber_count = 0;
        for tier in tiers {
            let subscriber_count = self.ctx.tier_repo().subscriber_count(tier.id).await?;
            paid_subscriber_count += subscriber_count;
            tier_responses.push(TierResponse::from(&TierWithCount { tier, subscriber_count }));
        }

        let profile: ProfileResponse = ProfileService::new(self.ctx).with_counts(profile).await?.into();

        Ok(DashboardResponse {
            profile,
            posts: stats,
            paid_subscriber_count,
            tiers: tier_responses,
            recent_posts,
            recent_comments: comments.iter().map(CommentResponse::from).collect(),
            recent_followers: followers
                .iter()
                .take(RECENT_LIMIT)
                .map(FollowResponse::from)
                .collect(),
        })
    }
}
