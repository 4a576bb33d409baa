//! Post service
//!
//! Handles post authoring, retrieval and the listing surfaces. Every read
//! goes through the access engine; hidden posts are reported as missing.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use boosty_core::access::{
    authorize_mutation, can_retrieve, filter_listable, resolve, MutationAction, MutationTarget,
};
use boosty_core::{Actor, DomainError, Post, PostQuery, Snowflake, Viewer};

use crate::dto::{
    CreatePostRequest, ListPostsQuery, MyPostsQuery, PostResponse, PostWithAccess,
    UpdatePostRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post as a draft, or published right away
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        user_id: Option<Snowflake>,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;
        let (actor, _) = AccessService::new(self.ctx).require_actor(user_id).await?;

        if let Some(category_id) = request.category_id {
            self.ensure_category(category_id).await?;
        }
        let tier_ids = self.owned_tiers(&actor, &request.tier_ids).await?;

        let mut post = Post::new(self.ctx.generate_id(), actor.user_id, request.title, request.content);
        post.category_id = request.category_id;
        post.is_free = request.is_free;
        post.set_tiers(tier_ids);
        if request.publish {
            post.publish()?;
        }

        self.ctx.post_repo().create(&post).await?;

        info!(
            post_id = %post.id,
            author_id = %post.author_id,
            status = %post.status,
            tiers = post.tier_ids.len(),
            "Post created"
        );

        Ok(Self::render(Some(&Viewer::unsubscribed(actor.user_id)), post))
    }

    /// Fetch a single post
    ///
    /// Drafts and archived posts exist only for their author; published posts
    /// the caller cannot read are reported as not found.
    #[instrument(skip(self))]
    pub async fn get_post(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<PostResponse> {
        let viewer = AccessService::new(self.ctx).viewer(user_id).await?;
        let post = self.find_post(post_id).await?;

        if !can_retrieve(viewer.as_ref(), &post) {
            return Err(ServiceError::not_found("Post", post_id.to_string()));
        }

        Ok(Self::render(viewer.as_ref(), post))
    }

    /// Render a post page, with a teaser when the caller lacks access
    ///
    /// Unlike [`get_post`](Self::get_post), published posts are always shown;
    /// locked ones carry a preview instead of the body.
    #[instrument(skip(self))]
    pub async fn view_post(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<PostResponse> {
        let viewer = AccessService::new(self.ctx).viewer(user_id).await?;
        let post = self.find_post(post_id).await?;

        let is_author = viewer.as_ref().is_some_and(|v| v.is(post.author_id));
        if !post.is_published() && !is_author {
            return Err(ServiceError::not_found("Post", post_id.to_string()));
        }

        Ok(Self::render(viewer.as_ref(), post))
    }

    /// Published posts the caller can read, newest first
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        user_id: Option<Snowflake>,
        query: ListPostsQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        let viewer = AccessService::new(self.ctx).viewer(user_id).await?;
        let candidates = self
            .ctx
            .post_repo()
            .find_published(PostQuery {
                category_id: query.category_id,
                author_id: query.author_id,
            })
            .await?;

        Ok(Self::render_listing(viewer.as_ref(), candidates))
    }

    /// Published posts of the creators the caller follows
    #[instrument(skip(self))]
    pub async fn feed(&self, user_id: Option<Snowflake>) -> ServiceResult<Vec<PostResponse>> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let viewer = AccessService::new(self.ctx).viewer(Some(user_id)).await?;

        let follows = self.ctx.follow_repo().find_by_subscriber(user_id).await?;
        let mut author_ids = Vec::with_capacity(follows.len());
        for follow in follows {
            if let Some(profile) = self.ctx.profile_repo().find_by_id(follow.creator_id).await? {
                author_ids.push(profile.user_id);
            }
        }
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.ctx.post_repo().find_published_by_authors(&author_ids).await?;
        Ok(Self::render_listing(viewer.as_ref(), candidates))
    }

    /// The caller's own posts in any status, newest first
    #[instrument(skip(self))]
    pub async fn my_posts(
        &self,
        user_id: Option<Snowflake>,
        query: MyPostsQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let author = Viewer::unsubscribed(user_id);

        let mut posts = self.ctx.post_repo().find_by_author(user_id, query.status).await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(posts
            .into_iter()
            .map(|post| Self::render(Some(&author), post))
            .collect())
    }

    /// Edit a post; only its author may
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;
        let (actor, mut post) = self.load_for_mutation(user_id, post_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Post(&post), MutationAction::Update)?;

        if let Some(title) = request.title {
            post.title = title;
        }
        if let Some(content) = request.content {
            post.content = content;
        }
        if request.remove_category {
            post.category_id = None;
        } else if let Some(category_id) = request.category_id {
            self.ensure_category(category_id).await?;
            post.category_id = Some(category_id);
        }
        if let Some(is_free) = request.is_free {
            post.is_free = is_free;
        }
        if let Some(tier_ids) = request.tier_ids {
            let tier_ids = self.owned_tiers(&actor, &tier_ids).await?;
            post.set_tiers(tier_ids);
        }
        post.updated_at = Utc::now();

        self.ctx.post_repo().update(&post).await?;
        info!(post_id = %post.id, "Post updated");

        Ok(Self::render(Some(&Viewer::unsubscribed(actor.user_id)), post))
    }

    /// Delete a post and its comments; only its author may
    #[instrument(skip(self))]
    pub async fn delete_post(&self, user_id: Option<Snowflake>, post_id: Snowflake) -> ServiceResult<()> {
        let (actor, post) = self.load_for_mutation(user_id, post_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Post(&post), MutationAction::Delete)?;

        self.ctx.post_repo().delete(post.id).await?;
        info!(post_id = %post.id, "Post deleted");
        Ok(())
    }

    /// Move a draft to published
    #[instrument(skip(self))]
    pub async fn publish_post(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<PostResponse> {
        let (actor, mut post) = self.load_for_mutation(user_id, post_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Post(&post), MutationAction::Publish)?;

        post.publish()?;
        self.ctx.post_repo().update(&post).await?;
        info!(post_id = %post.id, author_id = %post.author_id, "Post published");

        Ok(Self::render(Some(&Viewer::unsubscribed(actor.user_id)), post))
    }

    /// Move a published post to archived
    #[instrument(skip(self))]
    pub async fn archive_post(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<PostResponse> {
        let (actor, mut post) = self.load_for_mutation(user_id, post_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Post(&post), MutationAction::Archive)?;

        post.archive()?;
        self.ctx.post_repo().update(&post).await?;
        info!(post_id = %post.id, author_id = %post.author_id, "Post archived");

        Ok(Self::render(Some(&Viewer::unsubscribed(actor.user_id)), post))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))
    }

    /// Load a post the actor is about to mutate
    ///
    /// A post the actor cannot even retrieve is reported as not found, so
    /// mutation attempts do not reveal hidden posts.
    async fn load_for_mutation(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<(Actor, Post)> {
        let access = AccessService::new(self.ctx);
        let (actor, _) = access.require_actor(user_id).await?;
        let viewer = access.viewer(Some(actor.user_id)).await?;

        let post = self.find_post(post_id).await?;
        if !can_retrieve(viewer.as_ref(), &post) {
            return Err(ServiceError::not_found("Post", post_id.to_string()));
        }

        Ok((actor, post))
    }

    async fn ensure_category(&self, category_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;
        Ok(())
    }

    /// Check that every requested tier exists and belongs to the actor
    async fn owned_tiers(
        &self,
        actor: &Actor,
        tier_ids: &[Snowflake],
    ) -> ServiceResult<BTreeSet<Snowflake>> {
        let requested: BTreeSet<Snowflake> = tier_ids.iter().copied().collect();
        if requested.is_empty() {
            return Ok(requested);
        }

        let ids: Vec<Snowflake> = requested.iter().copied().collect();
        let found: HashMap<Snowflake, _> = self
            .ctx
            .tier_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|tier| (tier.id, tier))
            .collect();

        for id in &requested {
            let tier = found.get(id).ok_or(DomainError::TierNotFound(*id))?;
            if !tier.is_owned_by(actor.profile_id) {
                return Err(DomainError::ForeignTier(*id).into());
            }
        }

        Ok(requested)
    }

    fn render(viewer: Option<&Viewer>, post: Post) -> PostResponse {
        let decision = resolve(viewer, &post);
        PostResponse::from(PostWithAccess { post, decision })
    }

    fn render_listing(viewer: Option<&Viewer>, candidates: Vec<Post>) -> Vec<PostResponse> {
        filter_listable(viewer, candidates)
            .into_iter()
            .map(|post| Self::render(viewer, post))
            .collect()
    }
}
