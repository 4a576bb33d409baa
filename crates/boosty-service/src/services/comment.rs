//! Comment service
//!
//! Comment visibility is derived from the parent post at read time.

use std::collections::{BTreeSet, HashMap};

use tracing::{info, instrument};
use validator::Validate;

use boosty_core::access::{
    authorize_mutation, can_comment, can_retrieve, filter_listable_comments, is_listable_comment,
    MutationAction, MutationTarget,
};
use boosty_core::{Comment, Post, Snowflake, Viewer};

use crate::dto::{CommentRequest, CommentResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post the caller can read
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let user_id = user_id.ok_or(ServiceError::Unauthenticated)?;
        let viewer = AccessService::new(self.ctx).viewer(Some(user_id)).await?;

        let post = self.find_post(post_id).await?;
        if !post.is_published() && !post.is_authored_by(user_id) {
            return Err(ServiceError::not_found("Post", post_id.to_string()));
        }
        can_comment(viewer.as_ref(), &post)?;

        let comment = Comment::new(self.ctx.generate_id(), post.id, user_id, request.content);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post.id, author_id = %user_id, "Comment created");
        Ok(CommentResponse::from(&comment))
    }

    /// Fetch a single comment
    #[instrument(skip(self))]
    pub async fn get_comment(
        &self,
        user_id: Option<Snowflake>,
        comment_id: Snowflake,
    ) -> ServiceResult<CommentResponse> {
        let viewer = AccessService::new(self.ctx).viewer(user_id).await?;
        let comment = self.find_visible(viewer.as_ref(), comment_id).await?;
        Ok(CommentResponse::from(&comment))
    }

    /// Comments of one post the caller may see, oldest first
    #[instrument(skip(self))]
    pub async fn list_post_comments(
        &self,
        user_id: Option<Snowflake>,
        post_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let viewer = AccessService::new(self.ctx).viewer(user_id).await?;
        let post = self.find_post(post_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        // A post the caller cannot read is reported as missing, unless they commented on it
        let has_commented = viewer
            .as_ref()
            .is_some_and(|v| comments.iter().any(|c| v.is(c.author_id)));
        if !can_retrieve(viewer.as_ref(), &post) && !has_commented {
            return Err(ServiceError::not_found("Post", post_id.to_string()));
        }

        let posts = HashMap::from([(post.id, post)]);
        Ok(filter_listable_comments(viewer.as_ref(), comments, &posts)
            .iter()
            .map(CommentResponse::from)
            .collect())
    }

    /// Every comment the caller may see, oldest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, user_id: Option<Snowflake>) -> ServiceResult<Vec<CommentResponse>> {
        let viewer = AccessService::new(self.ctx).viewer(user_id).await?;
        let comments = self.ctx.comment_repo().find_all().await?;

        let post_ids: Vec<Snowflake> = comments
            .iter()
            .map(|c| c.post_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let posts: HashMap<Snowflake, Post> = self
            .ctx
            .post_repo()
            .find_by_ids(&post_ids)
            .await?
            .into_iter()
            .map(|post| (post.id, post))
            .collect();

        Ok(filter_listable_comments(viewer.as_ref(), comments, &posts)
            .iter()
            .map(CommentResponse::from)
            .collect())
    }

    /// Edit a comment; only its author may
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        user_id: Option<Snowflake>,
        comment_id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let access = AccessService::new(self.ctx);
        let (actor, _) = access.require_actor(user_id).await?;
        let viewer = access.viewer(Some(actor.user_id)).await?;

        let mut comment = self.find_visible(viewer.as_ref(), comment_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Comment(&comment), MutationAction::Update)?;

        comment.edit(request.content);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment.id, "Comment edited");
        Ok(CommentResponse::from(&comment))
    }

    /// Delete a comment; only its author may
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        user_id: Option<Snowflake>,
        comment_id: Snowflake,
    ) -> ServiceResult<()> {
        let access = AccessService::new(self.ctx);
        let (actor, _) = access.require_actor(user_id).await?;
        let viewer = access.viewer(Some(actor.user_id)).await?;

        let comment = self.find_visible(viewer.as_ref(), comment_id).await?;
        authorize_mutation(Some(&actor), MutationTarget::Comment(&comment), MutationAction::Delete)?;

        self.ctx.comment_repo().delete(comment.id).await?;
        info!(comment_id = %comment.id, "Comment deleted");
        Ok(())
    }

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))
    }

    /// Load a comment, reporting ones the viewer cannot see as missing
    ///
    /// Same rule as the listing, so comments on drafts stay hidden.
    async fn find_visible(&self, viewer: Option<&Viewer>, comment_id: Snowflake) -> ServiceResult<Comment> {
        let not_found = || ServiceError::not_found("Comment", comment_id.to_string());

        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(not_found)?;
        let post = self
            .ctx
            .post_repo()
            .find_by_id(comment.post_id)
            .await?
            .ok_or_else(not_found)?;

        if is_listable_comment(viewer, &comment, &post) {
            Ok(comment)
        } else {
            Err(not_found())
        }
    }
}
