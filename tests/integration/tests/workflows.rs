//! Profile, follow, category and dashboard workflows

use boosty_core::{ErrorKind, Snowflake};
use boosty_service::dto::{
    CreateCategoryRequest, CreatePostRequest, ListPostsQuery, UpdatePostRequest,
    UpdateProfileRequest,
};
use boosty_service::{
    CategoryService, CommentService, DashboardService, FollowService, PostService,
    ProfileService, SubscriptionService, TierService,
};
use integration_tests::{
    comment, draft_post, free_post, paid_post, parse_id, tier_request, unique_suffix, TestApp,
};

fn category_request(name: &str) -> CreateCategoryRequest {
    CreateCategoryRequest {
        name: name.to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn test_profile_created_on_first_use() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let user = app.create_user().await?;
    let profiles = ProfileService::new(&app.ctx);

    let first = profiles.get_user_profile(user.user_id).await?;
    let second = profiles.get_user_profile(user.user_id).await?;
    assert_eq!(first.id, second.id);
    assert_eq!(first.id, user.profile_id.to_string());
    assert!(!first.is_creator);

    let missing = profiles
        .ensure_profile_exists(Snowflake::new(42))
        .await
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn test_profile_edits_are_owner_only_and_validated() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let owner = app.create_user().await?;
    let other = app.create_user().await?;
    let profiles = ProfileService::new(&app.ctx);

    let updated = profiles
        .update_profile(
            owner.principal(),
            owner.profile_id,
            UpdateProfileRequest {
                bio: Some("Illustrator and comic artist".to_string()),
                avatar: Some("avatars/me.png".to_string()),
                is_creator: Some(true),
            },
        )
        .await?;
    assert!(updated.is_creator);
    assert_eq!(updated.avatar.as_deref(), Some("avatars/me.png"));

    let short_bio = profiles
        .update_profile(
            owner.principal(),
            owner.profile_id,
            UpdateProfileRequest {
                bio: Some("hi".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(short_bio.kind(), ErrorKind::ValidationFailed);

    let foreign = profiles
        .update_profile(other.principal(), owner.profile_id, UpdateProfileRequest::default())
        .await
        .unwrap_err();
    assert_eq!(foreign.kind(), ErrorKind::Forbidden);
    Ok(())
}

#[tokio::test]
async fn test_follow_lifecycle_and_feed() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let fan = app.create_user().await?;
    let follows = FollowService::new(&app.ctx);
    let posts = PostService::new(&app.ctx);

    let tier = TierService::new(&app.ctx)
        .create_tier(creator.principal(), tier_request("4.00"))
        .await?;
    let free = posts.create_post(creator.principal(), free_post()).await?;
    posts
        .create_post(creator.principal(), paid_post(vec![parse_id(&tier.id)?]))
        .await?;
    posts.create_post(creator.principal(), draft_post()).await?;

    assert!(posts.feed(fan.principal()).await?.is_empty());

    follows.follow(fan.principal(), creator.profile_id).await?;
    assert!(follows.is_following(fan.principal(), creator.profile_id).await?);
    assert!(!follows.is_following(None, creator.profile_id).await?);

    let duplicate = follows.follow(fan.principal(), creator.profile_id).await.unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    let own = follows
        .follow(creator.principal(), creator.profile_id)
        .await
        .unwrap_err();
    assert_eq!(own.kind(), ErrorKind::ValidationFailed);

    // Following alone only shows what the fan can already read
    let feed = posts.feed(fan.principal()).await?;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, free.id);

    SubscriptionService::new(&app.ctx)
        .subscribe(fan.principal(), parse_id(&tier.id)?)
        .await?;
    assert_eq!(posts.feed(fan.principal()).await?.len(), 2);

    let profile = ProfileService::new(&app.ctx).get_profile(creator.profile_id).await?;
    assert_eq!(profile.follower_count, 1);
    assert_eq!(follows.following(fan.principal()).await?.len(), 1);
    assert_eq!(follows.followers(creator.profile_id).await?.len(), 1);

    follows.unfollow(fan.principal(), creator.profile_id).await?;
    assert!(posts.feed(fan.principal()).await?.is_empty());
    let again = follows.unfollow(fan.principal(), creator.profile_id).await.unwrap_err();
    assert_eq!(again.kind(), ErrorKind::NotFound);

    let anonymous = posts.feed(None).await.unwrap_err();
    assert_eq!(anonymous.kind(), ErrorKind::Unauthenticated);
    Ok(())
}

#[tokio::test]
async fn test_categories_filter_posts_and_creators() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let idle = app.create_creator().await?;
    let categories = CategoryService::new(&app.ctx);
    let posts = PostService::new(&app.ctx);

    let name = format!("Music {}", unique_suffix());
    let music = categories.create_category(category_request(&name)).await?;
    let music_id = parse_id(&music.id)?;

    let duplicate = categories.create_category(category_request(&name)).await.unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    let post = posts
        .create_post(
            creator.principal(),
            CreatePostRequest {
                category_id: Some(music_id),
                ..free_post()
            },
        )
        .await?;
    posts.create_post(idle.principal(), free_post()).await?;

    let in_music = posts
        .list_posts(
            None,
            ListPostsQuery {
                category_id: Some(music_id),
                author_id: None,
            },
        )
        .await?;
    assert_eq!(in_music.len(), 1);
    assert_eq!(in_music[0].id, post.id);

    let creators = ProfileService::new(&app.ctx).list_creators(Some(music_id)).await?;
    assert_eq!(creators.len(), 1);
    assert_eq!(creators[0].id, creator.profile_id.to_string());
    assert_eq!(ProfileService::new(&app.ctx).list_creators(None).await?.len(), 2);

    let unknown = posts
        .create_post(
            creator.principal(),
            CreatePostRequest {
                category_id: Some(Snowflake::new(7)),
                ..free_post()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(unknown.kind(), ErrorKind::NotFound);

    categories.delete_category(music_id).await?;
    let detached = posts.get_post(None, parse_id(&post.id)?).await?;
    assert_eq!(detached.category_id, None);
    assert!(categories.list_categories().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_post_update_retiers_content() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let reader = app.create_user().await?;
    let posts = PostService::new(&app.ctx);

    let tier = TierService::new(&app.ctx)
        .create_tier(creator.principal(), tier_request("2.50"))
        .await?;
    let post = posts.create_post(creator.principal(), free_post()).await?;
    let post_id = parse_id(&post.id)?;

    let updated = posts
        .update_post(
            creator.principal(),
            post_id,
            UpdatePostRequest {
                title: Some("Members only".to_string()),
                is_free: Some(false),
                tier_ids: Some(vec![parse_id(&tier.id)?]),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "Members only");
    assert_eq!(updated.tier_ids, vec![tier.id.clone()]);

    assert!(posts.view_post(reader.principal(), post_id).await?.is_locked);
    Ok(())
}

#[tokio::test]
async fn test_creator_dashboard() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let fan = app.create_user().await?;
    let posts = PostService::new(&app.ctx);

    let tier = TierService::new(&app.ctx)
        .create_tier(creator.principal(), tier_request("5.00"))
        .await?;
    let tier_id = parse_id(&tier.id)?;

    let open = posts.create_post(creator.principal(), free_post()).await?;
    posts.create_post(creator.principal(), paid_post(vec![tier_id])).await?;
    posts.create_post(creator.principal(), draft_post()).await?;
    let old = posts.create_post(creator.principal(), free_post()).await?;
    posts.archive_post(creator.principal(), parse_id(&old.id)?).await?;

    FollowService::new(&app.ctx)
        .follow(fan.principal(), creator.profile_id)
        .await?;
    SubscriptionService::new(&app.ctx)
        .subscribe(fan.principal(), tier_id)
        .await?;
    CommentService::new(&app.ctx)
        .create_comment(fan.principal(), parse_id(&open.id)?, comment("Love it"))
        .await?;

    let dashboard = DashboardService::new(&app.ctx).dashboard(creator.principal()).await?;
    assert_eq!(dashboard.posts.total, 4);
    assert_eq!(dashboard.posts.published, 2);
    assert_eq!(dashboard.posts.drafts, 1);
    assert_eq!(dashboard.posts.archived, 1);
    assert_eq!(dashboard.paid_subscriber_count, 1);
    assert_eq!(dashboard.tiers.len(), 1);
    assert_eq!(dashboard.tiers[0].subscriber_count, Some(1));
    assert_eq!(dashboard.recent_posts.len(), 4);
    assert_eq!(dashboard.recent_comments.len(), 1);
    assert_eq!(dashboard.recent_followers.len(), 1);
    assert_eq!(dashboard.profile.follower_count, 1);

    let json = serde_json::to_value(&dashboard)?;
    assert_eq!(json["tiers"][0]["price"], "5.00");

    let not_creator = DashboardService::new(&app.ctx)
        .dashboard(fan.principal())
        .await
        .unwrap_err();
    assert_eq!(not_creator.kind(), ErrorKind::Forbidden);
    assert_eq!(not_creator.status_code(), 403);
    Ok(())
}
