//! End-to-end access scenarios
//!
//! Creators, tiers, posts and subscriptions driven through the service
//! layer, checking who gets to read what.

use chrono::{Duration, Utc};

use boosty_core::access::preview;
use boosty_core::{AccessReason, ErrorKind, Snowflake, SubscriptionState, Tier};
use boosty_service::dto::{
    CreatePostRequest, CreateTierRequest, ListPostsQuery, MyPostsQuery, UpdateTierRequest,
};
use boosty_service::{CommentService, PostService, SubscriptionService, TierService};
use integration_tests::{
    comment, draft_post, free_post, long_content, paid_post, parse_id, tier_request, TestApp,
    TestUser,
};

struct PaidSetup {
    creator: TestUser,
    fan: TestUser,
    tier_id: Snowflake,
    post_id: Snowflake,
}

async fn paid_setup(app: &TestApp) -> anyhow::Result<PaidSetup> {
    let creator = app.create_creator().await?;
    let fan = app.create_user().await?;

    let tier = TierService::new(&app.ctx)
        .create_tier(creator.principal(), tier_request("5.00"))
        .await?;
    let tier_id = parse_id(&tier.id)?;

    let post = PostService::new(&app.ctx)
        .create_post(creator.principal(), paid_post(vec![tier_id]))
        .await?;

    Ok(PaidSetup {
        creator,
        fan,
        tier_id,
        post_id: parse_id(&post.id)?,
    })
}

#[tokio::test]
async fn test_subscribing_unlocks_paid_post() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let posts = PostService::new(&app.ctx);

    let locked = posts.view_post(s.fan.principal(), s.post_id).await?;
    assert!(locked.is_locked);
    assert_eq!(locked.access_reason, AccessReason::NotSubscribed);
    assert_eq!(locked.content, preview(&long_content()));
    assert!(locked.content.ends_with("..."));
    assert_eq!(locked.content.chars().count(), 153);

    let hidden = posts.get_post(s.fan.principal(), s.post_id).await.unwrap_err();
    assert_eq!(hidden.kind(), ErrorKind::NotFound);

    let subscription = SubscriptionService::new(&app.ctx)
        .subscribe(s.fan.principal(), s.tier_id)
        .await?;
    assert_eq!(subscription.state, SubscriptionState::Active);
    assert!(subscription.transaction_id.is_some());

    let unlocked = posts.view_post(s.fan.principal(), s.post_id).await?;
    assert!(!unlocked.is_locked);
    assert_eq!(unlocked.access_reason, AccessReason::Subscribed);
    assert_eq!(unlocked.content, long_content());

    let listed = posts.list_posts(s.fan.principal(), ListPostsQuery::default()).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, s.post_id.to_string());
    Ok(())
}

#[tokio::test]
async fn test_cancelled_subscription_keeps_access_until_deactivated() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let posts = PostService::new(&app.ctx);
    let subscriptions = SubscriptionService::new(&app.ctx);

    let sub = subscriptions.subscribe(s.fan.principal(), s.tier_id).await?;
    let sub_id = parse_id(&sub.id)?;

    let cancelled = subscriptions.cancel(s.fan.principal(), sub_id).await?;
    assert_eq!(cancelled.state, SubscriptionState::ActiveCancelled);
    assert!(cancelled.cancelled_at.is_some());
    assert!(!posts.view_post(s.fan.principal(), s.post_id).await?.is_locked);

    let again = subscriptions.cancel(s.fan.principal(), sub_id).await.unwrap_err();
    assert_eq!(again.kind(), ErrorKind::Conflict);

    let deactivated = subscriptions.deactivate(sub_id).await?;
    assert_eq!(deactivated.state, SubscriptionState::Deactivated);
    assert!(posts.view_post(s.fan.principal(), s.post_id).await?.is_locked);
    Ok(())
}

#[tokio::test]
async fn test_cancelled_subscription_lapses_at_end_date() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let posts = PostService::new(&app.ctx);
    let subscriptions = SubscriptionService::new(&app.ctx);

    let sub = subscriptions.subscribe(s.fan.principal(), s.tier_id).await?;
    let sub_id = parse_id(&sub.id)?;
    subscriptions.cancel(s.fan.principal(), sub_id).await?;

    assert!(app.store.set_subscription_end(sub_id, Utc::now() - Duration::hours(1)));

    let view = posts.view_post(s.fan.principal(), s.post_id).await?;
    assert!(view.is_locked);
    let stored = app.store.subscription(sub_id).unwrap();
    assert!(stored.is_active);

    let mine = subscriptions.get_subscription(s.fan.principal(), sub_id).await?;
    assert_eq!(mine.state, SubscriptionState::Expired);
    assert!(mine.is_expired);
    assert_eq!(mine.days_remaining, 0);

    // A lapsed subscription does not block a new one
    let renewed = subscriptions.subscribe(s.fan.principal(), s.tier_id).await?;
    assert_eq!(renewed.state, SubscriptionState::Active);
    assert!(!posts.view_post(s.fan.principal(), s.post_id).await?.is_locked);
    Ok(())
}

#[tokio::test]
async fn test_untiered_post_is_open_to_everyone() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let posts = PostService::new(&app.ctx);

    let post = posts
        .create_post(
            creator.principal(),
            CreatePostRequest {
                is_free: false,
                ..free_post()
            },
        )
        .await?;
    let post_id = parse_id(&post.id)?;

    let anonymous = posts.get_post(None, post_id).await?;
    assert!(!anonymous.is_locked);
    assert_eq!(anonymous.access_reason, AccessReason::Untiered);
    assert_eq!(anonymous.content, "Hello everyone");
    Ok(())
}

#[tokio::test]
async fn test_author_and_anonymous_views_of_paid_post() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let posts = PostService::new(&app.ctx);

    let own = posts.get_post(s.creator.principal(), s.post_id).await?;
    assert_eq!(own.access_reason, AccessReason::Author);
    assert_eq!(own.content, long_content());

    let anonymous = posts.view_post(None, s.post_id).await?;
    assert!(anonymous.is_locked);
    assert_eq!(anonymous.access_reason, AccessReason::Anonymous);

    let listed = posts.list_posts(None, ListPostsQuery::default()).await?;
    assert!(listed.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_tier_cap_frees_a_slot_after_delete() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let tiers = TierService::new(&app.ctx);

    let mut created = Vec::new();
    for _ in 0..Tier::MAX_PER_CREATOR {
        created.push(tiers.create_tier(creator.principal(), tier_request("3.00")).await?);
    }

    let over = tiers
        .create_tier(creator.principal(), tier_request("3.00"))
        .await
        .unwrap_err();
    assert_eq!(over.kind(), ErrorKind::ValidationFailed);
    assert_eq!(over.status_code(), 400);

    tiers.delete_tier(creator.principal(), parse_id(&created[0].id)?).await?;
    tiers.create_tier(creator.principal(), tier_request("3.00")).await?;

    let listed = tiers.list_tiers(creator.principal(), creator.profile_id).await?;
    assert_eq!(listed.len(), Tier::MAX_PER_CREATOR);
    Ok(())
}

#[tokio::test]
async fn test_inactive_tiers_count_toward_cap_but_are_hidden() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let fan = app.create_user().await?;
    let tiers = TierService::new(&app.ctx);

    let tier = tiers.create_tier(creator.principal(), tier_request("9.99")).await?;
    let tier_id = parse_id(&tier.id)?;
    tiers
        .update_tier(
            creator.principal(),
            tier_id,
            UpdateTierRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    assert!(tiers.list_tiers(fan.principal(), creator.profile_id).await?.is_empty());
    let own = tiers.list_tiers(creator.principal(), creator.profile_id).await?;
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].subscriber_count, Some(0));

    let err = SubscriptionService::new(&app.ctx)
        .subscribe(fan.principal(), tier_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    Ok(())
}

#[tokio::test]
async fn test_tier_rules_for_non_owners() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let tiers = TierService::new(&app.ctx);

    let not_creator = tiers
        .create_tier(s.fan.principal(), tier_request("1.00"))
        .await
        .unwrap_err();
    assert_eq!(not_creator.kind(), ErrorKind::Forbidden);

    let foreign_edit = tiers
        .update_tier(s.fan.principal(), s.tier_id, UpdateTierRequest::default())
        .await
        .unwrap_err();
    assert_eq!(foreign_edit.kind(), ErrorKind::Forbidden);

    let bad_price = tiers
        .create_tier(s.creator.principal(), tier_request("-1"))
        .await
        .unwrap_err();
    assert_eq!(bad_price.kind(), ErrorKind::ValidationFailed);

    // Tiers of another creator cannot gate a post
    let other = app.create_creator().await?;
    let err = PostService::new(&app.ctx)
        .create_post(other.principal(), paid_post(vec![s.tier_id]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    Ok(())
}

#[tokio::test]
async fn test_subscription_conflicts() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let subscriptions = SubscriptionService::new(&app.ctx);

    let own = subscriptions
        .subscribe(s.creator.principal(), s.tier_id)
        .await
        .unwrap_err();
    assert_eq!(own.kind(), ErrorKind::ValidationFailed);

    let anonymous = subscriptions.subscribe(None, s.tier_id).await.unwrap_err();
    assert_eq!(anonymous.kind(), ErrorKind::Unauthenticated);

    let sub = subscriptions.subscribe(s.fan.principal(), s.tier_id).await?;
    let duplicate = subscriptions
        .subscribe(s.fan.principal(), s.tier_id)
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    // Someone else's subscription stays hidden and cannot be cancelled
    let stranger = app.create_user().await?;
    let sub_id = parse_id(&sub.id)?;
    let peek = subscriptions
        .get_subscription(stranger.principal(), sub_id)
        .await
        .unwrap_err();
    assert_eq!(peek.kind(), ErrorKind::NotFound);
    let cancel = subscriptions.cancel(stranger.principal(), sub_id).await.unwrap_err();
    assert_eq!(cancel.kind(), ErrorKind::Forbidden);

    let listed = subscriptions.tier_subscribers(s.creator.principal(), s.tier_id).await?;
    assert_eq!(listed.len(), 1);
    let denied = subscriptions
        .tier_subscribers(s.fan.principal(), s.tier_id)
        .await
        .unwrap_err();
    assert_eq!(denied.kind(), ErrorKind::Forbidden);

    assert_eq!(TierService::new(&app.ctx).subscriber_count(s.tier_id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_deleting_tier_drops_subscriptions_and_untiers_posts() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;

    SubscriptionService::new(&app.ctx)
        .subscribe(s.fan.principal(), s.tier_id)
        .await?;
    TierService::new(&app.ctx)
        .delete_tier(s.creator.principal(), s.tier_id)
        .await?;

    let mine = SubscriptionService::new(&app.ctx)
        .my_subscriptions(s.fan.principal())
        .await?;
    assert!(mine.is_empty());
    assert!(app.store.post(s.post_id).unwrap().tier_ids.is_empty());

    let view = PostService::new(&app.ctx).view_post(None, s.post_id).await?;
    assert_eq!(view.access_reason, AccessReason::Untiered);
    Ok(())
}

#[tokio::test]
async fn test_drafts_are_listed_nowhere_but_retrievable_by_author() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let reader = app.create_user().await?;
    let posts = PostService::new(&app.ctx);

    let draft = posts.create_post(creator.principal(), draft_post()).await?;
    let draft_id = parse_id(&draft.id)?;

    let listed = posts.list_posts(creator.principal(), ListPostsQuery::default()).await?;
    assert!(listed.is_empty());

    let own = posts.get_post(creator.principal(), draft_id).await?;
    assert_eq!(own.id, draft.id);

    let mine = posts.my_posts(creator.principal(), MyPostsQuery::default()).await?;
    assert_eq!(mine.len(), 1);

    for err in [
        posts.get_post(reader.principal(), draft_id).await.unwrap_err(),
        posts.view_post(reader.principal(), draft_id).await.unwrap_err(),
        posts.delete_post(reader.principal(), draft_id).await.unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    posts.publish_post(creator.principal(), draft_id).await?;
    let listed = posts.list_posts(reader.principal(), ListPostsQuery::default()).await?;
    assert_eq!(listed.len(), 1);

    let republish = posts.publish_post(creator.principal(), draft_id).await.unwrap_err();
    assert_eq!(republish.kind(), ErrorKind::Forbidden);

    posts.archive_post(creator.principal(), draft_id).await?;
    assert!(posts.list_posts(None, ListPostsQuery::default()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_only_author_may_mutate_visible_post() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let reader = app.create_user().await?;
    let posts = PostService::new(&app.ctx);

    let post = posts.create_post(creator.principal(), free_post()).await?;
    let post_id = parse_id(&post.id)?;

    let err = posts.delete_post(reader.principal(), post_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let err = posts.delete_post(None, post_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);

    CommentService::new(&app.ctx)
        .create_comment(reader.principal(), post_id, comment("First!"))
        .await?;
    posts.delete_post(creator.principal(), post_id).await?;

    let comments = CommentService::new(&app.ctx).list_comments(None).await?;
    assert!(comments.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_comment_visibility_follows_post_access() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let s = paid_setup(&app).await?;
    let comments = CommentService::new(&app.ctx);
    let subscriptions = SubscriptionService::new(&app.ctx);

    let sub = subscriptions.subscribe(s.fan.principal(), s.tier_id).await?;
    let note = comments
        .create_comment(s.fan.principal(), s.post_id, comment("Great write-up"))
        .await?;
    subscriptions.deactivate(parse_id(&sub.id)?).await?;

    let stranger = app.create_user().await?;
    let locked = comments
        .list_post_comments(stranger.principal(), s.post_id)
        .await
        .unwrap_err();
    assert_eq!(locked.kind(), ErrorKind::NotFound);
    assert!(comments.list_comments(stranger.principal()).await?.is_empty());
    let anonymous = comments.list_post_comments(None, s.post_id).await.unwrap_err();
    assert_eq!(anonymous.kind(), ErrorKind::NotFound);

    let own = comments.list_post_comments(s.fan.principal(), s.post_id).await?;
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, note.id);

    let creator_view = comments.list_post_comments(s.creator.principal(), s.post_id).await?;
    assert_eq!(creator_view.len(), 1);

    let note_id = parse_id(&note.id)?;
    let hidden = comments.get_comment(stranger.principal(), note_id).await.unwrap_err();
    assert_eq!(hidden.kind(), ErrorKind::NotFound);

    // Lost access means no new comments, but the author keeps their own
    let blocked = comments
        .create_comment(s.fan.principal(), s.post_id, comment("Still here"))
        .await
        .unwrap_err();
    assert_eq!(blocked.kind(), ErrorKind::Forbidden);

    let edited = comments
        .update_comment(s.fan.principal(), note_id, comment("Great write-up, thanks"))
        .await?;
    assert!(edited.edited);
    Ok(())
}

#[tokio::test]
async fn test_comments_on_drafts_stay_with_author() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let reader = app.create_user().await?;
    let posts = PostService::new(&app.ctx);
    let comments = CommentService::new(&app.ctx);

    let draft = posts.create_post(creator.principal(), draft_post()).await?;
    let draft_id = parse_id(&draft.id)?;

    let note = comments
        .create_comment(creator.principal(), draft_id, comment("Needs a better title"))
        .await?;

    let err = comments
        .create_comment(reader.principal(), draft_id, comment("Sneak peek"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(comments.list_comments(reader.principal()).await?.is_empty());
    assert_eq!(comments.list_comments(creator.principal()).await?.len(), 1);

    let err = comments
        .delete_comment(reader.principal(), parse_id(&note.id)?)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn test_comment_listing_hides_unreadable_posts() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let stranger = app.create_user().await?;
    let posts = PostService::new(&app.ctx);
    let comments = CommentService::new(&app.ctx);

    let draft = posts.create_post(creator.principal(), draft_post()).await?;
    let draft_id = parse_id(&draft.id)?;
    comments
        .create_comment(creator.principal(), draft_id, comment("Note to self"))
        .await?;

    let draft_err = comments
        .list_post_comments(stranger.principal(), draft_id)
        .await
        .unwrap_err();
    let missing_err = comments
        .list_post_comments(stranger.principal(), Snowflake::new(9))
        .await
        .unwrap_err();
    assert_eq!(draft_err.kind(), ErrorKind::NotFound);
    assert_eq!(missing_err.kind(), draft_err.kind());

    let archived = posts.create_post(creator.principal(), free_post()).await?;
    let archived_id = parse_id(&archived.id)?;
    posts.archive_post(creator.principal(), archived_id).await?;
    let err = comments.list_post_comments(None, archived_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(comments.list_post_comments(creator.principal(), draft_id).await?.len(), 1);
    assert!(comments
        .list_post_comments(creator.principal(), archived_id)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_negative_tier_order_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let creator = app.create_creator().await?;
    let tiers = TierService::new(&app.ctx);

    let err = tiers
        .create_tier(
            creator.principal(),
            CreateTierRequest {
                order: -7,
                ..tier_request("5.00")
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    let tier = tiers.create_tier(creator.principal(), tier_request("5.00")).await?;
    let err = tiers
        .update_tier(
            creator.principal(),
            parse_id(&tier.id)?,
            UpdateTierRequest {
                order: Some(-1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(tiers.get_tier(parse_id(&tier.id)?).await?.order, 0);
    Ok(())
}
