//! Listing and retrieval filters built on the resolver

use std::collections::HashMap;

use crate::entities::{Comment, Post};
use crate::value_objects::Snowflake;

use super::resolver::can_access;
use super::viewer::Viewer;

/// Published posts the viewer can access, newest first
///
/// Ties on `created_at` are broken by ascending id so pagination is stable.
pub fn filter_listable<I>(viewer: Option<&Viewer>, posts: I) -> Vec<Post>
where
    I: IntoIterator<Item = Post>,
{
    let mut listable: Vec<Post> = posts
        .into_iter()
        .filter(|post| post.is_published() && can_access(viewer, post))
        .collect();
    listable.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    listable
}

/// Whether a single post may be fetched by the viewer
///
/// Drafts and archived posts exist only for their author. Callers report a
/// `false` here exactly like a missing post.
pub fn can_retrieve(viewer: Option<&Viewer>, post: &Post) -> bool {
    if !post.is_published() {
        return viewer.is_some_and(|v| v.is(post.author_id));
    }
    can_access(viewer, post)
}

/// Whether a comment belongs in the viewer's comment listing
pub fn is_listable_comment(viewer: Option<&Viewer>, comment: &Comment, post: &Post) -> bool {
    if let Some(v) = viewer {
        if v.is(post.author_id) || v.is(comment.author_id) {
            return true;
        }
    }
    post.is_published() && can_access(viewer, post)
}

/// Comments the viewer may list, oldest first
///
/// `posts` must hold the parent of every comment; comments whose post is
/// missing are dropped.
pub fn filter_listable_comments<I>(
    viewer: Option<&Viewer>,
    comments: I,
    posts: &HashMap<Snowflake, Post>,
) -> Vec<Comment>
where
    I: IntoIterator<Item = Comment>,
{
    let mut listable: Vec<Comment> = comments
        .into_iter()
        .filter(|comment| {
            posts
                .get(&comment.post_id)
                .is_some_and(|post| is_listable_comment(viewer, comment, post))
        })
        .collect();
    listable.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    listable
}
