//! Community forum posts.
//!
//! A small social layer: users post questions or notes tagged with a
//! subject, like each other's posts and leave comments. Flat records,
//! linear scans, same leniency policy as the ledger (unknown ids are
//! `None`, never errors).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::{keys, Store};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub username: String,
    pub title: String,
    pub content: String,
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Filter for listing posts. Empty filter means "all posts".
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub subject: Option<String>,
    pub username: Option<String>,
}

/// Forum storage over a [`Store`].
pub struct Community<'a> {
    store: &'a Store,
}

impl<'a> Community<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a post. Subject defaults to "General".
    pub fn create_post(
        &self,
        username: &str,
        title: &str,
        content: &str,
        subject: Option<&str>,
        tags: Vec<String>,
    ) -> Result<ForumPost, StoreError> {
        let post = ForumPost {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            subject: subject.unwrap_or("General").to_string(),
            tags,
            created_at: Utc::now(),
            likes: 0,
            comments: Vec::new(),
        };
        let mut posts: Vec<ForumPost> = self.store.read_collection(keys::FORUM_POSTS)?;
        posts.push(post.clone());
        self.store.write_collection(keys::FORUM_POSTS, &posts)?;
        Ok(post)
    }

    /// List posts matching the filter, newest first.
    pub fn posts(&self, filter: &PostFilter) -> Result<Vec<ForumPost>, StoreError> {
        let posts: Vec<ForumPost> = self.store.read_collection(keys::FORUM_POSTS)?;
        let mut matching: Vec<ForumPost> = posts
            .into_iter()
            .filter(|p| {
                filter
                    .subject
                    .as_ref()
                    .map(|s| &p.subject == s)
                    .unwrap_or(true)
                    && filter
                        .username
                        .as_ref()
                        .map(|u| &p.username == u)
                        .unwrap_or(true)
            })
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    /// Increment a post's like counter.
    pub fn like_post(&self, id: &str) -> Result<Option<ForumPost>, StoreError> {
        self.update_post(id, |post| post.likes += 1)
    }

    /// Append a comment to a post.
    pub fn add_comment(
        &self,
        id: &str,
        username: &str,
        content: &str,
    ) -> Result<Option<ForumPost>, StoreError> {
        self.update_post(id, |post| {
            post.comments.push(Comment {
                username: username.to_string(),
                content: content.to_string(),
                created_at: Utc::now(),
            })
        })
    }

    fn update_post(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut ForumPost),
    ) -> Result<Option<ForumPost>, StoreError> {
        let mut posts: Vec<ForumPost> = self.store.read_collection(keys::FORUM_POSTS)?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        mutate(post);
        let updated = post.clone();
        self.store.write_collection(keys::FORUM_POSTS, &posts)?;
        Ok(Some(updated))
    }
}
