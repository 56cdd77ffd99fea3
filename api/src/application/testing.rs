//! In-memory port implementations for unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::application::ports::department_repository::DepartmentRepository;
use crate::application::ports::feed_repository::{FeedRepository, NewFeed};
use crate::application::ports::files_repository::{FileMeta, FilesRepository};
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::application::services::crc32::checksum;
use crate::domain::departments::DepartmentRow;
use crate::domain::feeds::feed::Feed;
use crate::domain::feeds::post::{NewPost, Post};
use crate::domain::users::Role;

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(
        &self,
        email: &str,
        user_name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<Option<UserRow>> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.email == email || r.user_name == user_name)
        {
            return Ok(None);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            user_name: user_name.to_string(),
            password_hash: Some(password_hash.to_string()),
            role,
        };
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| UserRow {
                password_hash: None,
                ..r.clone()
            }))
    }

    async fn user_name_exists(&self, user_name: &str) -> anyhow::Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.user_name == user_name))
    }
}

#[derive(Default)]
pub struct InMemoryFeeds {
    rows: Mutex<Vec<Feed>>,
}

#[async_trait]
impl FeedRepository for InMemoryFeeds {
    async fn create_feed(&self, feed: &NewFeed) -> anyhow::Result<Option<Feed>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|f| f.rss_url == feed.rss_url) {
            return Ok(None);
        }
        let created = Feed {
            id: Uuid::new_v4(),
            blog: feed.blog.clone(),
            name: feed.name.clone(),
            email: feed.email.clone(),
            rss_url: feed.rss_url.clone(),
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(Some(created))
    }

    async fn list_feeds(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Feed>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_feeds(&self) -> anyhow::Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn feed_exists(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|f| f.id == id))
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    rows: Mutex<Vec<Post>>,
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn list_posts(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Post>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_posts(&self) -> anyhow::Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert_if_absent(&self, post: &NewPost) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|p| p.checksum == post.checksum && p.link == post.link)
        {
            return Ok(false);
        }
        rows.push(Post {
            id: Uuid::new_v4(),
            feed_id: post.feed_id,
            blog: "blog".into(),
            title: post.title.clone(),
            link: post.link.clone(),
            summary: post.summary.clone(),
            thumbnail: post.thumbnail.clone(),
            checksum: post.checksum.clone(),
            published_at: post.published_at,
        });
        Ok(true)
    }
}

pub fn sample_post(link: &str, day: u32) -> NewPost {
    NewPost {
        feed_id: Uuid::nil(),
        title: format!("Post {day}"),
        link: link.to_string(),
        summary: None,
        thumbnail: None,
        checksum: checksum(link),
        published_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
    }
}

#[derive(Default)]
pub struct InMemoryDepartments {
    pub rows: Vec<DepartmentRow>,
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartments {
    async fn list_departments(&self) -> anyhow::Result<Vec<DepartmentRow>> {
        Ok(self.rows.clone())
    }
}

#[derive(Default)]
pub struct InMemoryFiles {
    rows: Mutex<Vec<(Uuid, FileMeta)>>,
}

#[async_trait]
impl FilesRepository for InMemoryFiles {
    async fn insert_file(
        &self,
        owner_id: Uuid,
        _folder: &str,
        _filename: &str,
        content_type: Option<&str>,
        _size: i64,
        storage_path: &str,
    ) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push((
            id,
            FileMeta {
                storage_path: storage_path.to_string(),
                content_type: content_type.map(str::to_string),
                owner_id,
            },
        ));
        Ok(id)
    }

    async fn get_file_meta(&self, file_id: Uuid) -> anyhow::Result<Option<FileMeta>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == file_id)
            .map(|(_, m)| m.clone()))
    }
}
