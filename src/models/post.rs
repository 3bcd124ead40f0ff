use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub price: Option<i64>,
    pub img_url: String,
    pub author_id: i64,
}

/// A post with its author's name and category labels, for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub author_name: String,
    pub categories: Vec<String>,
}

/// Label attached to one post. Removed together with its post.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostCategory {
    pub id: i64,
    pub category: String,
    pub post_id: i64,
}

/// A distinct post category label and how many posts carry it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub posts: i64,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub price: Option<i64>,
    pub img_url: String,
    pub author_id: i64,
    pub categories: Vec<String>,
}
