use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::{api::BlogPost, utils::filters::slugify};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    /// Left blank to derive from the title.
    pub slug: String,
    pub excerpt: String,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub publish: bool,
}

impl PostForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn effective_slug(&self) -> String {
        match self.slug.trim() {
            "" => slugify(&self.title),
            custom => slugify(custom),
        }
    }

    pub fn to_post(&self, today: NaiveDate) -> Result<BlogPost, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".into());
        }
        if self.body.trim().is_empty() {
            return Err("Body is required".into());
        }
        let slug = self.effective_slug();
        if slug.is_empty() {
            return Err("Title must contain letters or digits".into());
        }
        let excerpt = Some(self.excerpt.trim().to_string()).filter(|e| !e.is_empty());
        Ok(BlogPost {
            id: String::new(),
            title: title.to_string(),
            slug,
            excerpt,
            body: self.body.clone(),
            cover_image_url: self.cover_image_url.clone(),
            is_published: self.publish,
            published_date: self.publish.then_some(today),
            created_date: None,
        })
    }
}

/// Partial update for publishing or unpublishing. Publishing stamps today's
/// date unless the post already has one.
pub fn publish_patch(post: &BlogPost, publish: bool, today: NaiveDate) -> Value {
    if publish {
        json!({
            "is_published": true,
            "published_date": post.published_date.unwrap_or(today),
        })
    } else {
        json!({ "is_published": false })
    }
}
