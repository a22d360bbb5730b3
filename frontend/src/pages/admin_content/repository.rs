use std::rc::Rc;

use chrono::Utc;

use super::utils::{publish_patch, PostForm};
use crate::{
    api::{ApiClient, ApiError, BlogPost},
    utils::upload::{validate_image, SelectedFile},
};

#[derive(Clone)]
pub struct ContentRepository {
    client: Rc<ApiClient>,
}

impl ContentRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.client.list(Some("-created_date"), None).await
    }

    /// Uploads a cover image and returns its public URL.
    pub async fn upload_cover(&self, file: SelectedFile) -> Result<String, ApiError> {
        validate_image(&file).map_err(ApiError::validation)?;
        let uploaded = self
            .client
            .upload_file(&file.name, &file.mime_type, file.bytes)
            .await?;
        Ok(uploaded.file_url)
    }

    pub async fn create(&self, form: &PostForm) -> Result<BlogPost, ApiError> {
        let post = form
            .to_post(Utc::now().date_naive())
            .map_err(ApiError::validation)?;
        self.client.create(&post).await
    }

    pub async fn set_published(&self, post: &BlogPost, publish: bool) -> Result<BlogPost, ApiError> {
        let patch = publish_patch(post, publish, Utc::now().date_naive());
        self.client.update::<BlogPost, _>(&post.id, &patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete::<BlogPost>(id).await
    }
}
