use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use super::{
    client::ApiClient,
    types::{ApiError, Entity},
};

/// Escapes `id` so it always stays a single path segment.
fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

/// Sort key understood by the backend: a field name, `-` prefixed for
/// descending order.
pub type SortKey<'a> = Option<&'a str>;

impl ApiClient {
    async fn entity_url<T: Entity>(&self) -> String {
        format!("{}/entities/{}", self.app_url().await, T::NAME)
    }

    async fn record_url<T: Entity>(&self, id: &str) -> String {
        format!("{}/{}", self.entity_url::<T>().await, path_segment(id))
    }

    fn query_params(sort: SortKey<'_>, limit: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(sort) = sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    pub async fn list<T: Entity>(
        &self,
        sort: SortKey<'_>,
        limit: Option<u32>,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.entity_url::<T>().await;
        let request = self
            .http_client()
            .get(&url)
            .query(&Self::query_params(sort, limit));
        self.send_json(request).await
    }

    /// Lists records whose fields equal every field of `matcher`.
    pub async fn filter<T: Entity>(
        &self,
        matcher: &Value,
        sort: SortKey<'_>,
        limit: Option<u32>,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.entity_url::<T>().await;
        let mut params = Self::query_params(sort, limit);
        params.push(("q", matcher.to_string()));
        let request = self.http_client().get(&url).query(&params);
        self.send_json(request).await
    }

    pub async fn create<T: Entity>(&self, record: &T) -> Result<T, ApiError> {
        let url = self.entity_url::<T>().await;
        let request = self.http_client().post(&url).json(record);
        self.send_json(request).await
    }

    pub async fn update<T: Entity, P: Serialize + ?Sized>(
        &self,
        id: &str,
        partial: &P,
    ) -> Result<T, ApiError> {
        if id.is_empty() {
            return Err(ApiError::validation(format!(
                "Cannot update {} without an id",
                T::NAME
            )));
        }
        let url = self.record_url::<T>(id).await;
        let request = self.http_client().put(&url).json(partial);
        self.send_json(request).await
    }

    pub async fn delete<T: Entity>(&self, id: &str) -> Result<(), ApiError> {
        if id.is_empty() {
            return Err(ApiError::validation(format!(
                "Cannot delete {} without an id",
                T::NAME
            )));
        }
        let url = self.record_url::<T>(id).await;
        let request = self.http_client().delete(&url);
        self.send_empty(request).await
    }
}
