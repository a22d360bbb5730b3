use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{
    client::ApiClient,
    types::{ApiError, InvokeLlmRequest, SendEmailRequest, UploadFileResponse},
};

impl ApiClient {
    async fn integration_url(&self, name: &str) -> String {
        format!("{}/integration-endpoints/Core/{}", self.app_url().await, name)
    }

    pub async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadFileResponse, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::validation("File is empty"));
        }
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::validation(format!("Invalid file type: {}", e)))?;
        let form = Form::new().part("file", part);
        let url = self.integration_url("UploadFile").await;
        let request = self.http_client().post(&url).multipart(form);
        self.send_json(request).await
    }

    pub async fn send_email(&self, email: &SendEmailRequest) -> Result<(), ApiError> {
        if email.to.trim().is_empty() {
            return Err(ApiError::validation("Email recipient is required"));
        }
        let url = self.integration_url("SendEmail").await;
        let request = self.http_client().post(&url).json(email);
        self.send_empty(request).await
    }

    /// Returns the model output. With a `response_json_schema` the backend
    /// answers with a JSON object matching it; otherwise with a JSON string.
    pub async fn invoke_llm(&self, request: &InvokeLlmRequest) -> Result<Value, ApiError> {
        if request.prompt.trim().is_empty() {
            return Err(ApiError::validation("Prompt is required"));
        }
        let url = self.integration_url("InvokeLLM").await;
        let builder = self.http_client().post(&url).json(request);
        self.send_json(builder).await
    }
}
