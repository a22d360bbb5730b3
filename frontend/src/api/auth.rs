use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{
    client::ApiClient,
    types::{ApiError, CurrentUser},
};
use crate::utils::storage as storage_utils;

impl ApiClient {
    pub async fn me(&self) -> Result<CurrentUser, ApiError> {
        if self.access_token().is_none() {
            return Err(ApiError::unauthorized("Not signed in"));
        }
        let url = format!("{}/entities/User/me", self.app_url().await);
        let request = self.http_client().get(&url);
        self.send_json(request).await
    }

    pub async fn is_authenticated(&self) -> bool {
        match self.me().await {
            Ok(_) => true,
            Err(err) => {
                if !err.is_unauthorized() {
                    log::warn!("auth check failed: {}", err);
                }
                false
            }
        }
    }

    /// Hosted login page that returns to `return_path` with an `access_token`
    /// query parameter.
    pub async fn login_url(&self, return_path: &str) -> String {
        format!(
            "{}/login?from_url={}",
            self.app_url().await,
            utf8_percent_encode(return_path, NON_ALPHANUMERIC)
        )
    }

    pub async fn redirect_to_login(&self, return_path: &str) {
        let target = self.login_url(return_path).await;
        navigate_to(&target);
    }

    pub async fn logout(&self, return_path: Option<&str>) {
        storage_utils::clear_access_token();
        log::info!("signed out");
        if let Some(path) = return_path {
            navigate_to(path);
        }
    }
}

/// Stores an `access_token` handed back by the hosted login page and strips it
/// from the address bar.
#[cfg(target_arch = "wasm32")]
pub fn capture_token_from_location() -> Result<bool, String> {
    let window = storage_utils::window()?;
    let location = window.location();
    let search = location.search().map_err(|_| "Failed to read location")?;
    let params =
        web_sys::UrlSearchParams::new_with_str(&search).map_err(|_| "Invalid query string")?;
    let Some(token) = params.get("access_token") else {
        return Ok(false);
    };
    storage_utils::write_access_token(&token)?;
    params.delete("access_token");
    let remaining = String::from(params.to_string());
    let pathname = location.pathname().unwrap_or_else(|_| "/".into());
    let clean = if remaining.is_empty() {
        pathname
    } else {
        format!("{}?{}", pathname, remaining)
    };
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&clean));
    }
    Ok(true)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn capture_token_from_location() -> Result<bool, String> {
    Ok(false)
}

#[cfg(target_arch = "wasm32")]
pub fn navigate_to(target: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(target);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_to(target: &str) {
    log::debug!("navigation to {} skipped outside the browser", target);
}

#[cfg(target_arch = "wasm32")]
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> String {
    "/".to_string()
}
