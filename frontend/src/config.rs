use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "https://base44.app/api";
pub const DEFAULT_APP_ID: &str = "local-dev";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub app_id: Option<String>,
}

impl RuntimeConfig {
    fn merge(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            app_id: self.app_id.or(fallback.app_id),
        }
    }

    fn is_complete(&self) -> bool {
        self.api_base_url.is_some() && self.app_id.is_some()
    }
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static APP_ID: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(global: &str, keys: &[&str]) -> Option<String> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &global.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&obj, &(*key).into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    })
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> RuntimeConfig {
    // window.__GYM_ENV (env.js) wins over window.__GYM_CONFIG
    let from_env = RuntimeConfig {
        api_base_url: read_global("__GYM_ENV", &["API_BASE_URL", "api_base_url"]),
        app_id: read_global("__GYM_ENV", &["APP_ID", "app_id"]),
    };
    let from_config = RuntimeConfig {
        api_base_url: read_global("__GYM_CONFIG", &["api_base_url", "API_BASE_URL"]),
        app_id: read_global("__GYM_CONFIG", &["app_id", "APP_ID"]),
    };
    from_env.merge(from_config)
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: std::env::var("GYM_API_BASE_URL").ok(),
        app_id: std::env::var("GYM_APP_ID").ok(),
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache(config: RuntimeConfig) -> (String, String) {
    let base = config
        .api_base_url
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let app = config.app_id.unwrap_or_else(|| DEFAULT_APP_ID.to_string());
    let base = API_BASE_URL.get_or_init(|| base).clone();
    let app = APP_ID.get_or_init(|| app).clone();
    (base, app)
}

async fn resolve() -> (String, String) {
    if let (Some(base), Some(app)) = (API_BASE_URL.get(), APP_ID.get()) {
        return (base.clone(), app.clone());
    }
    let snapshot = snapshot_from_globals();
    if snapshot.is_complete() {
        return cache(snapshot);
    }
    let merged = match fetch_runtime_config().await {
        Some(fetched) => snapshot.merge(fetched),
        None => {
            log::warn!("config.json unavailable, falling back to defaults");
            snapshot
        }
    };
    cache(merged)
}

pub async fn await_api_base_url() -> String {
    resolve().await.0
}

pub async fn await_app_id() -> String {
    resolve().await.1
}

pub async fn init() {
    let (base, app) = resolve().await;
    log::info!("runtime config resolved: api={} app={}", base, app);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_primary_values() {
        let primary = RuntimeConfig {
            api_base_url: Some("https://primary".into()),
            app_id: None,
        };
        let fallback = RuntimeConfig {
            api_base_url: Some("https://fallback".into()),
            app_id: Some("app-1".into()),
        };
        let merged = primary.merge(fallback);
        assert_eq!(merged.api_base_url.as_deref(), Some("https://primary"));
        assert_eq!(merged.app_id.as_deref(), Some("app-1"));
        assert!(merged.is_complete());
    }

    #[test]
    fn runtime_config_deserializes_partial_json() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"https://api.example"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://api.example"));
        assert!(cfg.app_id.is_none());
        assert!(!cfg.is_complete());
    }
}
