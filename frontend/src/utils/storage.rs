pub const ACCESS_TOKEN_KEY: &str = "base44_access_token";
pub const VISITOR_SESSION_KEY: &str = "visitor_session_id";

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{Storage, Window};

    pub fn window() -> Result<Window, String> {
        web_sys::window().ok_or_else(|| "No window object".to_string())
    }

    pub fn local_storage() -> Result<Storage, String> {
        window()?
            .local_storage()
            .map_err(|_| "No localStorage".to_string())?
            .ok_or_else(|| "No localStorage".to_string())
    }

    pub fn session_storage() -> Result<Storage, String> {
        window()?
            .session_storage()
            .map_err(|_| "No sessionStorage".to_string())?
            .ok_or_else(|| "No sessionStorage".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{local_storage, session_storage, window};

#[cfg(target_arch = "wasm32")]
pub fn read_access_token() -> Option<String> {
    local_storage()
        .ok()
        .and_then(|s| s.get_item(ACCESS_TOKEN_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}

#[cfg(target_arch = "wasm32")]
pub fn write_access_token(token: &str) -> Result<(), String> {
    local_storage()?
        .set_item(ACCESS_TOKEN_KEY, token)
        .map_err(|_| "Failed to store token".to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn clear_access_token() {
    if let Ok(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn visitor_session_id() -> String {
    let storage = match session_storage() {
        Ok(storage) => storage,
        Err(_) => return uuid::Uuid::new_v4().to_string(),
    };
    if let Ok(Some(existing)) = storage.get_item(VISITOR_SESSION_KEY) {
        return existing;
    }
    let id = uuid::Uuid::new_v4().to_string();
    let _ = storage.set_item(VISITOR_SESSION_KEY, &id);
    id
}

// Host builds have no browser storage; the session lives for the process.
#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::sync::Mutex;

    pub static TOKEN: Mutex<Option<String>> = Mutex::new(None);
    pub static SESSION: Mutex<Option<String>> = Mutex::new(None);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_access_token() -> Option<String> {
    host::TOKEN.lock().ok().and_then(|t| t.clone())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_access_token(token: &str) -> Result<(), String> {
    let mut slot = host::TOKEN
        .lock()
        .map_err(|_| "Failed to store token".to_string())?;
    *slot = Some(token.to_string());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_access_token() {
    if let Ok(mut slot) = host::TOKEN.lock() {
        *slot = None;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn visitor_session_id() -> String {
    let mut slot = match host::SESSION.lock() {
        Ok(slot) => slot,
        Err(_) => return uuid::Uuid::new_v4().to_string(),
    };
    slot.get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
        .clone()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn visitor_session_id_is_stable_within_a_session() {
        let first = visitor_session_id();
        let second = visitor_session_id();
        assert_eq!(first, second);
        assert!(uuid::Uuid::parse_str(&first).is_ok());
    }
}
