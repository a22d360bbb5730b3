use leptos::*;

use crate::api::ApiClient;

/// Nothing listens here; resource loads are suppressed while rendering anyway.
pub const UNROUTABLE_API: &str = "http://127.0.0.1:9/api";

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Renders `view` with an `ApiClient` in context, so pages never fall back to
/// the runtime config.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| {
        provide_context(ApiClient::new_with_base_url(UNROUTABLE_API).with_app_id("test"));
        view().into_view().render_to_string().to_string()
    });
    leptos_reactive::suppress_resource_load(false);
    html
}
