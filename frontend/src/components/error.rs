use crate::api::ApiError;
use leptos::*;
use serde_json::Value;

/// Human-readable lines from an error's `details`: either an `errors` array
/// or an object mapping field names to messages.
pub fn detail_lines(error: &ApiError) -> Vec<String> {
    let Some(details) = error.details.as_ref() else {
        return Vec::new();
    };
    if let Some(errors) = details.get("errors").and_then(Value::as_array) {
        return errors
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }
    match details.as_object() {
        Some(fields) => fields
            .iter()
            .filter_map(|(field, msg)| msg.as_str().map(|msg| format!("{}: {}", field, msg)))
            .collect(),
        None => Vec::new(),
    }
}

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || {
                    let lines = error.with(|e| e.as_ref().map(detail_lines).unwrap_or_default());
                    (!lines.is_empty()).then(|| view! {
                        <ul class="list-disc list-inside text-sm">
                            {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                        </ul>
                    })
                }}
            </div>
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_validation_details() {
        let html = render_to_string(move || {
            let mut error = ApiError::validation("Validation failed");
            error.details = Some(json!({ "errors": ["Name is required", "Email is invalid"] }));
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("Name is required"));
        assert!(html.contains("Email is invalid"));
    }

    #[test]
    fn renders_nothing_without_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <div><InlineErrorMessage error=signal /></div> }
        });
        assert!(!html.contains("bg-status-error-bg"));
    }
}
