use leptos::*;

use super::layout::{ErrorMessage, SuccessMessage};

/// Outcome of the last mutation on a page. Setting one side clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }

    /// Logs the failure before surfacing it.
    pub fn fail(&mut self, err: impl std::fmt::Display) {
        log::error!("{}", err);
        self.set_error(err.to_string());
    }

    pub fn report<T, E: std::fmt::Display>(
        &mut self,
        result: &Result<T, E>,
        success: impl Into<String>,
    ) {
        match result {
            Ok(_) => self.set_success(success),
            Err(err) => self.fail(err),
        }
    }
}

#[component]
pub fn MessageBanner(messages: RwSignal<MessageState>) -> impl IntoView {
    view! {
        {move || messages.get().error.map(|msg| view! { <ErrorMessage message=msg /> })}
        {move || messages.get().success.map(|msg| view! { <SuccessMessage message=msg /> })}
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn banner_shows_current_message() {
        let html = render_to_string(move || {
            let messages = create_rw_signal(MessageState::default());
            messages.update(|m| m.set_error("Could not delete club"));
            view! { <div><MessageBanner messages=messages /></div> }
        });
        assert!(html.contains("Could not delete club"));
    }
}
