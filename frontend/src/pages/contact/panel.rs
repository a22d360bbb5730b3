use std::rc::Rc;

use leptos::*;

use super::{repository::ContactRepository, utils::ContactForm};
use crate::{
    api::{ApiClient, ApiError, Club, Inquiry},
    components::messages::{MessageBanner, MessageState},
};

const FIELD: &str = "w-full rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

fn club_name(clubs: &[Club], id: &str) -> Option<String> {
    clubs
        .iter()
        .find(|club| club.id == id)
        .map(|club| club.name.clone())
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = ContactRepository::new_with_client(Rc::new(api));

    let form = create_rw_signal(ContactForm::default());
    let messages = create_rw_signal(MessageState::default());

    let repo_for_clubs = repository.clone();
    let clubs = create_resource(
        || (),
        move |_| {
            let repo = repo_for_clubs.clone();
            async move { repo.fetch_clubs().await }
        },
    );
    let club_list = Signal::derive(move || {
        clubs
            .get()
            .and_then(|result: Result<Vec<Club>, ApiError>| result.ok())
            .unwrap_or_default()
    });

    let submit_action = create_action(move |(inquiry, club): &(Inquiry, Option<String>)| {
        let repo = repository.clone();
        let (inquiry, club) = (inquiry.clone(), club.clone());
        async move { repo.submit(&inquiry, club.as_deref()).await }
    });
    let pending = submit_action.pending();

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            let ok = result.is_ok();
            messages.update(|state| {
                state.report(&result, "Thanks! We received your message and will be in touch.")
            });
            if ok {
                form.set(ContactForm::default());
            }
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let snapshot = form.get_untracked();
        match snapshot.to_inquiry() {
            Ok(inquiry) => {
                let club = club_list.with_untracked(|clubs| club_name(clubs, &snapshot.club_id));
                submit_action.dispatch((inquiry, club));
            }
            Err(msg) => messages.update(|state| state.set_error(msg)),
        }
    };

    view! {
        <div class="max-w-2xl space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-fg">"Contact us"</h1>
                <p class="mt-1 text-fg-muted">
                    "Questions about memberships, classes or a club near you? Send us a note."
                </p>
            </div>
            <MessageBanner messages=messages />
            <form class="bg-surface-elevated rounded-lg shadow p-6 space-y-4" on:submit=on_submit>
                <label class="block text-sm text-fg space-y-1">
                    <span>"Name"</span>
                    <input
                        class=FIELD
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>
                <div class="grid gap-4 md:grid-cols-2">
                    <label class="block text-sm text-fg space-y-1">
                        <span>"Email"</span>
                        <input
                            type="email"
                            class=FIELD
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label class="block text-sm text-fg space-y-1">
                        <span>"Phone (optional)"</span>
                        <input
                            type="tel"
                            class=FIELD
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                        />
                    </label>
                </div>
                <label class="block text-sm text-fg space-y-1">
                    <span>"Preferred club"</span>
                    <select
                        class=FIELD
                        prop:value=move || form.with(|f| f.club_id.clone())
                        on:change=move |ev| form.update(|f| f.club_id = event_target_value(&ev))
                    >
                        <option value="">"No preference"</option>
                        <For
                            each=move || club_list.get()
                            key=|club| club.id.clone()
                            children=move |club| {
                                view! { <option value=club.id.clone()>{club.name}</option> }
                            }
                        />
                    </select>
                </label>
                <label class="block text-sm text-fg space-y-1">
                    <span>"Message"</span>
                    <textarea
                        rows="5"
                        class=FIELD
                        prop:value=move || form.with(|f| f.message.clone())
                        on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                    ></textarea>
                </label>
                <button
                    type="submit"
                    class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "Sending..." } else { "Send message" }}
                </button>
            </form>
        </div>
    }
}
