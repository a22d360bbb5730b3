use std::rc::Rc;

use leptos::*;

use super::repository::InquiriesRepository;
use crate::{
    api::{ApiClient, Inquiry, InquiryStatus},
    components::{
        confirm_dialog::{ConfirmDelete, PendingDelete},
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
        messages::{MessageBanner, MessageState},
    },
    utils::filters::filter_inquiries,
};

const FIELD: &str = "rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

pub fn status_label(status: InquiryStatus) -> &'static str {
    match status {
        InquiryStatus::New => "New",
        InquiryStatus::Contacted => "Contacted",
        InquiryStatus::Closed => "Closed",
    }
}

fn status_badge(status: InquiryStatus) -> &'static str {
    match status {
        InquiryStatus::New => "bg-status-warning-bg text-status-warning-text",
        InquiryStatus::Contacted => "bg-status-info-bg text-status-info-text",
        InquiryStatus::Closed => "bg-surface-muted text-fg-muted",
    }
}

#[component]
pub fn InquiriesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = InquiriesRepository::new_with_client(Rc::new(api));

    let messages = create_rw_signal(MessageState::default());
    let status_filter = create_rw_signal(Some(InquiryStatus::New));
    let search = create_rw_signal(String::new());
    let pending_delete = create_rw_signal(None::<PendingDelete>);
    let reload = create_rw_signal(0u32);

    let repo_for_resource = repository.clone();
    let inquiries = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.fetch_recent().await }
        },
    );

    let repo_for_status = repository.clone();
    let status_action = create_action(move |(id, status): &(String, InquiryStatus)| {
        let repo = repo_for_status.clone();
        let (id, status) = (id.clone(), *status);
        async move { repo.set_status(&id, status).await }
    });

    let repo_for_delete = repository;
    let delete_action = create_action(move |id: &String| {
        let repo = repo_for_delete.clone();
        let id = id.clone();
        async move { repo.delete(&id).await }
    });

    create_effect(move |_| {
        if let Some(result) = status_action.value().get() {
            messages.update(|state| state.report(&result, "Inquiry updated"));
            reload.update(|value| *value = value.wrapping_add(1));
        }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            messages.update(|state| state.report(&result, "Inquiry deleted"));
            reload.update(|value| *value = value.wrapping_add(1));
        }
    });

    let on_delete = Callback::new(move |id: String| delete_action.dispatch(id));
    let busy = move || status_action.pending().get();

    let card = move |inquiry: Inquiry| {
        let target = PendingDelete::new(inquiry.id.clone(), inquiry.name.clone());
        let actions = [InquiryStatus::Contacted, InquiryStatus::Closed]
            .into_iter()
            .filter(|next| *next != inquiry.status)
            .map(|next| {
                let id = inquiry.id.clone();
                view! {
                    <button
                        type="button"
                        class="text-action-primary-bg hover:underline disabled:opacity-50"
                        disabled=busy
                        on:click=move |_| status_action.dispatch((id.clone(), next))
                    >
                        {format!("Mark {}", status_label(next).to_lowercase())}
                    </button>
                }
            })
            .collect_view();
        view! {
            <li class="bg-surface-elevated rounded-lg shadow p-4 space-y-2">
                <div class="flex items-center justify-between">
                    <div>
                        <span class="font-medium text-fg">{inquiry.name.clone()}</span>
                        <span class="ml-2 text-sm text-fg-muted">{inquiry.email.clone()}</span>
                        {inquiry.phone.clone().map(|p| view! { <span class="ml-2 text-sm text-fg-muted">{p}</span> })}
                    </div>
                    <span class=format!("rounded px-2 py-0.5 text-xs {}", status_badge(inquiry.status))>
                        {status_label(inquiry.status)}
                    </span>
                </div>
                <p class="text-sm text-fg whitespace-pre-line">{inquiry.message.clone()}</p>
                <div class="flex justify-end gap-3 text-sm">
                    {actions}
                    <button
                        type="button"
                        class="text-status-error-text hover:underline"
                        on:click=move |_| pending_delete.set(Some(target.clone()))
                    >
                        "Delete"
                    </button>
                </div>
            </li>
        }
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Inquiries"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Messages sent through the contact form."</p>
            </div>
            <MessageBanner messages=messages />
            <div class="flex flex-wrap gap-3">
                <select
                    class=FIELD
                    on:change=move |ev| status_filter.set(InquiryStatus::parse(&event_target_value(&ev)))
                >
                    {InquiryStatus::ALL.into_iter().map(|s| {
                        let is_default = s == InquiryStatus::New;
                        view! { <option value=s.as_str() selected=is_default>{status_label(s)}</option> }
                    }).collect_view()}
                    <option value="">"All"</option>
                </select>
                <input
                    type="search"
                    class=FIELD
                    placeholder="Search name, email or message"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || inquiries.get().map(|result| match result {
                    Err(err) => view! { <ErrorMessage message=err.error /> }.into_view(),
                    Ok(all) => {
                        let rows = filter_inquiries(&all, status_filter.get(), &search.get());
                        if rows.is_empty() {
                            view! { <EmptyState title="No inquiries" /> }.into_view()
                        } else {
                            view! { <ul class="space-y-3">{rows.into_iter().map(card).collect_view()}</ul> }
                                .into_view()
                        }
                    }
                })}
            </Suspense>
            <ConfirmDelete pending=pending_delete on_delete=on_delete />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn defaults_to_new_inquiries() {
        let html = render_to_string(move || view! { <InquiriesPage /> });
        assert!(html.contains("Inquiries"));
        assert!(html.contains("value=\"new\""));
        assert!(html.contains("Contacted"));
    }
}
