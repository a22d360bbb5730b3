use std::rc::Rc;

use leptos::*;

use super::repository::BookingsRepository;
use crate::{
    api::{ApiClient, ApiError, Booking, BookingStatus},
    components::{
        confirm_dialog::{ConfirmDelete, PendingDelete},
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
        messages::{MessageBanner, MessageState},
    },
    utils::filters::filter_bookings,
};

const FIELD: &str = "rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

pub fn status_label(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "Pending",
        BookingStatus::Confirmed => "Confirmed",
        BookingStatus::Cancelled => "Cancelled",
    }
}

/// Status changes offered for a booking in `status`.
pub fn next_statuses(status: BookingStatus) -> &'static [BookingStatus] {
    match status {
        BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
        BookingStatus::Confirmed => &[BookingStatus::Cancelled],
        BookingStatus::Cancelled => &[BookingStatus::Confirmed],
    }
}

#[component]
pub fn BookingsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = BookingsRepository::new_with_client(Rc::new(api));

    let messages = create_rw_signal(MessageState::default());
    let status_filter = create_rw_signal(None::<BookingStatus>);
    let search = create_rw_signal(String::new());
    let pending_delete = create_rw_signal(None::<PendingDelete>);
    let reload = create_rw_signal(0u32);

    let repo_for_resource = repository.clone();
    let bookings = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.fetch_recent().await }
        },
    );

    let repo_for_status = repository.clone();
    let status_action = create_action(move |(id, status): &(String, BookingStatus)| {
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
            let label = result
                .as_ref()
                .map(|b| format!("{} is now {}", b.member_name, status_label(b.status).to_lowercase()))
                .unwrap_or_default();
            messages.update(|state| state.report(&result, label));
            reload.update(|value| *value = value.wrapping_add(1));
        }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            messages.update(|state| state.report(&result, "Booking deleted"));
            reload.update(|value| *value = value.wrapping_add(1));
        }
    });

    let visible = move |all: &[Booking]| filter_bookings(all, status_filter.get(), &search.get());
    let on_delete = Callback::new(move |id: String| delete_action.dispatch(id));
    let busy = move || status_action.pending().get() || delete_action.pending().get();

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Bookings"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Class bookings from the public site, newest first."</p>
            </div>
            <MessageBanner messages=messages />
            <div class="flex flex-wrap gap-3">
                <select
                    class=FIELD
                    on:change=move |ev| status_filter.set(BookingStatus::parse(&event_target_value(&ev)))
                >
                    <option value="">"All statuses"</option>
                    {BookingStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.as_str()>{status_label(s)}</option>
                    }).collect_view()}
                </select>
                <input
                    type="search"
                    class=FIELD
                    placeholder="Search name, email or phone"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || bookings.get().map(|result: Result<Vec<Booking>, ApiError>| match result {
                    Err(err) => view! { <ErrorMessage message=err.error /> }.into_view(),
                    Ok(all) => {
                        let rows = visible(&all);
                        if rows.is_empty() {
                            return view! { <EmptyState title="No bookings found" /> }.into_view();
                        }
                        view! {
                            <table class="min-w-full divide-y divide-border bg-surface-elevated rounded-lg shadow text-sm">
                                <thead>
                                    <tr class="text-left text-fg-muted">
                                        <th class="px-4 py-2">"Member"</th>
                                        <th class="px-4 py-2">"Date"</th>
                                        <th class="px-4 py-2">"Status"</th>
                                        <th class="px-4 py-2"></th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    {rows.into_iter().map(|b| {
                                        let target = PendingDelete::new(b.id.clone(), b.member_name.clone());
                                        let id = b.id.clone();
                                        view! {
                                            <tr>
                                                <td class="px-4 py-2">
                                                    <div class="font-medium text-fg">{b.member_name.clone()}</div>
                                                    <div class="text-fg-muted">{b.member_email.clone()}</div>
                                                </td>
                                                <td class="px-4 py-2">
                                                    {b.booking_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                                                </td>
                                                <td class="px-4 py-2">{status_label(b.status)}</td>
                                                <td class="px-4 py-2 text-right space-x-2">
                                                    {next_statuses(b.status).iter().map(|next| {
                                                        let (id, next) = (id.clone(), *next);
                                                        view! {
                                                            <button
                                                                type="button"
                                                                class="text-action-primary-bg hover:underline disabled:opacity-50"
                                                                disabled=busy
                                                                on:click=move |_| status_action.dispatch((id.clone(), next))
                                                            >
                                                                {match next {
                                                                    BookingStatus::Confirmed => "Confirm",
                                                                    BookingStatus::Cancelled => "Cancel",
                                                                    BookingStatus::Pending => "Reopen",
                                                                }}
                                                            </button>
                                                        }
                                                    }).collect_view()}
                                                    <button
                                                        type="button"
                                                        class="text-status-error-text hover:underline"
                                                        on:click=move |_| pending_delete.set(Some(target.clone()))
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_view()
                    }
                })}
            </Suspense>
            <ConfirmDelete pending=pending_delete on_delete=on_delete />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_bookings_can_be_confirmed_or_cancelled() {
        assert_eq!(
            next_statuses(BookingStatus::Pending),
            &[BookingStatus::Confirmed, BookingStatus::Cancelled]
        );
        assert_eq!(next_statuses(BookingStatus::Cancelled), &[BookingStatus::Confirmed]);
    }
}
