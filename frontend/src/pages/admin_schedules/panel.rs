use leptos::*;

use super::{
    utils::name_or_unknown,
    view_model::{use_schedules_view_model, SchedulesViewModel},
};
use crate::{
    components::{
        confirm_dialog::{ConfirmDelete, PendingDelete},
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
        messages::MessageBanner,
    },
    utils::filters::{weekday_name, WEEKDAYS},
};

const FIELD: &str = "rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

#[component]
pub fn SchedulesPage() -> impl IntoView {
    let vm = use_schedules_view_model();
    let on_delete = Callback::new(move |id: String| vm.delete_action.dispatch(id));

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Class schedule"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Weekly timetable per club."</p>
            </div>
            <MessageBanner messages=vm.messages />
            <ScheduleFormCard vm=vm />
            <ScheduleFilters vm=vm />
            <ScheduleTable vm=vm />
            <ConfirmDelete pending=vm.pending_delete on_delete=on_delete />
        </div>
    }
}

#[component]
fn ScheduleFormCard(vm: SchedulesViewModel) -> impl IntoView {
    let form = vm.form;
    let pending = vm.save_action.pending();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !pending.get_untracked() {
            vm.save_action.dispatch(form.get_untracked());
        }
    };

    view! {
        <form class="bg-surface-elevated shadow rounded-lg p-4 grid gap-3 md:grid-cols-4" on:submit=on_submit>
            <select
                class=FIELD
                on:change=move |ev| form.update(|f| f.class_id = event_target_value(&ev))
                prop:value=move || form.with(|f| f.class_id.clone())
            >
                <option value="">"Class..."</option>
                {move || vm.lookups().classes.into_iter().map(|c| view! {
                    <option value=c.id.clone()>{c.name.clone()}</option>
                }).collect_view()}
            </select>
            <select
                class=FIELD
                on:change=move |ev| form.update(|f| f.club_id = event_target_value(&ev))
                prop:value=move || form.with(|f| f.club_id.clone())
            >
                <option value="">"Club..."</option>
                {move || vm.lookups().clubs.into_iter().map(|c| view! {
                    <option value=c.id.clone()>{c.name.clone()}</option>
                }).collect_view()}
            </select>
            <select
                class=FIELD
                on:change=move |ev| form.update(|f| f.day_of_week = event_target_value(&ev))
                prop:value=move || form.with(|f| f.day_of_week.clone())
            >
                {WEEKDAYS.iter().enumerate().map(|(day, name)| view! {
                    <option value=day.to_string()>{*name}</option>
                }).collect_view()}
            </select>
            <input
                class=FIELD
                placeholder="Instructor"
                prop:value=move || form.with(|f| f.instructor.clone())
                on:input=move |ev| form.update(|f| f.instructor = event_target_value(&ev))
            />
            <input
                class=FIELD
                placeholder="Start HH:MM"
                prop:value=move || form.with(|f| f.start_time.clone())
                on:input=move |ev| form.update(|f| f.start_time = event_target_value(&ev))
            />
            <input
                class=FIELD
                placeholder="End HH:MM"
                prop:value=move || form.with(|f| f.end_time.clone())
                on:input=move |ev| form.update(|f| f.end_time = event_target_value(&ev))
            />
            <input
                class=FIELD
                placeholder="Capacity"
                inputmode="numeric"
                prop:value=move || form.with(|f| f.capacity.clone())
                on:input=move |ev| form.update(|f| f.capacity = event_target_value(&ev))
            />
            <button
                type="submit"
                class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                disabled=move || pending.get()
            >
                "Add to schedule"
            </button>
        </form>
    }
}

#[component]
fn ScheduleFilters(vm: SchedulesViewModel) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-3">
            <select
                class=FIELD
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    vm.club_filter.set(Some(value).filter(|v| !v.is_empty()));
                }
            >
                <option value="">"All clubs"</option>
                {move || vm.lookups().clubs.into_iter().map(|c| view! {
                    <option value=c.id.clone()>{c.name.clone()}</option>
                }).collect_view()}
            </select>
            <select
                class=FIELD
                on:change=move |ev| vm.day_filter.set(event_target_value(&ev).parse::<u8>().ok())
            >
                <option value="">"All days"</option>
                {WEEKDAYS.iter().enumerate().map(|(day, name)| view! {
                    <option value=day.to_string()>{*name}</option>
                }).collect_view()}
            </select>
        </div>
    }
}

#[component]
fn ScheduleTable(vm: SchedulesViewModel) -> impl IntoView {
    view! {
        <Suspense fallback=move || view! { <LoadingSpinner /> }>
            {move || match vm.schedules_resource.get() {
                None => ().into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(_)) if vm.visible.with(Vec::is_empty) => {
                    view! { <EmptyState title="Nothing scheduled" description="No sessions match these filters." /> }
                        .into_view()
                }
                Some(Ok(_)) => {
                    let lookups = vm.lookups();
                    let (classes, clubs) = (lookups.class_names(), lookups.club_names());
                    view! {
                        <table class="min-w-full divide-y divide-border bg-surface-elevated rounded-lg shadow text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted">
                                    <th class="px-4 py-2">"Day"</th>
                                    <th class="px-4 py-2">"Time"</th>
                                    <th class="px-4 py-2">"Class"</th>
                                    <th class="px-4 py-2">"Club"</th>
                                    <th class="px-4 py-2">"Instructor"</th>
                                    <th class="px-4 py-2">"Capacity"</th>
                                    <th class="px-4 py-2"></th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                {vm.visible.get().into_iter().map(|s| {
                                    let class_name = name_or_unknown(&classes, &s.class_id);
                                    let target = PendingDelete::new(
                                        s.id.clone(),
                                        format!("{} {} {}", class_name, weekday_name(s.day_of_week), s.start_time),
                                    );
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2">{weekday_name(s.day_of_week)}</td>
                                            <td class="px-4 py-2">{format!("{}–{}", s.start_time, s.end_time)}</td>
                                            <td class="px-4 py-2">{class_name}</td>
                                            <td class="px-4 py-2">{name_or_unknown(&clubs, &s.club_id)}</td>
                                            <td class="px-4 py-2">{s.instructor.clone().unwrap_or_default()}</td>
                                            <td class="px-4 py-2">{s.capacity.map(|c| c.to_string()).unwrap_or_default()}</td>
                                            <td class="px-4 py-2 text-right">
                                                <button
                                                    type="button"
                                                    class="text-status-error-text hover:underline"
                                                    on:click=move |_| vm.pending_delete.set(Some(target.clone()))
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
            }}
        </Suspense>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_form_and_filters() {
        let html = render_to_string(move || view! { <SchedulesPage /> });
        assert!(html.contains("Class schedule"));
        assert!(html.contains("Add to schedule"));
        assert!(html.contains("All clubs"));
        assert!(html.contains("Wednesday"));
    }
}
