use std::rc::Rc;

use leptos::*;

use super::{
    repository::RolesRepository,
    utils::{is_self_lockout, RoleForm},
};
use crate::{
    access::AdminPage,
    api::{ApiClient, ApiError, Role, UserRole},
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
        messages::{MessageBanner, MessageState},
    },
    state::{
        auth::use_auth,
        permissions::{use_permissions, use_role_cache},
    },
};

const FIELD: &str = "rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

#[component]
pub fn UserRolesPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let permissions = use_permissions();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = RolesRepository::new_with_client(Rc::new(api), use_role_cache());
    let current_email = move || auth.with(|a| a.email().map(str::to_string));

    let form = create_rw_signal(RoleForm::default());
    let messages = create_rw_signal(MessageState::default());
    let pending_delete = create_rw_signal(None::<UserRole>);
    let reload = create_rw_signal(0u32);

    let repo_for_resource = repository.clone();
    let roles = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.fetch_roles().await }
        },
    );
    let existing = move || roles.get().and_then(Result::ok).unwrap_or_default();

    let repo_for_save = repository.clone();
    let save_action = create_action(move |record: &UserRole| {
        let repo = repo_for_save.clone();
        let record = record.clone();
        async move { repo.save(&record).await.map(|(_, invalidated)| invalidated) }
    });

    let repo_for_toggle = repository.clone();
    let toggle_action = create_action(move |(record, active): &(UserRole, bool)| {
        let repo = repo_for_toggle.clone();
        let (record, active) = (record.clone(), *active);
        async move { repo.set_active(&record, active).await }
    });

    let repo_for_delete = repository;
    let delete_action = create_action(move |record: &UserRole| {
        let repo = repo_for_delete.clone();
        let record = record.clone();
        async move { repo.delete(&record).await }
    });

    // A change to the signed-in user's own record re-resolves their access.
    let after_change = move |result: &Result<bool, ApiError>, success: &str| {
        messages.update(|state| state.report(result, success));
        if matches!(result, Ok(true)) {
            permissions.reload();
        }
        reload.update(|value| *value = value.wrapping_add(1));
    };
    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            if result.is_ok() {
                form.update(RoleForm::reset);
            }
            after_change(&result, "Role saved");
        }
    });
    create_effect(move |_| {
        if let Some(result) = toggle_action.value().get() {
            after_change(&result, "Role updated");
        }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            after_change(&result, "Role removed");
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        let me = current_email();
        let record = match snapshot.to_record(&existing(), me.as_deref()) {
            Ok(record) => record,
            Err(err) => {
                messages.update(|state| state.set_error(err));
                return;
            }
        };
        let locks_out = is_self_lockout(me.as_deref(), &record.user_email, Some(&record));
        if snapshot.is_editing() && locks_out {
            messages.update(|state| {
                state.set_error("You cannot remove your own super admin access")
            });
            return;
        }
        save_action.dispatch(record);
    };

    let request_delete = move |record: UserRole| {
        if is_self_lockout(current_email().as_deref(), &record.user_email, None) {
            messages.update(|state| state.set_error("You cannot delete your own role"));
        } else {
            pending_delete.set(Some(record));
        }
    };

    let request_toggle = move |record: UserRole| {
        let mut next = record.clone();
        next.is_active = !record.is_active;
        if is_self_lockout(current_email().as_deref(), &record.user_email, Some(&next)) {
            messages.update(|state| state.set_error("You cannot deactivate your own role"));
        } else {
            toggle_action.dispatch((record, next.is_active));
        }
    };

    let row = move |record: UserRole| {
        let pages = if record.role == Role::SuperAdmin {
            "All pages".to_string()
        } else if record.permissions.is_empty() {
            "No pages".to_string()
        } else {
            record.permissions.join(", ")
        };
        let row_class = if record.is_active { "" } else { "opacity-60" };
        let (for_edit, for_toggle, for_delete) = (record.clone(), record.clone(), record.clone());
        view! {
            <tr class=row_class>
                <td class="px-4 py-2 text-fg">{record.user_email.clone()}</td>
                <td class="px-4 py-2">{record.role.label()}</td>
                <td class="px-4 py-2 text-fg-muted">{pages}</td>
                <td class="px-4 py-2">{if record.is_active { "Active" } else { "Inactive" }}</td>
                <td class="px-4 py-2 text-right space-x-3">
                    <button
                        type="button"
                        class="text-action-primary-bg hover:underline"
                        on:click=move |_| {
                            messages.update(MessageState::clear);
                            form.set(RoleForm::from_record(&for_edit));
                        }
                    >
                        "Edit"
                    </button>
                    <button
                        type="button"
                        class="text-action-primary-bg hover:underline"
                        on:click=move |_| request_toggle(for_toggle.clone())
                    >
                        {if record.is_active { "Deactivate" } else { "Activate" }}
                    </button>
                    <button
                        type="button"
                        class="text-status-error-text hover:underline"
                        on:click=move |_| request_delete(for_delete.clone())
                    >
                        "Delete"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Roles & permissions"</h1>
                <p class="mt-1 text-sm text-fg-muted">
                    "Grant staff access to admin pages. Super admins can open every page."
                </p>
            </div>
            <MessageBanner messages=messages />
            <form class="bg-surface-elevated shadow rounded-lg p-4 space-y-4" on:submit=on_submit>
                <div class="flex flex-wrap gap-3">
                    <input
                        type="email"
                        class=FIELD
                        placeholder="staff@example.com"
                        prop:value=move || form.with(|f| f.user_email.clone())
                        on:input=move |ev| form.update(|f| f.user_email = event_target_value(&ev))
                    />
                    <select
                        class=FIELD
                        prop:value=move || form.with(|f| f.role.as_str())
                        on:change=move |ev| {
                            if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                form.update(|f| f.role = role);
                            }
                        }
                    >
                        {Role::ALL.into_iter().map(|role| view! {
                            <option value=role.as_str()>{role.label()}</option>
                        }).collect_view()}
                    </select>
                    <label class="flex items-center gap-2 text-sm text-fg">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.is_active)
                            on:change=move |ev| form.update(|f| f.is_active = event_target_checked(&ev))
                        />
                        "Active"
                    </label>
                </div>
                <fieldset
                    class="grid gap-2 sm:grid-cols-3 text-sm text-fg"
                    disabled=move || form.with(|f| f.role == Role::SuperAdmin)
                >
                    {AdminPage::grantable().map(|page| view! {
                        <label class="flex items-center gap-2">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.pages.contains(&page))
                                on:change=move |_| form.update(|f| f.toggle_page(page))
                            />
                            {page.label()}
                        </label>
                    }).collect_view()}
                </fieldset>
                <div class="flex gap-2">
                    <button
                        type="submit"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || save_action.pending().get()
                    >
                        {move || if form.with(RoleForm::is_editing) { "Update role" } else { "Add role" }}
                    </button>
                    <Show when=move || form.with(RoleForm::is_editing)>
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm border border-border text-fg"
                            on:click=move |_| form.update(RoleForm::reset)
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || roles.get().map(|result| match result {
                    Err(err) => view! { <ErrorMessage message=err.error /> }.into_view(),
                    Ok(list) if list.is_empty() => {
                        view! { <EmptyState title="No role records yet" /> }.into_view()
                    }
                    Ok(list) => view! {
                        <table class="min-w-full divide-y divide-border bg-surface-elevated rounded-lg shadow text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted">
                                    <th class="px-4 py-2">"Email"</th>
                                    <th class="px-4 py-2">"Role"</th>
                                    <th class="px-4 py-2">"Pages"</th>
                                    <th class="px-4 py-2">"Status"</th>
                                    <th class="px-4 py-2"></th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                {list.into_iter().map(row).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_view(),
                })}
            </Suspense>
            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.with(Option::is_some))
                title="Remove role"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|r| format!("Remove all admin access for {}?", r.user_email))
                        .unwrap_or_default()
                })
                confirm_label="Remove"
                destructive=true
                on_confirm=Callback::new(move |_| {
                    if let Some(record) = pending_delete.get_untracked() {
                        pending_delete.set(None);
                        delete_action.dispatch(record);
                    }
                })
                on_cancel=Callback::new(move |_| pending_delete.set(None))
            />
        </div>
    }
}
