use leptos::*;

use super::{
    utils::{CatalogCopy, CatalogItem},
    view_model::use_catalog_view_model,
};
use crate::{
    api::{Club, Entity, GymClass, Package, SiteBanner},
    components::{
        confirm_dialog::{ConfirmDelete, PendingDelete},
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::LoadingSpinner,
        messages::MessageBanner,
        order_controls::OrderControls,
    },
    utils::ordering::{MoveDirection, Orderable},
};

const INPUT: &str = "flex-1 rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";
const PRIMARY: &str = "rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50";
const GHOST: &str = "rounded-md px-3 py-1 text-sm text-fg border border-border hover:bg-surface-muted disabled:opacity-50";

pub const CLASSES: CatalogCopy = CatalogCopy {
    heading: "Classes",
    description: "Group classes listed on the public site, in display order.",
    noun: "class",
    empty: "No classes yet",
};

pub const CLUBS: CatalogCopy = CatalogCopy {
    heading: "Clubs",
    description: "Club locations, in the order they appear on the site.",
    noun: "club",
    empty: "No clubs yet",
};

pub const PACKAGES: CatalogCopy = CatalogCopy {
    heading: "Packages",
    description: "Membership packages and their display order.",
    noun: "package",
    empty: "No packages yet",
};

pub const BANNERS: CatalogCopy = CatalogCopy {
    heading: "Banners",
    description: "Home page banners, shown top to bottom by position.",
    noun: "banner",
    empty: "No banners yet",
};

/// Ordered list manager shared by every catalog collection.
pub fn catalog_manager<T: CatalogItem>(copy: CatalogCopy) -> impl IntoView {
    let vm = use_catalog_view_model::<T>();
    let len = Signal::derive(move || vm.items.with(Vec::len));
    let on_move = Callback::new(move |(index, direction): (usize, MoveDirection)| {
        vm.messages.update(|state| state.clear());
        vm.move_action.dispatch((index, direction));
    });
    let on_delete = Callback::new(move |id: String| vm.delete_action.dispatch(id));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if vm.busy.get_untracked() {
            return;
        }
        vm.add_action.dispatch(vm.new_title.get_untracked());
    };

    let row = move |(index, item): (usize, T)| {
        let id = item.id().to_string();
        let title = item.title().to_string();
        let active = item.is_active();
        let delete_target = PendingDelete::new(id.clone(), title.clone());
        view! {
            <li class="flex items-center justify-between gap-4 py-3">
                <div class="flex items-center gap-3">
                    <OrderControls index=index len=len busy=vm.busy on_move=on_move />
                    <div>
                        <p class="font-medium text-fg">
                            {title}
                            {(!active).then(|| view! {
                                <span class="ml-2 rounded bg-surface-muted px-2 py-0.5 text-xs text-fg-muted">"Hidden"</span>
                            })}
                        </p>
                        {item.summary().map(|summary| view! { <p class="text-sm text-fg-muted">{summary}</p> })}
                    </div>
                </div>
                <div class="flex items-center gap-2">
                    <span class="text-xs text-fg-muted">{format!("#{}", item.order())}</span>
                    <button
                        type="button"
                        class=GHOST
                        disabled=move || vm.busy.get()
                        on:click=move |_| vm.toggle_action.dispatch((id.clone(), !active))
                    >
                        {if active { "Hide" } else { "Show" }}
                    </button>
                    <button
                        type="button"
                        class=GHOST
                        on:click=move |_| vm.pending_delete.set(Some(delete_target.clone()))
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
                <h1 class="text-2xl font-bold text-fg">{copy.heading}</h1>
                <p class="mt-1 text-sm text-fg-muted">{copy.description}</p>
            </div>
            <MessageBanner messages=vm.messages />
            <InlineErrorMessage error=vm.load_error />
            <form class="flex gap-2" on:submit=on_submit>
                <input
                    type="text"
                    class=INPUT
                    placeholder=format!("New {} name", copy.noun)
                    prop:value=move || vm.new_title.get()
                    on:input=move |ev| vm.new_title.set(event_target_value(&ev))
                />
                <button type="submit" class=PRIMARY disabled=move || vm.busy.get()>
                    "Add"
                </button>
                <button
                    type="button"
                    class=GHOST
                    title="Rewrite order values as 0, 1, 2, ..."
                    disabled=move || vm.busy.get()
                    on:click=move |_| vm.renumber_action.dispatch(())
                >
                    "Renumber"
                </button>
            </form>
            {move || {
                if vm.items.with(Vec::is_empty) {
                    if vm.loading.get() {
                        view! { <LoadingSpinner /> }.into_view()
                    } else {
                        view! { <EmptyState title=copy.empty description="Add the first one above." /> }
                            .into_view()
                    }
                } else {
                    view! {
                        <ul class="divide-y divide-border bg-surface-elevated rounded-lg shadow px-4">
                            <For
                                each={move || vm.items.get().into_iter().enumerate().collect::<Vec<(usize, T)>>()}
                                key={|(index, item): &(usize, T)| {
                                    (*index, item.id().to_string(), item.order(), item.is_active())
                                }}
                                children=row
                            />
                        </ul>
                    }
                    .into_view()
                }
            }}
            <ConfirmDelete pending=vm.pending_delete on_delete=on_delete />
        </div>
    }
}

#[component]
pub fn ClassesPage() -> impl IntoView {
    catalog_manager::<GymClass>(CLASSES)
}

#[component]
pub fn ClubsPage() -> impl IntoView {
    catalog_manager::<Club>(CLUBS)
}

#[component]
pub fn PackagesPage() -> impl IntoView {
    catalog_manager::<Package>(PACKAGES)
}

#[component]
pub fn BannersPage() -> impl IntoView {
    catalog_manager::<SiteBanner>(BANNERS)
}
