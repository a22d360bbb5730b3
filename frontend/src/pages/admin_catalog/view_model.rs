use std::rc::Rc;

use leptos::*;

use super::{repository::CatalogRepository, utils::CatalogItem};
use crate::{
    api::{ApiClient, ApiError},
    components::{confirm_dialog::PendingDelete, messages::MessageState},
    utils::ordering::MoveDirection,
};

type MoveResult<T> = Option<Result<Vec<T>, ApiError>>;

pub struct CatalogViewModel<T: 'static> {
    pub items: RwSignal<Vec<T>>,
    pub load_error: RwSignal<Option<ApiError>>,
    pub loading: Signal<bool>,
    pub busy: Signal<bool>,
    pub messages: RwSignal<MessageState>,
    pub new_title: RwSignal<String>,
    pub pending_delete: RwSignal<Option<PendingDelete>>,
    pub move_action: Action<(usize, MoveDirection), MoveResult<T>>,
    pub renumber_action: Action<(), Result<(Vec<T>, usize), ApiError>>,
    pub add_action: Action<String, Result<T, ApiError>>,
    pub toggle_action: Action<(String, bool), Result<T, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
}

impl<T: 'static> Clone for CatalogViewModel<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for CatalogViewModel<T> {}

pub fn use_catalog_view_model<T: CatalogItem>() -> CatalogViewModel<T> {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = CatalogRepository::<T>::new_with_client(Rc::new(api));

    let items = create_rw_signal(Vec::<T>::new());
    let load_error = create_rw_signal(None::<ApiError>);
    let messages = create_rw_signal(MessageState::default());
    let new_title = create_rw_signal(String::new());
    let pending_delete = create_rw_signal(None::<PendingDelete>);
    let reload = create_rw_signal(0u32);
    let bump = move || reload.update(|value| *value = value.wrapping_add(1));

    let repo_for_resource = repository.clone();
    let items_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.fetch_sorted().await }
        },
    );
    let loading: Signal<bool> = items_resource.loading().into();

    let repo_for_move = repository.clone();
    let move_action = create_action(move |&(index, direction): &(usize, MoveDirection)| {
        let repo = repo_for_move.clone();
        let snapshot = items.get_untracked();
        async move { repo.move_item(&snapshot, index, direction).await }
    });

    let repo_for_renumber = repository.clone();
    let renumber_action = create_action(move |_: &()| {
        let repo = repo_for_renumber.clone();
        let snapshot = items.get_untracked();
        async move { repo.renumber(&snapshot).await }
    });

    let repo_for_add = repository.clone();
    let add_action = create_action(move |title: &String| {
        let repo = repo_for_add.clone();
        let title = title.clone();
        let snapshot = items.get_untracked();
        async move { repo.quick_add(&title, &snapshot).await }
    });

    let repo_for_toggle = repository.clone();
    let toggle_action = create_action(move |(id, active): &(String, bool)| {
        let repo = repo_for_toggle.clone();
        let (id, active) = (id.clone(), *active);
        async move { repo.set_active(&id, active).await }
    });

    let repo_for_delete = repository;
    let delete_action = create_action(move |id: &String| {
        let repo = repo_for_delete.clone();
        let id = id.clone();
        async move { repo.delete(&id).await }
    });

    let busy = Signal::derive(move || {
        move_action.pending().get()
            || renumber_action.pending().get()
            || add_action.pending().get()
            || toggle_action.pending().get()
            || delete_action.pending().get()
    });

    create_effect(move |_| {
        if let Some(result) = items_resource.get() {
            match result {
                Ok(list) => {
                    load_error.set(None);
                    items.set(list);
                }
                Err(err) => {
                    log::error!("failed to load {}: {}", T::NAME, err);
                    load_error.set(Some(err));
                }
            }
        }
    });

    create_effect(move |_| match move_action.value().get() {
        Some(Some(Ok(list))) => {
            items.set(list);
            messages.update(|state| state.set_success("Order updated"));
        }
        Some(Some(Err(err))) => {
            messages.update(|state| state.fail(err));
            bump();
        }
        _ => {}
    });

    create_effect(move |_| {
        if let Some(result) = renumber_action.value().get() {
            match result {
                Ok((list, 0)) => {
                    items.set(list);
                    messages.update(|state| state.set_success("Order is already contiguous"));
                }
                Ok((list, changed)) => {
                    items.set(list);
                    messages.update(|state| {
                        state.set_success(format!("Renumbered {} records", changed))
                    });
                }
                Err(err) => {
                    messages.update(|state| state.fail(err));
                    bump();
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = add_action.value().get() {
            let label = result
                .as_ref()
                .map(|item| format!("Added \"{}\"", item.title()))
                .unwrap_or_default();
            let ok = result.is_ok();
            messages.update(|state| state.report(&result, label));
            if ok {
                new_title.set(String::new());
                bump();
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = toggle_action.value().get() {
            let label = result
                .as_ref()
                .map(|item| {
                    let state = if item.is_active() { "shown" } else { "hidden" };
                    format!("\"{}\" is now {}", item.title(), state)
                })
                .unwrap_or_default();
            messages.update(|state| state.report(&result, label));
            bump();
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            messages.update(|state| state.report(&result, "Deleted"));
            bump();
        }
    });

    CatalogViewModel {
        items,
        load_error,
        loading,
        busy,
        messages,
        new_title,
        pending_delete,
        move_action,
        renumber_action,
        add_action,
        toggle_action,
        delete_action,
    }
}
