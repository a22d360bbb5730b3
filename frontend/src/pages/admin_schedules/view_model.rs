use std::rc::Rc;

use leptos::*;

use super::{
    repository::SchedulesRepository,
    utils::{ScheduleForm, ScheduleLookups},
};
use crate::{
    api::{ApiClient, ApiError, ClassSchedule},
    components::{confirm_dialog::PendingDelete, messages::MessageState},
    utils::filters::filter_schedules,
};

#[derive(Clone, Copy)]
pub struct SchedulesViewModel {
    pub form: RwSignal<ScheduleForm>,
    pub messages: RwSignal<MessageState>,
    pub club_filter: RwSignal<Option<String>>,
    pub day_filter: RwSignal<Option<u8>>,
    pub pending_delete: RwSignal<Option<PendingDelete>>,
    pub schedules_resource: Resource<u32, Result<Vec<ClassSchedule>, ApiError>>,
    pub lookups_resource: Resource<(), Result<ScheduleLookups, ApiError>>,
    pub visible: Memo<Vec<ClassSchedule>>,
    pub save_action: Action<ScheduleForm, Result<ClassSchedule, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
}

impl SchedulesViewModel {
    pub fn lookups(&self) -> ScheduleLookups {
        self.lookups_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    }
}

pub fn use_schedules_view_model() -> SchedulesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = SchedulesRepository::new_with_client(Rc::new(api));

    let form = create_rw_signal(ScheduleForm::default());
    let messages = create_rw_signal(MessageState::default());
    let club_filter = create_rw_signal(None::<String>);
    let day_filter = create_rw_signal(None::<u8>);
    let pending_delete = create_rw_signal(None::<PendingDelete>);
    let reload = create_rw_signal(0u32);

    let repo_for_resource = repository.clone();
    let schedules_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.fetch_schedules().await }
        },
    );

    let repo_for_lookups = repository.clone();
    let lookups_resource = create_resource(
        || (),
        move |_| {
            let repo = repo_for_lookups.clone();
            async move { repo.fetch_lookups().await }
        },
    );

    let visible = create_memo(move |_| {
        let all = schedules_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default();
        filter_schedules(&all, club_filter.get().as_deref(), day_filter.get())
    });

    let repo_for_create = repository.clone();
    let save_action = create_action(move |form: &ScheduleForm| {
        let repo = repo_for_create.clone();
        let form = form.clone();
        async move { repo.create(&form).await }
    });

    let repo_for_delete = repository;
    let delete_action = create_action(move |id: &String| {
        let repo = repo_for_delete.clone();
        let id = id.clone();
        async move { repo.delete(&id).await }
    });

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            let ok = result.is_ok();
            messages.update(|state| state.report(&result, "Schedule added"));
            if ok {
                form.update(ScheduleForm::reset);
                reload.update(|value| *value = value.wrapping_add(1));
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            messages.update(|state| state.report(&result, "Schedule removed"));
            reload.update(|value| *value = value.wrapping_add(1));
        }
    });

    SchedulesViewModel {
        form,
        messages,
        club_filter,
        day_filter,
        pending_delete,
        schedules_resource,
        lookups_resource,
        visible,
        save_action,
        delete_action,
    }
}
