use std::rc::Rc;

use leptos::*;

use super::{repository::ContentRepository, utils::PostForm};
use crate::{
    api::{ApiClient, ApiError, BlogPost},
    components::{
        confirm_dialog::{ConfirmDelete, PendingDelete},
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
        messages::{MessageBanner, MessageState},
    },
    utils::upload::{read_input_file, SelectedFile},
};

const FIELD: &str = "w-full rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

#[component]
pub fn ContentPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = ContentRepository::new_with_client(Rc::new(api));

    let form = create_rw_signal(PostForm::default());
    let messages = create_rw_signal(MessageState::default());
    let pending_delete = create_rw_signal(None::<PendingDelete>);
    let reload = create_rw_signal(0u32);

    let repo_for_resource = repository.clone();
    let posts = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.fetch_posts().await }
        },
    );

    let repo_for_upload = repository.clone();
    let upload_action = create_action(move |file: &SelectedFile| {
        let repo = repo_for_upload.clone();
        let file = file.clone();
        async move { repo.upload_cover(file).await }
    });

    let repo_for_create = repository.clone();
    let save_action = create_action(move |form: &PostForm| {
        let repo = repo_for_create.clone();
        let form = form.clone();
        async move { repo.create(&form).await }
    });

    let repo_for_publish = repository.clone();
    let publish_action = create_action(move |(post, publish): &(BlogPost, bool)| {
        let repo = repo_for_publish.clone();
        let (post, publish) = (post.clone(), *publish);
        async move { repo.set_published(&post, publish).await }
    });

    let repo_for_delete = repository;
    let delete_action = create_action(move |id: &String| {
        let repo = repo_for_delete.clone();
        let id = id.clone();
        async move { repo.delete(&id).await }
    });

    let bump = move || reload.update(|value| *value = value.wrapping_add(1));

    create_effect(move |_| {
        if let Some(result) = upload_action.value().get() {
            match result {
                Ok(url) => {
                    form.update(|f| f.cover_image_url = Some(url));
                    messages.update(|state| state.set_success("Cover image uploaded"));
                }
                Err(err) => messages.update(|state| state.fail(err)),
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            let ok = result.is_ok();
            messages.update(|state| state.report(&result, "Post saved"));
            if ok {
                form.update(PostForm::reset);
                bump();
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = publish_action.value().get() {
            let label = match &result {
                Ok(post) if post.is_published => format!("\"{}\" published", post.title),
                Ok(post) => format!("\"{}\" moved to drafts", post.title),
                Err(_) => String::new(),
            };
            messages.update(|state| state.report(&result, label));
            bump();
        }
    });
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            messages.update(|state| state.report(&result, "Post deleted"));
            bump();
        }
    });

    let on_cover = move |ev: ev::Event| {
        spawn_local(async move {
            match read_input_file(&ev).await {
                Ok(Some(file)) => upload_action.dispatch(file),
                Ok(None) => {}
                Err(err) => messages.update(|state| state.fail(err)),
            }
        });
    };
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !save_action.pending().get_untracked() {
            save_action.dispatch(form.get_untracked());
        }
    };
    let on_delete = Callback::new(move |id: String| delete_action.dispatch(id));

    let row = move |post: BlogPost| {
        let target = PendingDelete::new(post.id.clone(), post.title.clone());
        let published = post.is_published;
        let status = if published {
            post.published_date
                .map(|d| format!("Published {}", d.format("%Y-%m-%d")))
                .unwrap_or_else(|| "Published".to_string())
        } else {
            "Draft".to_string()
        };
        let toggle_post = post.clone();
        view! {
            <li class="flex items-center justify-between gap-4 py-3">
                <div class="flex items-center gap-3">
                    {post.cover_image_url.clone().map(|url| view! {
                        <img src=url alt="" class="h-12 w-16 rounded object-cover" />
                    })}
                    <div>
                        <p class="font-medium text-fg">{post.title.clone()}</p>
                        <p class="text-xs text-fg-muted">{format!("/{} · {}", post.slug, status)}</p>
                    </div>
                </div>
                <div class="flex gap-3 text-sm">
                    <button
                        type="button"
                        class="text-action-primary-bg hover:underline disabled:opacity-50"
                        disabled=move || publish_action.pending().get()
                        on:click=move |_| publish_action.dispatch((toggle_post.clone(), !published))
                    >
                        {if published { "Unpublish" } else { "Publish" }}
                    </button>
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
                <h1 class="text-2xl font-bold text-fg">"Blog & content"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Write posts for the public blog."</p>
            </div>
            <MessageBanner messages=messages />
            <form class="bg-surface-elevated shadow rounded-lg p-4 space-y-3" on:submit=on_submit>
                <input
                    class=FIELD
                    placeholder="Title"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
                <input
                    class=FIELD
                    placeholder=move || format!("Slug (default: {})", form.with(PostForm::effective_slug))
                    prop:value=move || form.with(|f| f.slug.clone())
                    on:input=move |ev| form.update(|f| f.slug = event_target_value(&ev))
                />
                <input
                    class=FIELD
                    placeholder="Excerpt"
                    prop:value=move || form.with(|f| f.excerpt.clone())
                    on:input=move |ev| form.update(|f| f.excerpt = event_target_value(&ev))
                />
                <textarea
                    class=FIELD
                    rows="8"
                    placeholder="Body"
                    prop:value=move || form.with(|f| f.body.clone())
                    on:input=move |ev| form.update(|f| f.body = event_target_value(&ev))
                ></textarea>
                <div class="flex flex-wrap items-center gap-4 text-sm text-fg">
                    <label class="flex items-center gap-2">
                        "Cover image"
                        <input type="file" accept="image/*" on:change=on_cover />
                    </label>
                    <Show when=move || upload_action.pending().get()>
                        <span class="text-fg-muted">"Uploading..."</span>
                    </Show>
                    {move || form.with(|f| f.cover_image_url.clone()).map(|url| view! {
                        <img src=url alt="Cover preview" class="h-12 w-16 rounded object-cover" />
                    })}
                    <label class="flex items-center gap-2">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.publish)
                            on:change=move |ev| form.update(|f| f.publish = event_target_checked(&ev))
                        />
                        "Publish now"
                    </label>
                    <button
                        type="submit"
                        class="ml-auto rounded-md px-4 py-2 font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || save_action.pending().get() || upload_action.pending().get()
                    >
                        "Save post"
                    </button>
                </div>
            </form>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || posts.get().map(|result: Result<Vec<BlogPost>, ApiError>| match result {
                    Err(err) => view! { <ErrorMessage message=err.error /> }.into_view(),
                    Ok(list) if list.is_empty() => view! { <EmptyState title="No posts yet" /> }.into_view(),
                    Ok(list) => view! {
                        <ul class="divide-y divide-border bg-surface-elevated rounded-lg shadow px-4">
                            {list.into_iter().map(row).collect_view()}
                        </ul>
                    }
                    .into_view(),
                })}
            </Suspense>
            <ConfirmDelete pending=pending_delete on_delete=on_delete />
        </div>
    }
}
