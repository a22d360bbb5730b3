use leptos::*;

use crate::utils::ordering::{target_index, MoveDirection};

const BUTTON: &str = "px-2 py-1 rounded border border-border text-sm text-fg hover:bg-surface-muted disabled:opacity-40 disabled:cursor-not-allowed";

/// Up/down buttons for one row of an ordered list. Buttons that would move
/// the row out of bounds are disabled.
#[component]
pub fn OrderControls(
    index: usize,
    #[prop(into)] len: Signal<usize>,
    #[prop(into)] busy: Signal<bool>,
    on_move: Callback<(usize, MoveDirection)>,
) -> impl IntoView {
    let blocked = move |direction| busy.get() || target_index(len.get(), index, direction).is_none();
    view! {
        <div class="flex gap-1">
            <button
                type="button"
                class=BUTTON
                aria-label="Move up"
                disabled=move || blocked(MoveDirection::Up)
                on:click=move |_| on_move.call((index, MoveDirection::Up))
            >
                "↑"
            </button>
            <button
                type="button"
                class=BUTTON
                aria-label="Move down"
                disabled=move || blocked(MoveDirection::Down)
                on:click=move |_| on_move.call((index, MoveDirection::Down))
            >
                "↓"
            </button>
        </div>
    }
}
