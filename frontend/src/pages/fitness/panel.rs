use leptos::*;

use super::{
    repository::generate_plan,
    utils::{parse_sex, sex_key, CalculatorInput, FitnessPlan, Goal},
};
use crate::{
    api::{ApiClient, ApiError},
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    utils::fitness::{ActivityLevel, Sex},
};

const FIELD: &str = "w-full rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg";

#[component]
fn NumberField(
    #[prop(into)] label: String,
    #[prop(into)] unit: String,
    value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="block text-sm text-fg space-y-1">
            <span>{label}</span>
            <div class="flex items-center gap-2">
                <input
                    type="number"
                    min="0"
                    step="any"
                    class=FIELD
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.call(event_target_value(&ev))
                />
                <span class="text-fg-muted">{unit}</span>
            </div>
        </label>
    }
}

fn text_field(
    input: RwSignal<CalculatorInput>,
    get: fn(&CalculatorInput) -> &String,
    set: fn(&mut CalculatorInput, String),
) -> (Signal<String>, Callback<String>) {
    (
        Signal::derive(move || input.with(|i| get(i).clone())),
        Callback::new(move |value: String| input.update(|i| set(i, value))),
    )
}

#[component]
fn PlanView(plan: FitnessPlan) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated rounded-lg shadow p-6 space-y-4">
            <div>
                <h2 class="text-xl font-semibold text-fg">"Your plan"</h2>
                <p class="text-sm text-fg-muted">{plan.summary}</p>
                <p class="mt-1 text-sm text-fg">{format!("Daily target: {} kcal", plan.daily_calories)}</p>
            </div>
            <ul class="space-y-2">
                {plan.workouts.into_iter().map(|w| view! {
                    <li class="text-sm">
                        <span class="font-medium text-fg">{format!("{}: {}", w.day, w.focus)}</span>
                        <span class="ml-2 text-fg-muted">{w.details}</span>
                    </li>
                }).collect_view()}
            </ul>
            {(!plan.nutrition_tips.is_empty()).then(|| view! {
                <ul class="list-disc list-inside text-sm text-fg-muted">
                    {plan.nutrition_tips.into_iter().map(|tip| view! { <li>{tip}</li> }).collect_view()}
                </ul>
            })}
        </div>
    }
}

#[component]
pub fn FitnessPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let input = create_rw_signal(CalculatorInput::default());
    let metrics = create_memo(move |_| input.with(CalculatorInput::metrics));
    let bmi = create_memo(move |_| input.with(CalculatorInput::bmi));

    let plan_action = create_action(move |snapshot: &CalculatorInput| {
        let api = api.clone();
        let snapshot = snapshot.clone();
        async move { generate_plan(&api, &snapshot).await }
    });
    let plan_error = Signal::derive(move || {
        plan_action
            .value()
            .get()
            .and_then(|result: Result<FitnessPlan, ApiError>| result.err())
    });

    let (weight, set_weight) = text_field(input, |i| &i.weight_kg, |i, v| i.weight_kg = v);
    let (height, set_height) = text_field(input, |i| &i.height_cm, |i, v| i.height_cm = v);
    let (age, set_age) = text_field(input, |i| &i.age, |i, v| i.age = v);

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-fg">"Fitness calculator"</h1>
                <p class="mt-1 text-fg-muted">
                    "Estimate your daily energy needs and get a personal training plan."
                </p>
            </div>
            <div class="grid gap-6 md:grid-cols-2">
                <div class="bg-surface-elevated rounded-lg shadow p-6 space-y-4">
                    <div class="flex gap-4 text-sm text-fg">
                        {[Sex::Female, Sex::Male].into_iter().map(|sex| view! {
                            <label class="flex items-center gap-2">
                                <input
                                    type="radio"
                                    name="sex"
                                    value=sex_key(sex)
                                    prop:checked=move || input.with(|i| i.sex == sex)
                                    on:change=move |ev| {
                                        if let Some(sex) = parse_sex(&event_target_value(&ev)) {
                                            input.update(|i| i.sex = sex);
                                        }
                                    }
                                />
                                {if sex == Sex::Female { "Female" } else { "Male" }}
                            </label>
                        }).collect_view()}
                    </div>
                    <NumberField label="Weight" unit="kg" value=weight on_input=set_weight />
                    <NumberField label="Height" unit="cm" value=height on_input=set_height />
                    <NumberField label="Age" unit="years" value=age on_input=set_age />
                    <label class="block text-sm text-fg space-y-1">
                        <span>"Activity level"</span>
                        <select
                            class=FIELD
                            prop:value=move || input.with(|i| i.activity.key())
                            on:change=move |ev| {
                                if let Some(level) = ActivityLevel::from_key(&event_target_value(&ev)) {
                                    input.update(|i| i.activity = level);
                                }
                            }
                        >
                            {ActivityLevel::ALL.into_iter().map(|level| view! {
                                <option value=level.key()>{level.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <label class="block text-sm text-fg space-y-1">
                        <span>"Goal"</span>
                        <select
                            class=FIELD
                            prop:value=move || input.with(|i| i.goal.key())
                            on:change=move |ev| {
                                if let Some(goal) = Goal::from_key(&event_target_value(&ev)) {
                                    input.update(|i| i.goal = goal);
                                }
                            }
                        >
                            {Goal::ALL.into_iter().map(|goal| view! {
                                <option value=goal.key()>{goal.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                </div>
                <div class="bg-surface-elevated rounded-lg shadow p-6 space-y-3">
                    <h2 class="text-xl font-semibold text-fg">"Results"</h2>
                    {move || match bmi.get() {
                        Some(bmi) => view! {
                            <p class="text-fg">
                                {format!("BMI {:.1} · {}", bmi.value, bmi.category.label())}
                            </p>
                        }
                        .into_view(),
                        None => view! {
                            <p class="text-sm text-fg-muted">"Enter your weight and height."</p>
                        }
                        .into_view(),
                    }}
                    {move || metrics.get().map(|m| view! {
                        <p class="text-fg">{format!("Basal metabolic rate: {} kcal/day", m.bmr)}</p>
                        <p class="text-fg">{format!("Daily energy need: {} kcal/day", m.tdee)}</p>
                    })}
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=move || metrics.get().is_none() || plan_action.pending().get()
                        on:click=move |_| plan_action.dispatch(input.get_untracked())
                    >
                        "Generate my plan"
                    </button>
                </div>
            </div>
            <InlineErrorMessage error=plan_error />
            <Show when=move || plan_action.pending().get()>
                <LoadingSpinner />
            </Show>
            {move || plan_action.value().get().and_then(Result::ok).map(|plan| view! { <PlanView plan=plan /> })}
        </div>
    }
}
