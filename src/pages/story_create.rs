use gloo::console;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, StoryDraft, COMPLEXITY_LEVELS, STORY_TYPES};
use crate::pages::GENERIC_ERROR;
use crate::session::use_session;

#[component]
pub fn StoryCreatePage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (summary, set_summary) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (estimated_hours, set_estimated_hours) = signal(String::new());
    let (cost, set_cost) = signal(String::new());
    let (story_type, set_story_type) = signal(String::new());
    let (complexity, set_complexity) = signal(String::new());
    let (error_message, set_error_message) = signal::<Option<String>>(None);
    let (is_submitting, set_is_submitting) = signal(false);

    let submit = move |_| {
        let navigate = navigate.clone();
        let draft = StoryDraft {
            summary: summary.get(),
            description: description.get(),
            estimated_hours: estimated_hours.get().parse().unwrap_or(0.0),
            cost: cost.get().parse().unwrap_or(0.0),
            story_type: story_type.get(),
            complexity: complexity.get(),
        };

        set_is_submitting.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match api::create_story(&session.store(), &draft).await {
                Ok(()) => navigate("/stories", Default::default()),
                Err(err) => {
                    console::error!(format!("story create failed: {err}"));
                    set_error_message.set(Some(GENERIC_ERROR.to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="page story-create-page">
            <h2>"New Story"</h2>

            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            <div class="form-group">
                <label for="story-summary">"Summary"</label>
                <input
                    id="story-summary"
                    type="text"
                    class="input"
                    placeholder="One line describing the work"
                    prop:value=move || summary.get()
                    on:input=move |ev| set_summary.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="story-description">"Description"</label>
                <textarea
                    id="story-description"
                    class="input"
                    rows="4"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label for="story-hours">"Estimated Hours"</label>
                    <input
                        id="story-hours"
                        type="number"
                        class="input"
                        min="0"
                        prop:value=move || estimated_hours.get()
                        on:input=move |ev| set_estimated_hours.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="story-cost">"Cost"</label>
                    <input
                        id="story-cost"
                        type="number"
                        class="input"
                        min="0"
                        prop:value=move || cost.get()
                        on:input=move |ev| set_cost.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label for="story-type">"Type"</label>
                    <select
                        id="story-type"
                        class="input"
                        on:change=move |ev| set_story_type.set(event_target_value(&ev))
                    >
                        <option value="" selected disabled>"Select type"</option>
                        {STORY_TYPES
                            .iter()
                            .map(|t| view! { <option value=*t>{*t}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="story-complexity">"Complexity"</label>
                    <select
                        id="story-complexity"
                        class="input"
                        on:change=move |ev| set_complexity.set(event_target_value(&ev))
                    >
                        <option value="" selected disabled>"Select complexity"</option>
                        {COMPLEXITY_LEVELS
                            .iter()
                            .map(|c| view! { <option value=*c>{*c}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <button
                class="btn btn-primary"
                on:click=submit
                disabled=move || {
                    is_submitting.get()
                        || summary.get().is_empty()
                        || story_type.get().is_empty()
                        || complexity.get().is_empty()
                }
            >
                {move || if is_submitting.get() { "Submitting..." } else { "Create Story" }}
            </button>
        </div>
    }
}
