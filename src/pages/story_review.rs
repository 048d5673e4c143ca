use gloo::console;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ReviewDecision, Story};
use crate::components::status_badge::StatusBadge;
use crate::pages::GENERIC_ERROR;
use crate::session::use_session;

#[component]
pub fn StoryReviewPage() -> impl IntoView {
    let session = use_session();
    let navigate = StoredValue::new_local(use_navigate());
    let params = use_params_map();

    let (story, set_story) = signal::<Option<Story>>(None);
    let (is_loading, set_is_loading) = signal(true);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    // Review is admin-only; everyone else goes back to the list. The fetch
    // re-runs when the :id segment changes.
    Effect::new(move |_| {
        if !session.is_admin() {
            navigate.with_value(|nav| nav("/stories", Default::default()));
            return;
        }
        let id: Option<u64> = params.read().get("id").and_then(|raw| raw.parse().ok());
        let Some(id) = id else {
            set_error_message.set(Some(GENERIC_ERROR.to_string()));
            set_is_loading.set(false);
            return;
        };
        spawn_local(async move {
            match api::story_by_id(&session.store(), id).await {
                Ok(fetched) => {
                    set_story.set(Some(fetched));
                    set_error_message.set(None);
                }
                Err(err) => {
                    console::error!(format!("story fetch failed: {err}"));
                    set_error_message.set(Some(GENERIC_ERROR.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    });

    let review = move |decision: ReviewDecision| {
        let Some(id) = story.get().map(|s| s.id) else {
            return;
        };
        set_error_message.set(None);
        spawn_local(async move {
            match api::review_story(&session.store(), id, decision).await {
                Ok(()) => navigate.with_value(|nav| nav("/stories", Default::default())),
                Err(err) => {
                    console::error!(format!("story review failed: {err}"));
                    set_error_message.set(Some(GENERIC_ERROR.to_string()));
                }
            }
        });
    };

    view! {
        <div class="page story-review-page">
            <h2>"Review Story"</h2>

            <Show when=move || is_loading.get()>
                <p class="loading-text">"Loading story..."</p>
            </Show>

            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            {move || {
                story.get().map(|story| {
                    view! {
                        <section class="story-card">
                            <div class="story-card-header">
                                <h3>{story.summary.clone()}</h3>
                                <StatusBadge status=story.status.clone() is_admin=true />
                            </div>
                            <p class="story-description">{story.description.clone()}</p>
                            <dl class="story-facts">
                                <dt>"Type"</dt>
                                <dd>{story.story_type.clone()}</dd>
                                <dt>"Complexity"</dt>
                                <dd>{story.complexity.clone()}</dd>
                                <dt>"Estimated Hours"</dt>
                                <dd>{story.estimated_hours}</dd>
                                <dt>"Cost"</dt>
                                <dd>{story.cost}</dd>
                            </dl>
                            <div class="review-actions">
                                <button
                                    class="btn btn-accept"
                                    on:click=move |_| review(ReviewDecision::Accepted)
                                >
                                    "Accept"
                                </button>
                                <button
                                    class="btn btn-reject"
                                    on:click=move |_| review(ReviewDecision::Rejected)
                                >
                                    "Reject"
                                </button>
                            </div>
                        </section>
                    }
                })
            }}
        </div>
    }
}
