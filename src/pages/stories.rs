use std::cmp::Ordering;

use gloo::console;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, Story, STORY_TYPES};
use crate::components::status_badge::status_class;
use crate::pages::GENERIC_ERROR;
use crate::session::use_session;

/// Sortable list columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Summary,
    Type,
    Complexity,
    EstimatedHours,
    Cost,
    Status,
}

/// Client-side ordering state; reset whenever the page is reinstantiated,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub descending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Id,
            descending: false,
        }
    }
}

impl SortState {
    /// Repeated clicks on the active column flip the direction; a new
    /// column always starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.descending = !self.descending;
        } else {
            self.column = column;
            self.descending = false;
        }
    }
}

fn compare(a: &Story, b: &Story, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Summary => a.summary.cmp(&b.summary),
        SortColumn::Type => a.story_type.cmp(&b.story_type),
        SortColumn::Complexity => a.complexity.cmp(&b.complexity),
        SortColumn::EstimatedHours => a
            .estimated_hours
            .partial_cmp(&b.estimated_hours)
            .unwrap_or(Ordering::Equal),
        SortColumn::Cost => a.cost.partial_cmp(&b.cost).unwrap_or(Ordering::Equal),
        SortColumn::Status => a.status.cmp(&b.status),
    }
}

/// Filter and order the fetched set entirely in the view layer; no query
/// parameters are sent to the server.
pub fn visible_stories(stories: &[Story], type_filter: &str, sort: SortState) -> Vec<Story> {
    let mut rows: Vec<Story> = stories
        .iter()
        .filter(|story| type_filter.is_empty() || story.story_type == type_filter)
        .cloned()
        .collect();
    rows.sort_by(|a, b| compare(a, b, sort.column));
    if sort.descending {
        rows.reverse();
    }
    rows
}

#[component]
pub fn StoriesPage() -> impl IntoView {
    let session = use_session();
    let navigate = StoredValue::new_local(use_navigate());

    let (stories, set_stories) = signal::<Vec<Story>>(vec![]);
    let (is_loading, set_is_loading) = signal(true);
    let (list_error, set_list_error) = signal::<Option<String>>(None);
    let (sort, set_sort) = signal(SortState::default());
    let (type_filter, set_type_filter) = signal(String::new());

    // Fetch on mount; every navigation here re-fetches, nothing is cached.
    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_stories(&session.store()).await {
                Ok(list) => {
                    set_stories.set(list);
                    set_list_error.set(None);
                }
                Err(err) => {
                    console::error!(format!("story list failed: {err}"));
                    set_list_error.set(Some(GENERIC_ERROR.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    });

    let change_sort = move |column: SortColumn| set_sort.update(|state| state.toggle(column));
    let sort_marker = move |column: SortColumn| {
        let state = sort.get();
        if state.column != column {
            ""
        } else if state.descending {
            " \u{25bc}"
        } else {
            " \u{25b2}"
        }
    };

    let header = move |label: &'static str, column: SortColumn| {
        view! {
            <th class="sortable" on:click=move |_| change_sort(column)>
                {label}
                {move || sort_marker(column)}
            </th>
        }
    };

    view! {
        <div class="page stories-page">
            <div class="stories-header">
                <h2>"Stories"</h2>
                <select
                    class="input type-filter"
                    on:change=move |ev| set_type_filter.set(event_target_value(&ev))
                >
                    <option value="">"All types"</option>
                    {STORY_TYPES
                        .iter()
                        .map(|t| view! { <option value=*t>{*t}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || is_loading.get()>
                <p class="loading-text">"Loading stories..."</p>
            </Show>

            <Show when=move || list_error.get().is_some()>
                <div class="error-message">
                    {move || list_error.get().unwrap_or_default()}
                </div>
            </Show>

            <Show when=move || !is_loading.get() && list_error.get().is_none()>
                <table class="story-table">
                    <thead>
                        <tr>
                            {header("Id", SortColumn::Id)}
                            {header("Summary", SortColumn::Summary)}
                            {header("Type", SortColumn::Type)}
                            {header("Complexity", SortColumn::Complexity)}
                            {header("Est. Hours", SortColumn::EstimatedHours)}
                            {header("Cost", SortColumn::Cost)}
                            {header("Status", SortColumn::Status)}
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || {
                                visible_stories(&stories.get(), &type_filter.get(), sort.get())
                            }
                            key=|story| story.id
                            children=move |story| {
                                let admin = session.is_admin();
                                let id = story.id;
                                view! {
                                    <tr
                                        class="story-row"
                                        class:clickable=admin
                                        on:click=move |_| {
                                            if admin {
                                                navigate.with_value(|nav| {
                                                    nav(
                                                        &format!("/story/{id}"),
                                                        Default::default(),
                                                    )
                                                });
                                            }
                                        }
                                    >
                                        <td>{story.id}</td>
                                        <td>{story.summary.clone()}</td>
                                        <td>{story.story_type.clone()}</td>
                                        <td>{story.complexity.clone()}</td>
                                        <td>{story.estimated_hours}</td>
                                        <td>{story.cost}</td>
                                        <td class=status_class(&story.status, admin)>
                                            {story.status.clone()}
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <Show when=move || stories.get().is_empty()>
                    <p class="empty-text">"No stories yet."</p>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: u64, summary: &str, story_type: &str, cost: f64) -> Story {
        Story {
            id,
            summary: summary.to_string(),
            description: String::new(),
            estimated_hours: 8.0,
            cost,
            story_type: story_type.to_string(),
            complexity: "mid".to_string(),
            status: "pending".to_string(),
        }
    }

    fn sample() -> Vec<Story> {
        vec![
            story(2, "Retry uploads", "bugfix", 400.0),
            story(1, "Add export", "enhancement", 250.0),
            story(3, "Smoke tests", "QA", 100.0),
        ]
    }

    #[test]
    fn same_column_click_flips_direction() {
        let mut state = SortState::default();
        state.toggle(SortColumn::Id);
        assert!(state.descending);
        state.toggle(SortColumn::Id);
        assert!(!state.descending);
    }

    #[test]
    fn new_column_click_resets_to_ascending() {
        let mut state = SortState::default();
        state.toggle(SortColumn::Id);
        assert!(state.descending);
        state.toggle(SortColumn::Cost);
        assert_eq!(state.column, SortColumn::Cost);
        assert!(!state.descending);
    }

    #[test]
    fn default_order_is_id_ascending() {
        let rows = visible_stories(&sample(), "", SortState::default());
        let ids: Vec<u64> = rows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn sorts_by_cost_in_both_directions() {
        let mut sort = SortState {
            column: SortColumn::Cost,
            descending: false,
        };
        let rows = visible_stories(&sample(), "", sort);
        let costs: Vec<f64> = rows.iter().map(|s| s.cost).collect();
        assert_eq!(costs, vec![100.0, 250.0, 400.0]);

        sort.descending = true;
        let rows = visible_stories(&sample(), "", sort);
        let costs: Vec<f64> = rows.iter().map(|s| s.cost).collect();
        assert_eq!(costs, vec![400.0, 250.0, 100.0]);
    }

    #[test]
    fn sorts_by_summary_alphabetically() {
        let sort = SortState {
            column: SortColumn::Summary,
            descending: false,
        };
        let rows = visible_stories(&sample(), "", sort);
        let summaries: Vec<&str> = rows.iter().map(|s| s.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Add export", "Retry uploads", "Smoke tests"]);
    }

    #[test]
    fn type_filter_keeps_matching_rows_only() {
        let rows = visible_stories(&sample(), "bugfix", SortState::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let rows = visible_stories(&sample(), "", SortState::default());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn filter_with_no_matches_yields_empty() {
        let rows = visible_stories(&sample(), "development", SortState::default());
        assert!(rows.is_empty());
    }
}
