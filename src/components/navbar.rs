use leptos::prelude::*;

use crate::session::use_session;

/// Top navigation bar. Links only appear for a signed-in session, and the
/// create link only for non-admins. Logout clears the session; the
/// route guard then sends the browser back to the login route.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();

    view! {
        <nav class="navbar">
            <span class="navbar-brand">"Storydesk"</span>
            <Show when=move || session.is_logged_in()>
                <ul class="nav-list">
                    <li class="nav-item">
                        <a href="/stories" class="nav-link">"Stories"</a>
                    </li>
                    <Show when=move || !session.is_admin()>
                        <li class="nav-item">
                            <a href="/story-create" class="nav-link">"New Story"</a>
                        </li>
                    </Show>
                </ul>
                <div class="navbar-session">
                    <span class="navbar-identity">
                        {move || session.identity().unwrap_or_default()}
                    </span>
                    <button class="btn btn-secondary" on:click=move |_| session.logout()>
                        "Logout"
                    </button>
                </div>
            </Show>
        </nav>
    }
}
