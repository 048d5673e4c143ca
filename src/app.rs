use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::navbar::Navbar;
use crate::pages::login::LoginPage;
use crate::pages::stories::StoriesPage;
use crate::pages::story_create::StoryCreatePage;
use crate::pages::story_review::StoryReviewPage;
use crate::session::{use_session, SessionContext, SessionStore};

/// Where the guard sends a navigation instead, if anywhere. Logged-out
/// traffic goes to the login route; admins are kept out of the create form
/// (admins review, non-admins create).
fn guard_redirect(path: &str, logged_in: bool, is_admin: bool) -> Option<&'static str> {
    if !logged_in && path != "/" {
        return Some("/");
    }
    if path == "/story-create" && is_admin {
        return Some("/stories");
    }
    None
}

/// Runs the guard checks for `route` synchronously at render time, before
/// the wrapped page is constructed; a redirect replaces the page entirely.
/// Tracks the session, so logout on a guarded page also lands back on the
/// login route.
#[component]
fn Guarded(route: &'static str, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    move || match guard_redirect(route, session.is_logged_in(), session.is_admin()) {
        Some(target) => view! { <Redirect path=target /> }.into_any(),
        None => children().into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session = SessionContext::new(SessionStore::browser());
    provide_context(session);

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! {
                        <Guarded route="/404">
                            <h2>"404 - Page not found"</h2>
                        </Guarded>
                    }>
                        <Route path=path!("/") view=|| view! {
                            <Guarded route="/"><LoginPage /></Guarded>
                        } />
                        <Route path=path!("/story-create") view=|| view! {
                            <Guarded route="/story-create"><StoryCreatePage /></Guarded>
                        } />
                        <Route path=path!("/stories") view=|| view! {
                            <Guarded route="/stories"><StoriesPage /></Guarded>
                        } />
                        <Route path=path!("/story/:id") view=|| view! {
                            <Guarded route="/story/:id"><StoryReviewPage /></Guarded>
                        } />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::guard_redirect;
    use crate::session::{MemoryStorage, SessionStore, SessionUser};

    #[test]
    fn logged_out_navigation_redirects_to_login() {
        for path in ["/stories", "/story-create", "/story/42", "/nowhere"] {
            assert_eq!(guard_redirect(path, false, false), Some("/"), "{path}");
        }
    }

    #[test]
    fn login_route_is_reachable_while_logged_out() {
        assert_eq!(guard_redirect("/", false, false), None);
    }

    #[test]
    fn admin_is_kept_out_of_the_create_form() {
        assert_eq!(guard_redirect("/story-create", true, true), Some("/stories"));
    }

    #[test]
    fn non_admin_reaches_the_create_form() {
        assert_eq!(guard_redirect("/story-create", true, false), None);
    }

    #[test]
    fn logged_in_navigation_passes_through() {
        assert_eq!(guard_redirect("/stories", true, false), None);
        assert_eq!(guard_redirect("/stories", true, true), None);
        assert_eq!(guard_redirect("/story/7", true, true), None);
    }

    // The render-time check needs nothing beyond persisted state, so a
    // deep link is decided before any page logic can run.
    #[test]
    fn guard_decides_from_persisted_state_alone() {
        let store = SessionStore::with_backend(Arc::new(MemoryStorage::default()));
        assert_eq!(
            guard_redirect("/stories", store.is_logged_in(), store.is_admin()),
            Some("/")
        );

        store.save(&SessionUser {
            identity: "lead@example.com".to_string(),
            role: "Admin".to_string(),
            token: "tok-1".to_string(),
        });
        assert_eq!(
            guard_redirect("/stories", store.is_logged_in(), store.is_admin()),
            None
        );
        assert_eq!(
            guard_redirect("/story-create", store.is_logged_in(), store.is_admin()),
            Some("/stories")
        );
    }
}
