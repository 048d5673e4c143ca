use leptos::prelude::*;

/// CSS class for a status value. Review colors are reviewer-facing, so
/// non-admin viewers always get the plain badge.
pub fn status_class(status: &str, is_admin: bool) -> &'static str {
    if !is_admin {
        return "status-badge";
    }
    match status {
        "accepted" => "status-badge status-accepted",
        "rejected" => "status-badge status-rejected",
        _ => "status-badge",
    }
}

#[component]
pub fn StatusBadge(
    /// The server-owned status value, e.g. "pending"
    #[prop(into)]
    status: String,
    /// Whether the viewer gets review coloring
    is_admin: bool,
) -> impl IntoView {
    let class = status_class(&status, is_admin);
    view! { <span class=class>{status}</span> }
}

#[cfg(test)]
mod tests {
    use super::status_class;

    #[test]
    fn admin_sees_review_colors() {
        assert_eq!(status_class("accepted", true), "status-badge status-accepted");
        assert_eq!(status_class("rejected", true), "status-badge status-rejected");
    }

    #[test]
    fn pending_is_never_colored() {
        assert_eq!(status_class("pending", true), "status-badge");
        assert_eq!(status_class("pending", false), "status-badge");
    }

    #[test]
    fn non_admin_never_sees_review_colors() {
        assert_eq!(status_class("accepted", false), "status-badge");
        assert_eq!(status_class("rejected", false), "status-badge");
    }
}
