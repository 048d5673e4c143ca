pub mod login;
pub mod stories;
pub mod story_create;
pub mod story_review;

/// Shown for any request failure a page handles itself; the page's form
/// state stays intact for retry.
pub(crate) const GENERIC_ERROR: &str = "Oops! Something went wrong, please try again later.";
