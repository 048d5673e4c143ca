pub mod navbar;
pub mod status_badge;
