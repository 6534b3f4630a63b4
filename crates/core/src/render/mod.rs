//! HTML rendering of the dashboard view state.
//!
//! Every function is a pure mapping from state to markup. Text that comes from the
//! backend goes through [`crate::format::escape_html`] before it is interpolated.

pub mod card;
pub mod detail;
pub mod page;
pub mod reports;
pub mod tiles;

/// Form endpoints the rendered markup posts to. A surface serving the page routes these
/// to [`crate::view::Action`]s.
pub mod routes {
    pub const REFRESH: &str = "/actions/refresh";
    pub const SELECT_WEEK: &str = "/actions/week";
    pub const CLOSE_MODAL: &str = "/actions/modal/close";
    pub const TOGGLE_THEME: &str = "/actions/theme";
    pub const SEARCH_REPORTS: &str = "/actions/search";

    pub fn show_entity(entity_id: &str) -> String {
        format!("/actions/entity/{}", urlencoding::encode(entity_id))
    }

    pub fn toggle_card(entity_id: &str) -> String {
        format!("/actions/card/{}/toggle", urlencoding::encode(entity_id))
    }
}

pub(crate) fn empty_state(icon: &str, title: &str, message: &str) -> String {
    format!(
        r#"<div class="empty-state">
    <div class="empty-icon"><i class="fas {icon}"></i></div>
    <h3>{title}</h3>
    <p>{message}</p>
</div>"#
    )
}

pub(crate) fn loading_state(message: &str) -> String {
    format!(r#"<div class="loading-state"><div class="spinner"></div><p>{message}</p></div>"#)
}
