use crate::format::escape_html;
use crate::render::card::{render_opportunities, render_opportunities_title};
use crate::render::detail::render_modal;
use crate::render::reports::{render_report_list, render_report_search, render_week_select};
use crate::render::routes;
use crate::render::tiles::render_tiles;
use crate::view::notify::Toast;
use crate::view::session::Session;

/// Renders the whole dashboard document for the current session state.
pub fn render_page(session: &Session, overlay_visible: bool) -> String {
    let theme = session.theme;
    let overlay_class = if overlay_visible {
        "loading-overlay active"
    } else {
        "loading-overlay"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Winner Engine</title>
</head>
<body>
    <header class="app-header">
        <h1>Winner Engine</h1>
        <div class="header-actions">
            <form method="post" action="{refresh}">
                <button id="refresh-btn-header" type="submit"><i class="fas fa-sync-alt"></i> Refresh</button>
            </form>
            <form method="post" action="{toggle_theme}">
                <button id="theme-toggle" type="submit" aria-label="Toggle theme"><i class="fas {theme_icon}"></i></button>
            </form>
        </div>
    </header>
    {tiles}
    <div class="main-layout">
        <aside class="sidebar">
            <h2>Reports</h2>
            {search}
            <div id="reports-list">
                {reports}
            </div>
        </aside>
        <main class="content">
            <div class="content-header">
                {title}
                {week_select}
            </div>
            <div id="opportunities-container">
                {opportunities}
            </div>
        </main>
    </div>
    {modal}
    <div id="loading-overlay" class="{overlay_class}"><div class="spinner"></div></div>
    <div id="toast-container">{toasts}</div>
</body>
</html>"#,
        theme = theme.as_str(),
        theme_icon = theme.toggle_icon(),
        refresh = routes::REFRESH,
        toggle_theme = routes::TOGGLE_THEME,
        tiles = render_tiles(&session.tiles),
        search = render_report_search(session),
        reports = render_report_list(session),
        title = render_opportunities_title(session),
        week_select = render_week_select(session),
        opportunities = render_opportunities(session),
        modal = session.modal.as_ref().map(render_modal).unwrap_or_default(),
        toasts = render_toasts(session.notifier.toasts()),
    )
}

pub fn render_toasts(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|toast| {
            format!(
                r#"<div class="toast {kind}" data-toast-id="{id}"><i class="fas {icon}"></i> <span>{message}</span></div>"#,
                kind = toast.kind.as_str(),
                id = toast.id,
                icon = toast.kind.icon(),
                message = escape_html(&toast.message),
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::notify::ToastKind;
    use crate::view::theme::Theme;

    #[test]
    fn page_carries_theme_and_overlay_state() {
        let session = Session {
            theme: Theme::Dark,
            ..Session::default()
        };
        let html = render_page(&session, true);
        assert!(html.contains(r#"<html lang="en" data-theme="dark">"#));
        assert!(html.contains("fa-sun"));
        assert!(html.contains(r#"class="loading-overlay active""#));
        assert!(html.contains("Select a week to view opportunities"));

        let idle = render_page(&Session::default(), false);
        assert!(idle.contains(r#"data-theme="light""#));
        assert!(idle.contains(r#"class="loading-overlay""#));
    }

    #[test]
    fn toast_messages_are_escaped() {
        let mut session = Session::default();
        session
            .notifier
            .push(ToastKind::Error, "Error loading entity details: <script>x</script>");

        let html = render_page(&session, false);
        assert!(html.contains("toast error"));
        assert!(html.contains("Error loading entity details: &lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x"));
    }
}
