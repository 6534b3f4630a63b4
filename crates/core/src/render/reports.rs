use crate::format::escape_html;
use crate::render::{empty_state, loading_state, routes};
use crate::view::session::{ReportsView, Session};

/// Sidebar list of weekly reports, in API order.
pub fn render_report_list(session: &Session) -> String {
    match session.reports_view {
        ReportsView::Loading => loading_state("Loading reports..."),
        ReportsView::Failed => empty_state("fa-exclamation-triangle", "Reports", "Error loading reports"),
        ReportsView::Loaded if session.reports.is_empty() => {
            empty_state("fa-inbox", "Reports", "No reports available")
        }
        ReportsView::Loaded => {
            let active = session.active_week();
            session
                .reports
                .iter()
                .map(|report| {
                    let class = if Some(report.week_start) == active {
                        "report-item active"
                    } else {
                        "report-item"
                    };
                    let hidden = if report.matches(&session.report_query) {
                        ""
                    } else {
                        " hidden"
                    };
                    format!(
                        r#"<form method="post" action="{action}" class="{class}"{hidden}>
    <input type="hidden" name="week" value="{week}">
    <button type="submit">
        <div class="week">Week of {week}</div>
        <div class="count">{count} opportunities</div>
    </button>
</form>"#,
                        action = routes::SELECT_WEEK,
                        week = report.week_start,
                        count = report.opportunity_count,
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Week dropdown: a placeholder option plus one option per report.
pub fn render_week_select(session: &Session) -> String {
    let options = session
        .reports
        .iter()
        .map(|report| {
            let selected = if Some(report.week_start) == session.current_week {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{week}"{selected}>Week of {week} ({count} opportunities)</option>"#,
                week = report.week_start,
                count = report.opportunity_count,
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<form method="post" action="{action}" class="week-picker">
    <select id="week-select" name="week"><option value="">Select Week...</option>{options}</select>
    <button type="submit">Load</button>
</form>"#,
        action = routes::SELECT_WEEK,
    )
}

pub fn render_report_search(session: &Session) -> String {
    format!(
        r#"<form method="get" action="{action}" class="report-search">
    <input type="search" id="search-reports" name="q" value="{query}" placeholder="Search reports...">
</form>"#,
        action = routes::SEARCH_REPORTS,
        query = escape_html(&session.report_query),
    )
}
