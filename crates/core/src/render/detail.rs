use crate::domain::entity::{AmazonStats, EntityAlias, EntityStats, LatestScore, TikTokStats};
use crate::format::{escape_html, group_thousands, probability_percent};
use crate::render::routes;
use crate::view::session::{CardDetails, EntityModal};

/// Content of a card's expandable panel.
pub fn render_card_details(details: &CardDetails) -> String {
    match details {
        CardDetails::NotLoaded => String::new(),
        CardDetails::Loading => r#"<div class="details-loading"><div class="spinner"></div><p>Loading detailed information...</p></div>"#.to_string(),
        CardDetails::NotFound => details_content(&no_data("Entity not found or no data available")),
        CardDetails::Failed => details_content(
            r#"<div class="error-state"><i class="fas fa-exclamation-triangle"></i><p>Unable to load details. Please try again.</p></div>"#,
        ),
        CardDetails::Loaded(stats) => details_content(&render_quick_stats(stats)),
    }
}

fn details_content(inner: &str) -> String {
    format!(r#"<div class="details-content fade-in">{inner}</div>"#)
}

fn no_data(message: &str) -> String {
    format!(r#"<div class="no-data"><i class="fas fa-info-circle"></i><p>{message}</p></div>"#)
}

fn render_quick_stats(stats: &EntityStats) -> String {
    let mut items = Vec::new();

    let amazon = &stats.amazon;
    if amazon.listing_count() > 0 {
        let extra = match amazon.avg_price.filter(|p| *p > 0.0) {
            Some(price) => format!(r#"<div class="quick-stat-extra">Avg: ${price:.2}</div>"#),
            None => String::new(),
        };
        items.push(quick_stat(
            "fab fa-amazon",
            &format!("{} listings", amazon.listing_count()),
            "Amazon",
            &extra,
        ));
    }

    let tiktok = &stats.tiktok;
    if tiktok.hashtag_count() > 0 {
        let extra = match tiktok.max_views.filter(|v| *v > 0) {
            Some(views) => format!(
                r#"<div class="quick-stat-extra">Max views: {}</div>"#,
                group_thousands(views)
            ),
            None => String::new(),
        };
        items.push(quick_stat(
            "fab fa-tiktok",
            &format!("{} hashtags", tiktok.hashtag_count()),
            "TikTok",
            &extra,
        ));
    }

    if let Some(score) = &stats.latest_score {
        if let Some(prob) = score.score_winner_prob {
            let extra = match score.week_start.as_deref() {
                Some(week) => format!(
                    r#"<div class="quick-stat-extra">Week of {}</div>"#,
                    escape_html(week)
                ),
                None => String::new(),
            };
            items.push(quick_stat(
                "fas fa-chart-line",
                &format!("{}%", probability_percent(prob)),
                "Winner Probability",
                &extra,
            ));
        }
    }

    if items.is_empty() {
        items.push(no_data("No additional data available for this entity"));
    }

    format!(r#"<div class="quick-stats">{}</div>"#, items.join(""))
}

fn quick_stat(icon: &str, value: &str, label: &str, extra: &str) -> String {
    format!(
        r#"<div class="quick-stat"><i class="{icon}"></i><div><div class="quick-stat-value">{value}</div><div class="quick-stat-label">{label}</div>{extra}</div></div>"#
    )
}

/// Entity detail modal. Panels without data render a placeholder so the layout stays put.
pub fn render_modal(modal: &EntityModal) -> String {
    format!(
        r#"<div id="entity-details-modal" class="modal-overlay active">
    <div class="modal-content">
        <div class="modal-header">
            <h2>{name}</h2>
            <form method="post" action="{close}">
                <button class="modal-close" type="submit" aria-label="Close"><i class="fas fa-times"></i></button>
            </form>
        </div>
        <div class="modal-body">
            <div class="details-grid">
                {performance}
                {amazon}
                {tiktok}
                {aliases}
            </div>
        </div>
    </div>
</div>"#,
        name = escape_html(&modal.detail.canonical_name),
        close = routes::CLOSE_MODAL,
        performance = render_performance(modal.stats.latest_score.as_ref()),
        amazon = render_amazon(&modal.stats.amazon),
        tiktok = render_tiktok(&modal.stats.tiktok),
        aliases = render_aliases(&modal.detail.aliases),
    )
}

fn section(icon: &str, title: &str, body: &str) -> String {
    format!(
        r#"<div class="details-section">
    <h3><i class="{icon}"></i> {title}</h3>
    {body}
</div>"#
    )
}

fn placeholder(message: &str) -> String {
    format!(r#"<p class="no-data">{message}</p>"#)
}

fn data_stat(label: &str, value: &str) -> String {
    format!(
        r#"<div class="data-stat"><span class="stat-label">{label}:</span> <span class="stat-value">{value}</span></div>"#
    )
}

fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric-item"><div class="metric-label">{label}</div><div class="metric-value">{value}</div></div>"#
    )
}

fn render_performance(score: Option<&LatestScore>) -> String {
    let title = "Performance Metrics";
    let icon = "fas fa-chart-line";
    let Some(score) = score else {
        return section(icon, title, &placeholder("No score history available"));
    };

    let mut metrics = Vec::new();
    if let Some(prob) = score.score_winner_prob {
        metrics.push(metric(
            "Winner Probability",
            &format!("{}%", probability_percent(prob)),
        ));
    }
    if let Some(rank) = score.score_rank {
        metrics.push(metric("Overall Rank", &format!("#{rank:.0}")));
    }
    if let Some(week) = score.week_start.as_deref() {
        metrics.push(metric("Scored Week", &escape_html(week)));
    }

    if metrics.is_empty() {
        return section(icon, title, &placeholder("No score history available"));
    }
    section(
        icon,
        title,
        &format!(r#"<div class="metrics-grid">{}</div>"#, metrics.join("")),
    )
}

fn render_amazon(amazon: &AmazonStats) -> String {
    let title = "Amazon Data";
    let icon = "fab fa-amazon";
    if amazon.listing_count() == 0 {
        return section(icon, title, &placeholder("No Amazon data available"));
    }

    let mut stats = vec![data_stat(
        "Listings Tracked",
        &amazon.listing_count().to_string(),
    )];
    if let Some(price) = amazon.avg_price.filter(|p| *p > 0.0) {
        stats.push(data_stat("Avg Price", &format!("${price:.2}")));
    }
    if let Some(bsr) = amazon.best_bsr.filter(|b| *b > 0.0) {
        stats.push(data_stat("Best BSR", &format!("#{bsr:.0}")));
    }
    if let Some(rating) = amazon.avg_rating.filter(|r| *r > 0.0) {
        stats.push(data_stat("Avg Rating", &format!("{rating:.1} ⭐")));
    }
    if let Some(reviews) = amazon.total_reviews.filter(|r| *r > 0) {
        stats.push(data_stat("Total Reviews", &group_thousands(reviews)));
    }

    section(
        icon,
        title,
        &format!(r#"<div class="data-stats">{}</div>"#, stats.join("")),
    )
}

fn render_tiktok(tiktok: &TikTokStats) -> String {
    let title = "TikTok Data";
    let icon = "fab fa-tiktok";
    if tiktok.hashtag_count() == 0 {
        return section(icon, title, &placeholder("No TikTok data available"));
    }

    let mut stats = vec![data_stat(
        "Hashtags Tracked",
        &tiktok.hashtag_count().to_string(),
    )];
    let optional = [
        ("Max Views", tiktok.max_views),
        ("Max Videos", tiktok.max_videos),
        ("Max Creators", tiktok.max_creators),
    ];
    for (label, value) in optional {
        if let Some(v) = value.filter(|v| *v > 0) {
            stats.push(data_stat(label, &group_thousands(v)));
        }
    }

    section(
        icon,
        title,
        &format!(r#"<div class="data-stats">{}</div>"#, stats.join("")),
    )
}

fn render_aliases(aliases: &[EntityAlias]) -> String {
    let title = "Aliases &amp; Sources";
    let icon = "fas fa-tags";
    if aliases.is_empty() {
        return section(icon, title, &placeholder("No aliases recorded"));
    }

    let badges: String = aliases
        .iter()
        .map(|alias| {
            let source_icon = match alias.source.as_str() {
                "amazon" => "fab fa-amazon",
                "tiktok" => "fab fa-tiktok",
                _ => "fas fa-tag",
            };
            format!(
                r#"<span class="alias-badge source-{source}"><i class="{source_icon}"></i> {text}</span>"#,
                source = escape_html(&alias.source),
                text = escape_html(&alias.alias_text),
            )
        })
        .collect();

    section(
        icon,
        title,
        &format!(r#"<div class="aliases-list">{badges}</div>"#),
    )
}
