use crate::format::{
    bar_percent, escape_html, probability_percent, probability_tier, score_tier, RiskLevel,
};
use crate::render::detail::render_card_details;
use crate::render::{empty_state, loading_state, routes};
use crate::view::session::{CardView, OpportunitiesView, Session};

/// Entrance delay between consecutive cards.
pub const CARD_STAGGER_MS: usize = 50;

const DEMAND_TOOLTIP: &str = "Measures market demand and growth potential";
const COMPETITION_TOOLTIP: &str = "Lower is better - indicates less competition";
const MARGIN_TOOLTIP: &str = "Estimated profit margin potential";
const RISK_TOOLTIP: &str = "Lower is better - indicates lower business risk";

pub fn render_opportunities_title(session: &Session) -> String {
    match session.current_week {
        Some(week) => format!(
            r#"<h2 id="content-title">Opportunities - Week of {week}</h2>
<p id="content-subtitle">Analyzing product opportunities for this week</p>"#
        ),
        None => r#"<h2 id="content-title">Opportunities</h2>
<p id="content-subtitle">Select a week to get started</p>"#
            .to_string(),
    }
}

pub fn render_opportunities(session: &Session) -> String {
    match session.opportunities_view {
        OpportunitiesView::NoWeek => empty_state(
            "fa-calendar-week",
            "No Week Selected",
            "Select a week to view opportunities",
        ),
        OpportunitiesView::Loading => loading_state("Loading opportunities..."),
        OpportunitiesView::Empty => empty_state(
            "fa-inbox",
            "No Opportunities Found",
            "No opportunities found for this week",
        ),
        OpportunitiesView::Failed => empty_state(
            "fa-exclamation-triangle",
            "Error Loading Opportunities",
            "Please try refreshing the page",
        ),
        OpportunitiesView::Loaded => session
            .visible_cards()
            .iter()
            .enumerate()
            .map(|(index, card)| render_card(card, index))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// One opportunity card. `index` is the zero-based position in the week's list.
pub fn render_card(card: &CardView, index: usize) -> String {
    let opp = &card.opportunity;
    let rank = index + 1;

    let prob_tier = probability_tier(opp.score_winner_prob);
    let prob_color = prob_tier.color();
    let prob_text = probability_percent(opp.score_winner_prob);
    let prob_width = bar_percent(opp.score_winner_prob * 100.0);

    let risk = RiskLevel::from_risk(opp.score_risk);

    let signals = if opp.explanations.top_signals.is_empty() {
        String::new()
    } else {
        let badges: String = opp
            .explanations
            .top_signals
            .iter()
            .map(|s| format!(r#"<span class="signal-badge">{}</span>"#, escape_html(s)))
            .collect();
        format!(
            r#"<div class="signals-section">
        <div class="signals-label"><i class="fas fa-bolt"></i> Key Signals</div>
        <div class="signals-list">{badges}</div>
    </div>"#
        )
    };

    let angles = if opp.innovation_angles.is_empty() {
        String::new()
    } else {
        let items: String = opp
            .innovation_angles
            .iter()
            .map(|a| format!("<li>{}</li>", escape_html(a)))
            .collect();
        format!(
            r#"<div class="innovation-section">
        <h4><i class="fas fa-lightbulb"></i> Innovation Angles</h4>
        <ul class="innovation-list">{items}</ul>
    </div>"#
        )
    };

    let plan = match opp.experiment_plan() {
        Some(plan) => format!(
            r#"<div class="experiment-plan">
        <div class="experiment-header"><i class="fas fa-flask"></i> <strong>Experiment Plan</strong></div>
        <p>{}</p>
    </div>"#,
            escape_html(plan)
        ),
        None => String::new(),
    };

    let (chevron, expand_label) = if card.expanded {
        ("fa-chevron-up", "Less Info")
    } else {
        ("fa-chevron-down", "More Info")
    };
    let details_hidden = if card.expanded { "" } else { " hidden" };

    format!(
        r#"<div class="opportunity-card slide-up" data-entity-id="{entity_id}" style="animation-delay: {delay}ms">
    <div class="opportunity-header">
        <div>
            <div class="opportunity-title">{name}</div>
            <div class="category-badge">{category}</div>
        </div>
        <div class="opportunity-rank">#{rank}</div>
    </div>
    <div class="winner-probability tier-{prob_tier_name}" style="color: {prob_color}">{prob_text}% Winner Probability</div>
    <div class="probability-bar">
        <div class="probability-fill" style="width: {prob_width:.1}%; background: {prob_color};"></div>
    </div>
    {signals}
    <div class="score-grid">
        {demand}
        {competition}
        {margin}
        {risk_score}
    </div>
    <div class="risk-indicator risk-{risk_level}">
        <i class="fas fa-{risk_icon}"></i>
        <span>Risk Level: {risk_label}</span>
    </div>
    {angles}
    {plan}
    <div class="card-actions">
        <form method="post" action="{details_action}">
            <button class="btn-details" type="submit"><i class="fas fa-info-circle"></i> View Details</button>
        </form>
        <form method="post" action="{toggle_action}">
            <button class="btn-expand" type="submit" aria-expanded="{expanded}"><i class="fas {chevron}"></i> <span>{expand_label}</span></button>
        </form>
    </div>
    <div class="card-details"{details_hidden}>{details}</div>
</div>"#,
        entity_id = escape_html(&opp.entity_id),
        delay = index * CARD_STAGGER_MS,
        name = escape_html(&opp.canonical_name),
        category = escape_html(opp.category()),
        prob_tier_name = prob_tier.as_str(),
        demand = render_score_item("Demand", opp.score_demand, false, DEMAND_TOOLTIP),
        competition = render_score_item("Competition", opp.score_competition, true, COMPETITION_TOOLTIP),
        margin = render_score_item("Margin", opp.score_margin, false, MARGIN_TOOLTIP),
        risk_score = render_score_item("Risk", opp.score_risk, true, RISK_TOOLTIP),
        risk_level = risk.as_str(),
        risk_icon = risk.icon(),
        risk_label = risk.as_str().to_uppercase(),
        details_action = escape_html(&routes::show_entity(&opp.entity_id)),
        toggle_action = escape_html(&routes::toggle_card(&opp.entity_id)),
        expanded = card.expanded,
        details = render_card_details(&card.details),
    )
}

fn render_score_item(label: &str, value: f64, lower_is_better: bool, tooltip: &str) -> String {
    let color = score_tier(value, lower_is_better).color();
    // Bar width is clamped; the number shows the raw score.
    let width = bar_percent(value);
    format!(
        r#"<div class="score-item" title="{tooltip}" data-tooltip="{tooltip}">
            <div class="score-label">{label} <i class="fas fa-question-circle tooltip-icon"></i></div>
            <div class="score-value" style="color: {color}">{value:.1}</div>
            <div class="score-progress">
                <div class="score-progress-fill" style="width: {width}%; background: {color};"></div>
            </div>
        </div>"#
    )
}
