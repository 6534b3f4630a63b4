use crate::domain::entity::{EntityDetail, EntityStats};
use crate::domain::opportunity::Opportunity;
use crate::domain::stats::{ReportSummary, StatsSnapshot};
use crate::view::notify::Notifier;
use crate::view::theme::Theme;
use chrono::NaiveDate;

/// Per-session UI state owned by one [`crate::view::Dashboard`]. Lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub theme: Theme,
    pub tiles: StatTiles,
    pub current_week: Option<NaiveDate>,
    pub reports: Vec<ReportSummary>,
    pub reports_view: ReportsView,
    pub report_query: String,
    pub opportunities_view: OpportunitiesView,
    /// Full opportunity set for `current_week`, in API order.
    pub cards: Vec<CardView>,
    pub opportunities_total: Option<u64>,
    pub modal: Option<EntityModal>,
    pub notifier: Notifier,
    /// Token of the most recent week request; older responses are discarded.
    pub latest_week_request: u64,
}

impl Session {
    /// Cards currently shown. There is no opportunity filter, so this is the full set.
    pub fn visible_cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn card(&self, entity_id: &str) -> Option<&CardView> {
        self.cards
            .iter()
            .find(|c| c.opportunity.entity_id == entity_id)
    }

    pub fn card_mut(&mut self, entity_id: &str) -> Option<&mut CardView> {
        self.cards
            .iter_mut()
            .find(|c| c.opportunity.entity_id == entity_id)
    }

    /// The report highlighted in the sidebar: the selected week, else the first report.
    pub fn active_week(&self) -> Option<NaiveDate> {
        self.current_week
            .or_else(|| self.reports.first().map(|r| r.week_start))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub shown: u64,
    pub target: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTiles {
    pub entities: Counter,
    pub amazon_listings: Counter,
    pub tiktok_metrics: Counter,
    pub latest_report: Option<String>,
    pub loaded: bool,
}

impl StatTiles {
    /// Sets new targets. Counters restart from zero when they are about to be animated.
    pub fn apply(&mut self, stats: &StatsSnapshot, animate: bool) {
        let targets = [stats.entity_count, stats.amazon_listings, stats.tiktok_metrics];
        for (counter, target) in self.counters_mut().into_iter().zip(targets) {
            counter.target = target;
            counter.shown = if animate { 0 } else { target };
        }
        self.latest_report = stats
            .latest_report
            .clone()
            .filter(|s| !s.trim().is_empty());
        self.loaded = true;
    }

    pub fn counters(&self) -> [&Counter; 3] {
        [&self.entities, &self.amazon_listings, &self.tiktok_metrics]
    }

    pub fn counters_mut(&mut self) -> [&mut Counter; 3] {
        [
            &mut self.entities,
            &mut self.amazon_listings,
            &mut self.tiktok_metrics,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportsView {
    #[default]
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpportunitiesView {
    /// Nothing selected yet.
    #[default]
    NoWeek,
    Loading,
    Loaded,
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub opportunity: Opportunity,
    pub expanded: bool,
    pub details: CardDetails,
}

impl CardView {
    pub fn new(opportunity: Opportunity) -> Self {
        Self {
            opportunity,
            expanded: false,
            details: CardDetails::NotLoaded,
        }
    }
}

/// Lazily loaded quick stats of a card. Once loaded (or failed) it is kept for the card's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum CardDetails {
    NotLoaded,
    Loading,
    Loaded(EntityStats),
    NotFound,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityModal {
    pub entity_id: String,
    pub detail: EntityDetail,
    pub stats: EntityStats,
}
