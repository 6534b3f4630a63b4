use crate::api::{ApiError, DashboardApi, StatsLookup};
use crate::domain::entity::EntityStats;
use crate::render::page::render_page;
use crate::render::tiles::{self, Ramp};
use crate::storage::KvStore;
use crate::view::action::{Action, KeyPress};
use crate::view::notify::ToastKind;
use crate::view::overlay::{LoadKind, LoadTracker, Phase};
use crate::view::session::{
    CardDetails, CardView, EntityModal, OpportunitiesView, ReportsView, Session,
};
use crate::view::theme::{load_theme, save_theme, Theme};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardOptions {
    /// Ramp the stat counters up from zero instead of showing the final values at once.
    pub animate_counters: bool,
}

/// Owns one dashboard session and runs every load sequence against the backend.
///
/// Failures never escape an operation: each one is logged, turned into a toast and,
/// where a region has nothing to show, into an explicit placeholder.
pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    prefs: Arc<dyn KvStore>,
    options: DashboardOptions,
    loads: LoadTracker,
    // Never held across an await.
    session: Mutex<Session>,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        prefs: Arc<dyn KvStore>,
        options: DashboardOptions,
    ) -> Self {
        let session = Session {
            theme: load_theme(prefs.as_ref()),
            ..Session::default()
        };

        Self {
            api,
            prefs,
            options,
            loads: LoadTracker::default(),
            session: Mutex::new(session),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(kind = kind.as_str(), %message, "toast");
        self.session().notifier.push(kind, message);
    }

    pub fn phase(&self) -> Phase {
        self.loads.phase()
    }

    pub fn overlay_visible(&self) -> bool {
        self.loads.overlay_visible()
    }

    pub fn current_week(&self) -> Option<NaiveDate> {
        self.session().current_week
    }

    pub fn theme(&self) -> Theme {
        self.session().theme
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> Session {
        self.session().clone()
    }

    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::Refresh => self.refresh().await,
            Action::SelectWeek(week) => self.select_week(week).await,
            Action::ShowEntity(entity_id) => self.show_entity(&entity_id).await,
            Action::CloseModal => self.close_modal(),
            Action::ToggleCard(entity_id) => self.toggle_card(&entity_id).await,
            Action::ToggleTheme => {
                self.toggle_theme();
            }
            Action::SearchReports(query) => self.search_reports(&query),
            Action::Key(key) => self.handle_key(&key).await,
        }
    }

    /// Initial load: stats and reports concurrently. The first week is selected as soon
    /// as the reports arrive, without waiting on the stats tiles.
    pub async fn bootstrap(&self) {
        tokio::join!(self.load_stats_tiles(LoadKind::Initial), async {
            let _loading = self.loads.begin(LoadKind::Initial);
            if let Some(week) = self.load_reports().await {
                self.select_week(week).await;
            }
        });
    }

    /// Reloads stats and reports and re-fetches the selected week, keeping the selection.
    pub async fn refresh(&self) {
        self.notify(ToastKind::Info, "Refreshing data...");

        tokio::join!(self.load_stats_tiles(LoadKind::Refresh), async {
            let _loading = self.loads.begin(LoadKind::Refresh);
            let auto_week = self.load_reports().await;
            if let Some(week) = auto_week.or_else(|| self.current_week()) {
                self.select_week(week).await;
            }
        });

        self.notify(ToastKind::Success, "Data refreshed successfully");
    }

    /// Fetches the stats under a load of `kind`, then plays the counter ramp once the
    /// load has settled.
    async fn load_stats_tiles(&self, kind: LoadKind) {
        let loaded = {
            let _loading = self.loads.begin(kind);
            self.load_stats().await
        };

        if loaded && self.options.animate_counters {
            self.animate_counters().await;
        }
    }

    async fn load_stats(&self) -> bool {
        let stats = match self.api.stats().await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::error!(error = %err, kind = err.kind(), "failed to load stats");
                self.notify(ToastKind::Error, "Error loading statistics");
                return false;
            }
        };

        self.session()
            .tiles
            .apply(&stats, self.options.animate_counters);
        tracing::info!(
            entities = stats.entity_count,
            amazon_listings = stats.amazon_listings,
            tiktok_metrics = stats.tiktok_metrics,
            "stats loaded"
        );
        true
    }

    async fn animate_counters(&self) {
        let ramps: Vec<Ramp> = self
            .session()
            .tiles
            .counters()
            .iter()
            .map(|c| Ramp::new(0, c.target))
            .collect();

        tiles::drive(&ramps, |idx, value| {
            let mut session = self.session();
            let counter = session.tiles.counters_mut().into_iter().nth(idx);
            if let Some(counter) = counter {
                counter.shown = value;
            }
        })
        .await;
    }

    /// Returns the week to auto-select: the first report, when nothing is selected yet.
    async fn load_reports(&self) -> Option<NaiveDate> {
        match self.api.reports().await {
            Ok(reports) => {
                tracing::info!(count = reports.len(), "reports loaded");
                let mut session = self.session();
                let first = reports.first().map(|r| r.week_start);
                session.reports = reports;
                session.reports_view = ReportsView::Loaded;
                if session.current_week.is_none() {
                    first
                } else {
                    None
                }
            }
            Err(err) => {
                tracing::error!(error = %err, kind = err.kind(), "failed to load reports");
                let mut session = self.session();
                session.reports_view = ReportsView::Failed;
                session
                    .notifier
                    .push(ToastKind::Error, "Error loading reports");
                None
            }
        }
    }

    /// Loads a week's opportunities. When selections overlap, only the most recent one
    /// is applied.
    pub async fn select_week(&self, week: NaiveDate) {
        let _loading = self.loads.begin(LoadKind::WeekSwitch);
        let token = {
            let mut session = self.session();
            session.latest_week_request += 1;
            session.current_week = Some(week);
            session.opportunities_view = OpportunitiesView::Loading;
            session.cards.clear();
            session.opportunities_total = None;
            session.latest_week_request
        };

        let result = self.api.opportunities(week).await;

        let mut session = self.session();
        if session.latest_week_request != token {
            tracing::debug!(%week, token, latest = session.latest_week_request, "discarding stale opportunities");
            return;
        }

        match result {
            Ok(set) => {
                let count = set.opportunities.len();
                session.cards = set.opportunities.into_iter().map(CardView::new).collect();
                session.opportunities_total = set.total;
                tracing::info!(%week, count, "opportunities loaded");
                if count == 0 {
                    session.opportunities_view = OpportunitiesView::Empty;
                } else {
                    session.opportunities_view = OpportunitiesView::Loaded;
                    session
                        .notifier
                        .push(ToastKind::Success, format!("Loaded {count} opportunities"));
                }
            }
            Err(err) => {
                tracing::error!(
                    %week,
                    endpoint = err.endpoint(),
                    error = %err,
                    kind = err.kind(),
                    "failed to load opportunities"
                );
                session.opportunities_view = OpportunitiesView::Failed;
                session
                    .notifier
                    .push(ToastKind::Error, "Error loading opportunities");
            }
        }
    }

    /// Opens the detail modal. Entity stats are optional: when they fail the modal still
    /// opens with "no data" panels.
    pub async fn show_entity(&self, entity_id: &str) {
        let entity_id = entity_id.trim();
        if entity_id.is_empty() {
            tracing::error!("entity details requested without an entity id");
            self.notify(ToastKind::Error, "Error: No entity ID provided");
            return;
        }

        let _loading = self.loads.begin(LoadKind::EntityDetail);
        let (detail, stats) = tokio::join!(
            self.api.entity_detail(entity_id),
            self.api.entity_stats(entity_id)
        );

        let detail = match detail {
            Ok(detail) => detail,
            Err(err) => {
                tracing::error!(entity_id, error = %err, kind = err.kind(), "failed to load entity details");
                self.notify(
                    ToastKind::Error,
                    format!("Error loading entity details: {err}"),
                );
                return;
            }
        };

        if detail.canonical_name.trim().is_empty() {
            tracing::error!(entity_id, "entity details have no canonical name");
            self.notify(ToastKind::Error, "Error: Invalid entity data");
            return;
        }

        let stats = match stats {
            Ok(StatsLookup::Found(stats)) => stats,
            Ok(StatsLookup::Missing { error }) => {
                tracing::debug!(entity_id, %error, "no stats recorded for entity");
                EntityStats::default()
            }
            Err(err) => {
                tracing::warn!(entity_id, error = %err, kind = err.kind(), "entity stats unavailable; showing details without them");
                EntityStats::default()
            }
        };

        self.session().modal = Some(EntityModal {
            entity_id: entity_id.to_string(),
            detail,
            stats,
        });
    }

    pub fn close_modal(&self) {
        self.session().modal = None;
    }

    /// Expands or collapses a card. The first expansion fetches the entity's quick stats;
    /// the outcome stays on the card, so later toggles never refetch.
    pub async fn toggle_card(&self, entity_id: &str) {
        let needs_fetch = {
            let mut session = self.session();
            let Some(card) = session.card_mut(entity_id) else {
                tracing::warn!(entity_id, "toggle for a card that is not shown");
                return;
            };
            card.expanded = !card.expanded;
            if card.expanded && card.details == CardDetails::NotLoaded {
                card.details = CardDetails::Loading;
                true
            } else {
                false
            }
        };

        if !needs_fetch {
            return;
        }

        let details = match self.api.entity_stats(entity_id).await {
            Ok(StatsLookup::Found(stats)) => CardDetails::Loaded(stats),
            Ok(StatsLookup::Missing { .. }) => CardDetails::NotFound,
            // A body-level error still means "nothing to show", not a broken card.
            Err(ApiError::Application { message, .. }) => {
                tracing::debug!(entity_id, %message, "entity stats reported an error");
                CardDetails::Loaded(EntityStats::default())
            }
            Err(err) => {
                tracing::error!(entity_id, error = %err, kind = err.kind(), "failed to load card details");
                CardDetails::Failed
            }
        };

        let mut session = self.session();
        if let Some(card) = session.card_mut(entity_id) {
            // The week may have been reloaded meanwhile; only fill the card that asked.
            if card.details == CardDetails::Loading {
                card.details = details;
            }
        }
    }

    /// Flips the theme, persists it and returns the new value. A failed write is logged;
    /// the switch still applies for this session.
    pub fn toggle_theme(&self) -> Theme {
        let theme = {
            let mut session = self.session();
            session.theme = session.theme.toggled();
            session.theme
        };

        if let Err(err) = save_theme(self.prefs.as_ref(), theme) {
            tracing::warn!(error = %err, "theme preference not saved");
        }

        self.notify(
            ToastKind::Success,
            format!("Switched to {} theme", theme.as_str()),
        );
        theme
    }

    pub fn search_reports(&self, query: &str) {
        self.session().report_query = query.trim().to_string();
    }

    pub async fn handle_key(&self, key: &KeyPress) {
        if key.is_refresh() {
            self.refresh().await;
            return;
        }

        if key.is_escape() {
            let mut session = self.session();
            session.modal = None;
            session.report_query.clear();
        }
    }

    pub fn prune_toasts(&self, now: DateTime<Utc>) {
        self.session().notifier.prune(now);
    }

    /// Renders the full page, dropping toasts that have expired.
    pub fn render_page(&self) -> String {
        let overlay_visible = self.loads.overlay_visible();
        let mut session = self.session();
        session.notifier.prune(Utc::now());
        render_page(&session, overlay_visible)
    }
}
