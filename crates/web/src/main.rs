use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use winnerdash_core::api::HttpDashboardApi;
use winnerdash_core::render::routes;
use winnerdash_core::storage::FileKvStore;
use winnerdash_core::view::{Action, Dashboard, DashboardOptions, KeyPress};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = winnerdash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let api = HttpDashboardApi::from_settings(&settings).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        e
    })?;
    let prefs = FileKvStore::new(settings.prefs_path());
    let dashboard = Dashboard::new(
        Arc::new(api),
        Arc::new(prefs),
        DashboardOptions {
            animate_counters: settings.animate_counters,
        },
    );

    let dashboard = Arc::new(dashboard);
    // Serve right away; the page shows loading states until the first load settles.
    tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        let api_base_url = settings.api_base_url().to_string();
        async move {
            tracing::info!(%api_base_url, "loading dashboard");
            dashboard.bootstrap().await;
            tracing::info!(week = ?dashboard.current_week(), "dashboard loaded");
        }
    });

    let state = AppState { dashboard };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(index))
        .route(routes::REFRESH, post(refresh))
        .route(routes::SELECT_WEEK, post(select_week))
        .route("/actions/entity/:entity_id", post(show_entity))
        .route(routes::CLOSE_MODAL, post(close_modal))
        .route("/actions/card/:entity_id/toggle", post(toggle_card))
        .route(routes::TOGGLE_THEME, post(toggle_theme))
        .route(routes::SEARCH_REPORTS, get(search_reports))
        .route("/actions/key", post(key_press))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    dashboard: Arc<Dashboard>,
}

fn back_to_page() -> Redirect {
    Redirect::to("/")
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.dashboard.render_page())
}

async fn refresh(State(state): State<AppState>) -> Redirect {
    state.dashboard.dispatch(Action::Refresh).await;
    back_to_page()
}

#[derive(Debug, Deserialize)]
struct WeekForm {
    #[serde(default)]
    week: String,
}

async fn select_week(
    State(state): State<AppState>,
    Form(form): Form<WeekForm>,
) -> Result<Redirect, StatusCode> {
    let week = form.week.trim();
    // The picker's placeholder option posts an empty value.
    if week.is_empty() {
        return Ok(back_to_page());
    }

    let week = NaiveDate::parse_from_str(week, "%Y-%m-%d").map_err(|_| StatusCode::BAD_REQUEST)?;
    state.dashboard.dispatch(Action::SelectWeek(week)).await;
    Ok(back_to_page())
}

async fn show_entity(State(state): State<AppState>, Path(entity_id): Path<String>) -> Redirect {
    state.dashboard.dispatch(Action::ShowEntity(entity_id)).await;
    back_to_page()
}

async fn close_modal(State(state): State<AppState>) -> Redirect {
    state.dashboard.dispatch(Action::CloseModal).await;
    back_to_page()
}

async fn toggle_card(State(state): State<AppState>, Path(entity_id): Path<String>) -> Redirect {
    state.dashboard.dispatch(Action::ToggleCard(entity_id)).await;
    back_to_page()
}

async fn toggle_theme(State(state): State<AppState>) -> Redirect {
    state.dashboard.dispatch(Action::ToggleTheme).await;
    back_to_page()
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_reports(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Redirect {
    state
        .dashboard
        .dispatch(Action::SearchReports(query.q))
        .await;
    back_to_page()
}

/// Keyboard shortcut relay for scripts and key hooks; the rendered page has no form for it.
#[derive(Debug, Deserialize)]
struct KeyForm {
    #[serde(default)]
    key: String,
    #[serde(default, deserialize_with = "checkbox")]
    ctrl: bool,
    #[serde(default, deserialize_with = "checkbox")]
    meta: bool,
}

/// Accepts a checkbox's `on` as well as `true`/`1`. Anything else is unchecked.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    ))
}

async fn key_press(
    State(state): State<AppState>,
    Form(form): Form<KeyForm>,
) -> Result<Redirect, StatusCode> {
    if form.key.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut key = KeyPress::new(form.key);
    if form.ctrl {
        key = key.with_ctrl();
    }
    if form.meta {
        key = key.with_meta();
    }
    state.dashboard.dispatch(Action::Key(key)).await;
    Ok(back_to_page())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &winnerdash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
