use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use winnerdash_core::api::HttpDashboardApi;
use winnerdash_core::storage::FileKvStore;
use winnerdash_core::view::{Action, Dashboard, DashboardOptions};

#[derive(Debug, Parser)]
#[command(name = "winnerdash")]
struct Args {
    /// Week to show (YYYY-MM-DD). Defaults to the most recent report.
    #[arg(long)]
    week: Option<String>,

    /// Open the detail panel for this entity.
    #[arg(long)]
    entity: Option<String>,

    /// Write the rendered page here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = winnerdash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "dashboard render failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &winnerdash_core::config::Settings, args: Args) -> anyhow::Result<()> {
    let week = resolve_week(args.week.as_deref())?;

    let api = HttpDashboardApi::from_settings(settings)?;
    let dashboard = Dashboard::new(
        Arc::new(api),
        Arc::new(FileKvStore::new(settings.prefs_path())),
        // Only the final frame is written, so there is nothing to animate.
        DashboardOptions {
            animate_counters: false,
        },
    );

    dashboard.bootstrap().await;

    if let Some(week) = week {
        if dashboard.current_week() != Some(week) {
            dashboard.dispatch(Action::SelectWeek(week)).await;
        }
    }

    if let Some(entity_id) = args.entity {
        dashboard.dispatch(Action::ShowEntity(entity_id)).await;
    }

    let page = dashboard.render_page();
    tracing::info!(
        week = ?dashboard.current_week(),
        bytes = page.len(),
        "dashboard rendered"
    );

    match args.output.as_deref() {
        Some(path) => write_page(path, &page),
        None => {
            println!("{page}");
            Ok(())
        }
    }
}

fn write_page(path: &Path, page: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir {}", parent.display()))?;
    }
    std::fs::write(path, page)
        .with_context(|| format!("failed to write page to {}", path.display()))?;
    tracing::info!(path = %path.display(), "page written");
    Ok(())
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

fn resolve_week(week_arg: Option<&str>) -> anyhow::Result<Option<chrono::NaiveDate>> {
    week_arg
        .map(|s| {
            chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .with_context(|| format!("--week must be YYYY-MM-DD, got {s:?}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn week_flag_is_optional_and_validated() {
        assert_eq!(resolve_week(None).unwrap(), None);
        assert_eq!(
            resolve_week(Some("2024-01-01")).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert!(resolve_week(Some("01/01/2024")).is_err());
    }

    #[test]
    fn args_parse_all_flags() {
        let args = Args::try_parse_from([
            "winnerdash",
            "--week",
            "2024-01-01",
            "--entity",
            "ent_001",
            "--output",
            "out/index.html",
        ])
        .unwrap();
        assert_eq!(args.week.as_deref(), Some("2024-01-01"));
        assert_eq!(args.entity.as_deref(), Some("ent_001"));
        assert_eq!(args.output, Some(PathBuf::from("out/index.html")));
    }

    #[test]
    fn writes_page_creating_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site").join("index.html");
        write_page(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
