use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use regpanel::api::HttpApi;
use regpanel::config::PanelConfig;
use regpanel::panels::CoursePanel;
use regpanel::session::Session;
use regpanel::state::LoadPlan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "regpanel=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PanelConfig::new_from_env()?;
    info!(base_url = %config.base_url, term = %config.current_term, "connecting to registrar backend");

    let session = Session::shared();
    let api = Arc::new(HttpApi::new(config, session.clone())?);

    let mut panel = CoursePanel::new(api, session, LoadPlan::full());
    panel.load().await?;

    let summary = panel.summary();
    info!(
        courses = summary.total_courses,
        capacity = summary.total_capacity,
        enrolled = summary.total_enrolled,
        "catalog loaded"
    );

    Ok(())
}
