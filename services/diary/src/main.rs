use anyhow::Context as _;
use sea_orm::Database;
use tracing::{info, warn};

use ptdiary_core::tracing::init_tracing;
use ptdiary_diary::config::DiaryConfig;
use ptdiary_diary::infra::fcm::{FcmClient, ServiceAccountKey};
use ptdiary_diary::infra::push::{PushDispatcher, PushGateway};
use ptdiary_diary::router::build_router;
use ptdiary_diary::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = DiaryConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let push = match &config.fcm_credentials_path {
        Some(path) => {
            let key = ServiceAccountKey::from_file(path).await?;
            info!(project_id = %key.project_id, "push delivery enabled");
            let (dispatcher, _worker) = PushDispatcher::spawn(
                PushGateway::new(FcmClient::new(key)),
                config.push_queue_capacity,
            );
            dispatcher
        }
        None => {
            warn!("FCM_CREDENTIALS_PATH not set, push delivery disabled");
            PushDispatcher::disabled()
        }
    };

    let push_enabled = push.is_enabled();
    let state = AppState {
        db,
        push,
        upload_dir: config.upload_dir,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.diary_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!(push_enabled, "diary service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
