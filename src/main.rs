use std::sync::Arc;
use std::time::Duration;

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer, middleware};
use tracing::info;

use golf_caddie::args;
use golf_caddie::caddie::{CompletionClient, OpenAiClient};
use golf_caddie::controller::{self, AppState};
use golf_caddie::storage::{SqliteStorage, Storage};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = args::args_checks()?;

    let storage = SqliteStorage::open(&args.db_name)?;
    if !args.combined_sql_script.trim().is_empty() {
        storage.execute_batch(&args.combined_sql_script).await?;
        info!("Ran startup SQL script");
    }

    let caddie = OpenAiClient::new(
        &args.ai_base_url,
        args.openai_api_key.clone(),
        &args.ai_model,
        Duration::from_secs(args.ai_timeout_secs),
    )?;
    if caddie.is_configured() {
        info!(model = caddie.model(), "Caddie ready");
    } else {
        tracing::warn!("No OpenAI API key set; advice requests will report an error");
    }

    let state = AppState {
        storage: Arc::new(storage) as Arc<dyn Storage>,
        caddie: Arc::new(caddie) as Arc<dyn CompletionClient>,
        max_upload_bytes: args.max_upload_bytes,
    };
    let static_dir = args.static_dir.clone();
    // room for the multipart framing around the largest image
    let payload_limit = args.max_upload_bytes.saturating_mul(2);

    info!(bind = %args.bind, port = args.port, db = %args.db_name, "Starting golf caddie");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(Data::new(state.clone()))
            .app_data(actix_web::web::FormConfig::default().limit(payload_limit))
            .configure(controller::configure)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await?;
    Ok(())
}
