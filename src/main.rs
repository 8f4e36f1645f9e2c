use dotenv::dotenv;
use profills_backend::app::app::App;
use profills_backend::util::logger::Logger;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;


#[tokio::main]
async fn main() {
    // Load environment variables before the logger reads LOG_DIR and filters
    let dotenv_result = dotenv();

    // Keep the file writer guards alive for the whole process
    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            let env_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .init();
            warn!("⚠️ File logging disabled: {}", e);
            None
        }
    };

    info!("🚀 Starting Profills Carton Backend");

    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
