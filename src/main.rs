use tokio::net::TcpListener;
use rust_url_summarizer::{
    config::Config,
    api::routes::create_router,
    LiveAppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::load()?;
    let server_addr = config.server_addr;

    let app_state = LiveAppState::from_config(&config)?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!(addr = %server_addr, openai = %config.openai_base_url, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
