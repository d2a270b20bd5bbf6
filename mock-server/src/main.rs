use anyhow::Context;
use flexi_logger::Logger;
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str("info")
        .context("invalid log spec")?
        .log_to_stderr()
        .start()
        .context("failed to start logger")?;

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");
    mock_server::run(listener).await?;
    Ok(())
}
