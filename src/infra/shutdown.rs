//! For shutting down the application gracefully.

/// Completes when ctrl-c is pressed, letting axum drain in-flight
/// requests before the process exits.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
    }
    tracing::info!("Shutting down");
}
