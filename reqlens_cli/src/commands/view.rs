//! Interactive TUI command

use crate::api::ApiClient;
use crate::tui;
use anyhow::Result;

/// Open the interactive inspector against the configured backend
pub async fn run(client: ApiClient, limit: usize) -> Result<()> {
    tracing::debug!("Opening TUI against {}", client.base_url());
    tui::run(client, limit).await
}
