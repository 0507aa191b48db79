//! Development server command.

use std::path::Path;

use anyhow::Result;
use topicnav_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: Option<u16>, open: bool) -> Result<()> {
    let file_config = load_config(config_path)?;
    let port = port.unwrap_or(file_config.server.port);

    tracing::info!("Starting development server on port {}", port);

    let mut site = file_config.site_info();
    // The dev server always serves from the root.
    site.base_url = "/".to_string();

    let config = DevServerConfig {
        site_dir: file_config.site_dir(),
        port,
        host: file_config.server.host.clone(),
        open,
        home: file_config.site.home.clone(),
        site,
    };

    DevServer::new(config).start().await?;

    Ok(())
}
