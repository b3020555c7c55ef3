use std::sync::Arc;

use anyhow::Result;

use boardroom_application::Bootstrap;

pub async fn run(app: &Bootstrap, listen: Option<String>) -> Result<()> {
    let relay_config = &app.config.relay;
    let listen_addr = listen.unwrap_or_else(|| relay_config.listen_addr.clone());

    let relay = boardroom_relay::relay_from_config(relay_config, app.secrets.server_api_key())?;
    boardroom_relay::serve(&listen_addr, Arc::new(relay)).await
}
