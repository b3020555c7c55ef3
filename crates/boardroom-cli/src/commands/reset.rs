use anyhow::{Result, bail};

use boardroom_application::Bootstrap;

pub async fn run(app: &Bootstrap, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("Refusing to reset without --yes");
    }
    app.state_manager.clear_all_data().await;
    println!("All data cleared.");
    Ok(())
}
