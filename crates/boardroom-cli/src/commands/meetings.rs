use anyhow::{Result, bail};

use boardroom_application::Bootstrap;

use super::report_save;

pub fn list(app: &Bootstrap) {
    let meetings = app.state_manager.state().active_conversations;
    if meetings.is_empty() {
        println!("No meetings.");
        return;
    }
    for record in meetings {
        println!(
            "{}  {}  {} messages  {} replies  {} advisors",
            record.id,
            record.start_time.format("%Y-%m-%d %H:%M"),
            record.messages.len(),
            record.advisor_reply_count(),
            record.advisors.len()
        );
    }
}

pub fn clear(app: &Bootstrap, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete meeting history without --yes");
    }
    report_save(app.state_manager.update_conversations(Vec::new()));
    println!("Meeting history cleared.");
    Ok(())
}
