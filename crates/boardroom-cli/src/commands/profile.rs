use anyhow::Result;

use boardroom_application::Bootstrap;

use super::report_save;

pub fn show(app: &Bootstrap) -> Result<()> {
    let profile = app.state_manager.state().user_profile;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn set(app: &Bootstrap, name: Option<String>, email: Option<String>) -> Result<()> {
    let mut profile = app.state_manager.state().user_profile;
    if let Some(name) = name {
        profile = profile.with_name(name);
    }
    if let Some(email) = email {
        profile = profile.with_email(email);
    }
    report_save(app.state_manager.update_user_profile(profile.clone()));
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
