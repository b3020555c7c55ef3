use anyhow::{Result, bail};

use boardroom_application::Bootstrap;
use boardroom_core::advisor::{Advisor, AdvisorDraft};

use super::report_save;

pub fn list(app: &Bootstrap) {
    for advisor in app.state_manager.state().selected_advisors {
        let tag = if advisor.is_host {
            " [host]"
        } else if advisor.is_custom() {
            " [custom]"
        } else {
            ""
        };
        println!(
            "{} {:<16} {} - {}{}",
            advisor.avatar, advisor.id, advisor.name, advisor.role, tag
        );
    }
}

pub fn add(app: &Bootstrap, draft: AdvisorDraft) -> Result<()> {
    let advisor = app.state_manager.create_advisor(draft)?;
    println!("Added {} ({})", advisor.name, advisor.id);
    Ok(())
}

pub fn remove(app: &Bootstrap, id: &str) -> Result<()> {
    let outcome = app.state_manager.remove_advisor(id)?;
    report_save(outcome);
    println!("Removed {}", id);
    Ok(())
}

/// Field overrides for `advisors edit`. Unset fields keep their value.
#[derive(Debug, Default)]
pub struct AdvisorChanges {
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
    pub experience: Option<String>,
    /// Replaces the whole list when non-empty.
    pub expertise: Vec<String>,
    pub prompt: Option<String>,
}

impl AdvisorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.avatar.is_none()
            && self.experience.is_none()
            && self.expertise.is_empty()
            && self.prompt.is_none()
    }

    pub fn apply(self, advisor: &mut Advisor) {
        if let Some(name) = self.name {
            advisor.name = name;
        }
        if let Some(role) = self.role {
            advisor.role = role;
        }
        if let Some(avatar) = self.avatar {
            advisor.avatar = avatar;
        }
        if let Some(experience) = self.experience {
            advisor.experience = experience;
        }
        if !self.expertise.is_empty() {
            advisor.expertise = self.expertise;
        }
        if let Some(prompt) = self.prompt {
            advisor.custom_prompt = prompt;
        }
    }
}

pub fn edit(app: &Bootstrap, id: &str, changes: AdvisorChanges) -> Result<()> {
    if changes.is_empty() {
        bail!("Nothing to change; pass at least one field option");
    }
    let Some(mut advisor) = app.state_manager.state().find_advisor(id).cloned() else {
        bail!("Advisor not found: {}", id);
    };

    changes.apply(&mut advisor);
    let outcome = app.state_manager.edit_advisor(advisor.clone())?;
    report_save(outcome);
    println!("Updated {} ({})", advisor.name, advisor.id);
    Ok(())
}
