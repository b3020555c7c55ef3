use std::sync::Arc;

use anyhow::{Result, bail};

use boardroom_application::{Bootstrap, MeetingService};
use boardroom_core::meeting::{AdvisorResponder, MessageKind};
use boardroom_interaction::{RelayAdvisorResponder, SimulatedResponder};

pub async fn run(app: &Bootstrap, message: &str, extra: &[String], all: bool) -> Result<()> {
    let board = app.state_manager.state().selected_advisors;
    if let Some(missing) = extra.iter().find(|id| !board.iter().any(|a| a.id == **id)) {
        bail!("Advisor not found: {}", missing);
    }

    let service = MeetingService::new(app.state_manager.clone(), responder(app)?)
        .with_max_stored_meetings(app.config.meeting.max_stored_meetings);

    let mut session = service.start();
    for advisor in &board {
        let wanted = all || extra.iter().any(|id| *id == advisor.id);
        if wanted && !session.is_active(&advisor.id) {
            session.toggle_advisor(advisor);
        }
    }

    for reply in service.send(&mut session, message).await? {
        match (reply.kind, reply.attribution.as_ref()) {
            (MessageKind::User, _) => {}
            (MessageKind::Advisor, Some(who)) => {
                println!("{} {} ({}):\n{}\n", who.avatar, who.name, who.role, reply.content)
            }
            _ => eprintln!("! {}\n", reply.content),
        }
    }

    service.finish(session);
    Ok(())
}

fn responder(app: &Bootstrap) -> Result<Arc<dyn AdvisorResponder>> {
    match app.secrets.server_api_key() {
        Some(key) => {
            let relay = boardroom_relay::relay_from_config(&app.config.relay, Some(key))?;
            Ok(Arc::new(RelayAdvisorResponder::new(Arc::new(relay))))
        }
        None => {
            tracing::info!("[Ask] No API key configured, using simulated advisors");
            Ok(Arc::new(SimulatedResponder::new()))
        }
    }
}
