use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use boardroom_application::{Bootstrap, BootstrapOptions};
use boardroom_infrastructure::BoardroomPaths;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "boardroom")]
#[command(about = "Boardroom - AI Board of Advisors", long_about = None)]
struct Cli {
    /// Keep config and data under this directory instead of the user directories
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chat relay HTTP server
    Serve {
        /// Address to listen on (overrides config.toml)
        #[arg(long)]
        listen: Option<String>,
    },
    /// Manage the advisor board
    Advisors {
        #[command(subcommand)]
        action: AdvisorsAction,
    },
    /// Manage uploaded documents
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
    /// Hold a one-message meeting with the board
    Ask {
        /// Message for the board
        message: String,
        /// Also activate this advisor (repeatable)
        #[arg(long = "advisor", value_name = "ID")]
        advisors: Vec<String>,
        /// Activate every advisor on the board
        #[arg(long, conflicts_with = "advisors")]
        all: bool,
    },
    /// Review or clear stored meetings
    Meetings {
        #[command(subcommand)]
        action: MeetingsAction,
    },
    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Delete all documents, meetings and custom advisors
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AdvisorsAction {
    /// List the advisors on the board
    List,
    /// Create a custom advisor
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long, default_value = "")]
        experience: String,
        /// Area of expertise (repeatable)
        #[arg(long)]
        expertise: Vec<String>,
        /// System prompt used when the advisor replies
        #[arg(long, default_value = "")]
        prompt: String,
    },
    /// Change fields of a custom advisor
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        /// Replaces the expertise list (repeatable)
        #[arg(long)]
        expertise: Vec<String>,
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Remove a custom advisor
    Remove { id: String },
}

#[derive(Subcommand)]
enum DocsAction {
    /// List uploaded documents
    List,
    /// Upload a file
    Add { path: PathBuf },
    /// Show a document's metadata, optionally writing its content to a file
    Show {
        id: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Attach an analysis result (JSON) to a document
    Analyze {
        id: String,
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },
    /// Delete a document and its content
    Rm { id: String },
}

#[derive(Subcommand)]
enum MeetingsAction {
    /// List stored meetings
    List,
    /// Delete the stored meeting history
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the profile
    Show,
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BoardroomPaths::resolve(cli.base_dir.as_deref())?;
    let _log_guard = logging::init(&paths.logs_dir())?;

    let app = Bootstrap::load(BootstrapOptions {
        base_dir: cli.base_dir,
    })
    .await?;

    match cli.command {
        Commands::Serve { listen } => commands::serve::run(&app, listen).await?,
        Commands::Advisors { action } => match action {
            AdvisorsAction::List => commands::advisors::list(&app),
            AdvisorsAction::Add {
                name,
                role,
                avatar,
                experience,
                expertise,
                prompt,
            } => {
                let mut draft = boardroom_core::advisor::AdvisorDraft::new(name, role)
                    .with_prompt(prompt);
                if let Some(avatar) = avatar {
                    draft.avatar = avatar;
                }
                draft.experience = experience;
                draft.expertise = expertise;
                commands::advisors::add(&app, draft)?
            }
            AdvisorsAction::Edit {
                id,
                name,
                role,
                avatar,
                experience,
                expertise,
                prompt,
            } => {
                let changes = commands::advisors::AdvisorChanges {
                    name,
                    role,
                    avatar,
                    experience,
                    expertise,
                    prompt,
                };
                commands::advisors::edit(&app, &id, changes)?
            }
            AdvisorsAction::Remove { id } => commands::advisors::remove(&app, &id)?,
        },
        Commands::Docs { action } => match action {
            DocsAction::List => commands::docs::list(&app),
            DocsAction::Add { path } => commands::docs::add(&app, &path).await?,
            DocsAction::Show { id, output } => {
                commands::docs::show(&app, &id, output.as_deref()).await?
            }
            DocsAction::Analyze { id, from } => commands::docs::analyze(&app, &id, &from).await?,
            DocsAction::Rm { id } => commands::docs::remove(&app, &id).await?,
        },
        Commands::Ask {
            message,
            advisors,
            all,
        } => commands::ask::run(&app, &message, &advisors, all).await?,
        Commands::Meetings { action } => match action {
            MeetingsAction::List => commands::meetings::list(&app),
            MeetingsAction::Clear { yes } => commands::meetings::clear(&app, yes)?,
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&app)?,
            ProfileAction::Set { name, email } => commands::profile::set(&app, name, email)?,
        },
        Commands::Reset { yes } => commands::reset::run(&app, yes).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_advisors() {
        let cli = Cli::try_parse_from([
            "boardroom",
            "--base-dir",
            "/tmp/board",
            "ask",
            "Should we raise?",
            "--advisor",
            "cfo-001",
            "--advisor",
            "ceo-coach-001",
        ])
        .unwrap();

        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/board")));
        match cli.command {
            Commands::Ask {
                message,
                advisors,
                all,
            } => {
                assert_eq!(message, "Should we raise?");
                assert_eq!(advisors, vec!["cfo-001", "ceo-coach-001"]);
                assert!(!all);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_advisors_edit() {
        let cli = Cli::try_parse_from([
            "boardroom",
            "advisors",
            "edit",
            "custom-1700000000000",
            "--role",
            "Pricing Advisor",
            "--expertise",
            "Pricing",
            "--expertise",
            "Packaging",
        ])
        .unwrap();

        match cli.command {
            Commands::Advisors {
                action:
                    AdvisorsAction::Edit {
                        id,
                        name,
                        role,
                        expertise,
                        prompt,
                        ..
                    },
            } => {
                assert_eq!(id, "custom-1700000000000");
                assert!(name.is_none());
                assert_eq!(role.as_deref(), Some("Pricing Advisor"));
                assert_eq!(expertise, vec!["Pricing", "Packaging"]);
                assert!(prompt.is_none());
            }
            _ => panic!("expected advisors edit"),
        }
    }

    #[test]
    fn test_parse_docs_analyze() {
        let cli = Cli::try_parse_from([
            "boardroom",
            "docs",
            "analyze",
            "doc_1_abc",
            "--from",
            "analysis.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Docs {
                action: DocsAction::Analyze { id, from },
            } => {
                assert_eq!(id, "doc_1_abc");
                assert_eq!(from, PathBuf::from("analysis.json"));
            }
            _ => panic!("expected docs analyze"),
        }
    }

    #[test]
    fn test_docs_analyze_requires_file() {
        let result = Cli::try_parse_from(["boardroom", "docs", "analyze", "doc_1_abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_meetings_clear() {
        let cli = Cli::try_parse_from(["boardroom", "meetings", "clear", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Meetings {
                action: MeetingsAction::Clear { yes: true }
            }
        ));
    }

    #[test]
    fn test_ask_all_conflicts_with_advisor() {
        let result = Cli::try_parse_from([
            "boardroom", "ask", "Hi", "--all", "--advisor", "cfo-001",
        ]);
        assert!(result.is_err());
    }
}
