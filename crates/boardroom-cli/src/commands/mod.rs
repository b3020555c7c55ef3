pub mod advisors;
pub mod ask;
pub mod docs;
pub mod meetings;
pub mod profile;
pub mod reset;
pub mod serve;

use boardroom_core::state::SaveOutcome;

/// Warns on stderr when a change was not fully written to disk.
pub fn report_save(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Full => {}
        SaveOutcome::Minimal => {
            eprintln!("Warning: storage is full; meeting history was not saved.")
        }
        SaveOutcome::SkippedOversize => {
            eprintln!("Warning: state is too large to save; the change lasts only for this run.")
        }
        SaveOutcome::Failed => eprintln!("Warning: failed to save state."),
    }
}
