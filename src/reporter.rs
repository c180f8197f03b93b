use tracing::debug;

use crate::types::Announcement;

/// Emit an announcement as a single JSON line to stdout.
///
/// This is the boundary to the actual announcer (text-to-speech, overlay);
/// nothing observable comes back.
pub fn report_announcement(announcement: &Announcement) {
    debug!("announcing {}", announcement.outcome);
    if let Ok(json) = serde_json::to_string(announcement) {
        println!("{json}");
    }
}
