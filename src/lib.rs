pub mod api;
pub mod config;
pub mod deploy;
pub mod error;
pub mod models;
pub mod platform_client;

pub use crate::config::Config;
pub use deploy::{DeploySettings, Orchestrator, PollSettings};
pub use error::DeployError;
pub use models::*;
pub use platform_client::{PlatformApi, PlatformClient};

/// Longest project name the platform accepts.
pub const MAX_PROJECT_NAME_LEN: usize = 50;

/// Normalizes free text into a platform-safe project name.
/// Lowercases, maps every char outside `[a-z0-9-]` to `-`, collapses runs of `-`,
/// then caps the collapsed result at [`MAX_PROJECT_NAME_LEN`] chars.
pub fn sanitize_project_name(raw: &str) -> String {
    let mut sanitized = String::with_capacity(raw.len());
    for ch in raw.to_lowercase().chars() {
        let ch = match ch {
            'a'..='z' | '0'..='9' | '-' => ch,
            _ => '-',
        };
        if ch == '-' && sanitized.ends_with('-') {
            continue;
        }
        sanitized.push(ch);
    }
    // Only ASCII is left, so byte and char lengths agree.
    sanitized.truncate(MAX_PROJECT_NAME_LEN);
    sanitized
}
