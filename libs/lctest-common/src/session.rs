/// Judge CLI session lookup
///
/// The judge CLI keeps the signed-in user in a JSON file with a `login`
/// field. Anything else (missing file, bad JSON, blank login) is signed out.

use crate::types::UserStatus;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SessionFile {
    #[serde(default)]
    login: Option<String>,
}

/// Read the user's status from a session file
pub fn read_user_status(session_file: &Path) -> UserStatus {
    let content = match fs::read_to_string(session_file) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %session_file.display(), error = %e, "Session file unreadable");
            return UserStatus::SignedOut;
        }
    };

    match serde_json::from_str::<SessionFile>(&content) {
        Ok(SessionFile { login: Some(login) }) if !login.trim().is_empty() => {
            UserStatus::SignedIn(login)
        }
        Ok(_) => UserStatus::SignedOut,
        Err(e) => {
            tracing::warn!(path = %session_file.display(), error = %e, "Session file is not valid JSON");
            UserStatus::SignedOut
        }
    }
}
