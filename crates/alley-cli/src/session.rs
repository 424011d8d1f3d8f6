// Session module - caches the login token under ~/.alley/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Saved login session.
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

fn session_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME not set")?;
    Ok(PathBuf::from(home).join(".alley"))
}

fn session_file() -> Result<PathBuf> {
    Ok(session_dir()?.join("session.json"))
}

/// Persists the session to ~/.alley/session.json.
pub fn save(session: &Session) -> Result<()> {
    let dir = session_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(session)?;
    let path = session_file()?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Loads a saved session, if any.
pub fn load() -> Result<Option<Session>> {
    let path = session_file()?;
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let session = serde_json::from_str(&content)
        .with_context(|| format!("Corrupt session file at {}", path.display()))?;
    Ok(Some(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip_through_json() {
        let session = Session {
            token: "abc.def.ghi".to_string(),
            email: "artist@example.com".to_string(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.token, session.token);
        assert_eq!(parsed.email, session.email);
    }
}
