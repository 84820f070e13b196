use serde::{Deserialize, Serialize};
use web_sys::window;

const STORAGE_KEY: &str = "aurelia.popup";

/// Popup suppression that survives a reload but not the browser session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    #[serde(default)]
    pub popup_dismissed: bool,
    #[serde(default)]
    pub exit_intent_fired: bool,
}

impl SessionFlags {
    /// Garbage in storage counts as a fresh session.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn load() -> Self {
        window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok())
            .flatten()
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        let Some(storage) = window().and_then(|w| w.session_storage().ok()).flatten() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(raw) => {
                if storage.set_item(STORAGE_KEY, &raw).is_err() {
                    log::warn!("sessionStorage rejected popup flags");
                }
            }
            Err(e) => log::warn!("failed to encode popup flags: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tolerates_missing_and_bad_input() {
        assert_eq!(SessionFlags::parse(""), SessionFlags::default());
        assert_eq!(SessionFlags::parse("not json"), SessionFlags::default());
        assert_eq!(
            SessionFlags::parse(r#"{"popup_dismissed":true}"#),
            SessionFlags { popup_dismissed: true, exit_intent_fired: false }
        );
    }
}
