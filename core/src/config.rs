//! Behavior switches for `TodoController`.

use std::fmt;
use std::str::FromStr;

/// What the completion control does to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleMode {
    /// Send `!completed`.
    #[default]
    Flip,
    /// Always send `completed = true`; a done row cannot be reopened.
    MarkDone,
}

impl ToggleMode {
    pub fn target(self, current: bool) -> bool {
        match self {
            ToggleMode::Flip => !current,
            ToggleMode::MarkDone => true,
        }
    }
}

impl FromStr for ToggleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flip" => Ok(ToggleMode::Flip),
            "mark-done" | "mark_done" | "markdone" => Ok(ToggleMode::MarkDone),
            other => Err(format!("unknown toggle mode `{other}` (expected `flip` or `mark-done`)")),
        }
    }
}

impl fmt::Display for ToggleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleMode::Flip => f.write_str("flip"),
            ToggleMode::MarkDone => f.write_str("mark-done"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub toggle: ToggleMode,
    /// Re-fetch the list whenever a draft field or the edit target changes.
    /// Off by default: the list is refreshed after confirmed mutations only.
    pub refresh_on_input: bool,
    /// Queue an error notification when a mutation fails. Failed refreshes
    /// are only logged either way.
    pub notify_failures: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            toggle: ToggleMode::Flip,
            refresh_on_input: false,
            notify_failures: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_targets() {
        assert!(ToggleMode::Flip.target(false));
        assert!(!ToggleMode::Flip.target(true));
        assert!(ToggleMode::MarkDone.target(false));
        assert!(ToggleMode::MarkDone.target(true));
    }

    #[test]
    fn toggle_mode_parses_and_displays() {
        assert_eq!("flip".parse::<ToggleMode>().unwrap(), ToggleMode::Flip);
        assert_eq!(" Mark-Done ".parse::<ToggleMode>().unwrap(), ToggleMode::MarkDone);
        assert!("sideways".parse::<ToggleMode>().is_err());
        assert_eq!(ToggleMode::MarkDone.to_string(), "mark-done");
    }
}
