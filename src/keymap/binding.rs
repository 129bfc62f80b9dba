//! Key strings like "ctrl+s", "shift+tab" or "?" and the bindings built on them

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single key binding mapping a key combination to an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string (e.g., "enter", "ctrl+r", "shift+tab")
    pub key: String,

    pub action: Action,

    /// Optional description override (uses action description if None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A key combination as crossterm reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl ParsedKey {
    /// Normalize terminal quirks so equal chords compare equal.
    ///
    /// Shift+Tab arrives as `BackTab`, and typed symbols carry `SHIFT`
    /// depending on the terminal, so shift is dropped for characters.
    pub fn normalized(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::BackTab => Self {
                code: KeyCode::BackTab,
                modifiers: modifiers - KeyModifiers::SHIFT,
            },
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => Self {
                code: KeyCode::BackTab,
                modifiers: modifiers - KeyModifiers::SHIFT,
            },
            KeyCode::Char(c) => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: if c.is_ascii_uppercase() {
                    modifiers | KeyModifiers::SHIFT
                } else if c.is_ascii_alphanumeric() {
                    modifiers
                } else {
                    modifiers - KeyModifiers::SHIFT
                },
            },
            _ => Self { code, modifiers },
        }
    }

    /// True for keys that type text: a printable character with no
    /// Ctrl/Alt/Super modifier
    pub fn is_text(&self) -> bool {
        matches!(self.code, KeyCode::Char(_))
            && !self
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    }
}

impl FromStr for ParsedKey {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim().to_lowercase();
        // A trailing "+" is the plus key itself ("ctrl++")
        let (prefix, last) = match key.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None if key == "+" => ("", "+"),
            None => key.rsplit_once('+').unwrap_or(("", key.as_str())),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            modifiers |= match part {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                "super" | "meta" | "cmd" | "command" => KeyModifiers::SUPER,
                _ => return Err(format!("Unknown modifier: {part}")),
            };
        }

        let code = parse_key_code(last)?;
        Ok(Self::normalized(code, modifiers))
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
            description: None,
        }
    }

    /// Check if this binding matches the given key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.parse()
            .is_ok_and(|parsed| parsed == ParsedKey::normalized(code, modifiers))
    }

    pub fn parse(&self) -> Result<ParsedKey, String> {
        self.key.parse()
    }

    /// Display string for this binding (e.g., "Ctrl+R")
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }

    /// The custom description, or the action's
    pub fn get_description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.action.description())
    }
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let code = match key {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unknown key: {key}")),
            }
        }
    };
    Ok(code)
}

/// Format a key string for display (e.g., "ctrl+r" -> "Ctrl+R")
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "ctrl" | "control" => "Ctrl".to_string(),
                "alt" | "option" => "Alt".to_string(),
                "shift" => "Shift".to_string(),
                "super" | "meta" | "cmd" | "command" => "Cmd".to_string(),
                "up" => "↑".to_string(),
                "down" => "↓".to_string(),
                "left" => "←".to_string(),
                "right" => "→".to_string(),
                "enter" | "return" => "Enter".to_string(),
                "esc" | "escape" => "Esc".to_string(),
                "space" => "Space".to_string(),
                "tab" => "Tab".to_string(),
                "backtab" => "Shift+Tab".to_string(),
                "backspace" | "bs" => "Backspace".to_string(),
                "delete" | "del" => "Del".to_string(),
                "pageup" | "pgup" => "PgUp".to_string(),
                "pagedown" | "pgdn" => "PgDn".to_string(),
                "home" => "Home".to_string(),
                "end" => "End".to_string(),
                _ => part.to_uppercase(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(key: &str) -> ParsedKey {
        key.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_and_chord() {
        assert_eq!(
            parse("ctrl+r"),
            ParsedKey {
                code: KeyCode::Char('r'),
                modifiers: KeyModifiers::CONTROL
            }
        );
        assert_eq!(parse("enter").code, KeyCode::Enter);
        assert_eq!(parse("space").code, KeyCode::Char(' '));
        assert_eq!(parse("f1").code, KeyCode::F(1));
        assert_eq!(parse("F12").code, KeyCode::F(12));
        assert!("f13".parse::<ParsedKey>().is_err());
        assert!("hyper+x".parse::<ParsedKey>().is_err());
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse("+").code, KeyCode::Char('+'));
        let chord = parse("ctrl++");
        assert_eq!(chord.code, KeyCode::Char('+'));
        assert_eq!(chord.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_shift_tab_matches_backtab() {
        let binding = KeyBinding::new("shift+tab", Action::PrevField);
        assert!(binding.matches(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert!(binding.matches(KeyCode::BackTab, KeyModifiers::NONE));
        assert!(!binding.matches(KeyCode::Tab, KeyModifiers::NONE));
    }

    #[test]
    fn test_symbol_matches_with_or_without_shift() {
        let binding = KeyBinding::new("?", Action::Help);
        assert!(binding.matches(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert!(binding.matches(KeyCode::Char('?'), KeyModifiers::NONE));
    }

    #[test]
    fn test_ctrl_binding_does_not_match_plain_key() {
        let binding = KeyBinding::new("ctrl+s", Action::Submit);
        assert!(binding.matches(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!binding.matches(KeyCode::Char('s'), KeyModifiers::NONE));
    }

    #[test]
    fn test_is_text() {
        assert!(ParsedKey::normalized(KeyCode::Char('q'), KeyModifiers::NONE).is_text());
        assert!(ParsedKey::normalized(KeyCode::Char('Q'), KeyModifiers::SHIFT).is_text());
        assert!(!ParsedKey::normalized(KeyCode::Char('q'), KeyModifiers::CONTROL).is_text());
        assert!(!ParsedKey::normalized(KeyCode::Enter, KeyModifiers::NONE).is_text());
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key_display("ctrl+o"), "Ctrl+O");
        assert_eq!(format_key_display("up"), "↑");
        assert_eq!(format_key_display("shift+tab"), "Shift+Tab");
        assert_eq!(format_key_display("f1"), "F1");
    }

    #[test]
    fn test_key_binding_description() {
        let binding = KeyBinding::new("ctrl+r", Action::SwitchRole);
        assert_eq!(binding.get_description(), "Switch buyer/seller");
    }
}
