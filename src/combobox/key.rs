//! Keyboard input model for the combobox.

use std::convert::Infallible;
use std::str::FromStr;

/// Keys the combobox distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Home,
    End,
    /// A printable character
    Char(char),
    /// Anything else (Tab, Shift, Backspace, ...), by its key name
    Other(String),
}

impl FromStr for Key {
    type Err = Infallible;

    /// Parse a DOM-style key name. Legacy names (`Down`, `Up`, `Esc`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Home" => Key::Home,
            "End" => Key::End,
            "Space" => Key::Char(' '),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(s.to_string()),
                }
            }
        };
        Ok(key)
    }
}

/// A key press with the modifiers that affect the combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, alt: false }
    }

    pub fn with_alt(key: Key) -> Self {
        Self { key, alt: true }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

impl FromStr for KeyEvent {
    type Err = Infallible;

    /// `"Alt+ArrowDown"` sets the Alt modifier; everything else parses as a plain key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("Alt+") {
            Some(rest) if !rest.is_empty() => Ok(Self::with_alt(rest.parse()?)),
            _ => Ok(Self::new(s.parse()?)),
        }
    }
}

/// What the host should do with the native event after the combobox handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the browser default (form submit on Enter, scrolling on Home/End,
    /// focus change on option mouse-down)
    pub prevent_default: bool,
    /// Keep the event from reaching enclosing handlers
    pub stop_propagation: bool,
}

impl EventResponse {
    pub const NONE: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
        stop_propagation: false,
    };
    pub const CONSUMED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("ArrowDown".parse::<Key>().unwrap(), Key::ArrowDown);
        assert_eq!("Down".parse::<Key>().unwrap(), Key::ArrowDown);
        assert_eq!("Up".parse::<Key>().unwrap(), Key::ArrowUp);
        assert_eq!("Esc".parse::<Key>().unwrap(), Key::Escape);
        assert_eq!("Home".parse::<Key>().unwrap(), Key::Home);
        assert_eq!("End".parse::<Key>().unwrap(), Key::End);
    }

    #[test]
    fn test_parse_characters_and_other() {
        assert_eq!("a".parse::<Key>().unwrap(), Key::Char('a'));
        assert_eq!("/".parse::<Key>().unwrap(), Key::Char('/'));
        assert_eq!("é".parse::<Key>().unwrap(), Key::Char('é'));
        assert_eq!("Space".parse::<Key>().unwrap(), Key::Char(' '));
        assert_eq!("Tab".parse::<Key>().unwrap(), Key::Other("Tab".into()));
    }

    #[test]
    fn test_parse_alt_modifier() {
        let event: KeyEvent = "Alt+Down".parse().unwrap();
        assert_eq!(event, KeyEvent::with_alt(Key::ArrowDown));

        let plain: KeyEvent = "Alt+".parse().unwrap();
        assert_eq!(plain, KeyEvent::new(Key::Other("Alt+".into())));
    }
}
