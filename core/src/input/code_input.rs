//! Fixed-length code capture across discrete character slots.
//!
//! This is a pure capture/assembly model: it knows nothing about
//! verification semantics, expiry, or the gateway. It collects uppercase
//! alphanumeric characters into slots and emits the assembled string.

/// Keystrokes the capture model understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character; rejected unless ASCII alphanumeric
    Char(char),
    Backspace,
    ArrowLeft,
    ArrowRight,
}

/// Events emitted by the capture model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeInputEvent {
    /// The assembled value changed
    Changed(String),
    /// Every slot is filled; fired exactly once per completed fill
    Completed(String),
}

/// Fixed-length code input over discrete character slots
#[derive(Debug, Clone)]
pub struct CodeInput {
    slots: Vec<Option<char>>,
    focus: usize,
    completed_emitted: bool,
}

impl CodeInput {
    /// Create an input with `length` slots (6 or 8 for the current purposes)
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "code input needs at least one slot");
        Self {
            slots: vec![None; length],
            focus: 0,
            completed_emitted: false,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// No slot holds a character
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Every slot holds a character
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Index of the focused slot
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Assembled value: the filled slots, in order
    pub fn value(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Empty all slots and return focus to the first one
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.focus = 0;
        self.completed_emitted = false;
    }

    /// Apply a keystroke to the focused slot
    pub fn press(&mut self, key: Key) -> Vec<CodeInputEvent> {
        match key {
            Key::Char(c) => self.insert_char(c),
            Key::Backspace => self.backspace(),
            Key::ArrowLeft => {
                self.focus = self.focus.saturating_sub(1);
                Vec::new()
            }
            Key::ArrowRight => {
                if self.focus + 1 < self.slots.len() {
                    self.focus += 1;
                }
                Vec::new()
            }
        }
    }

    /// Replace the content with pasted text: strip non-alphanumerics,
    /// uppercase, truncate to the slot count, and fill left-to-right.
    /// Focus lands on the first empty slot, or the last slot when full.
    pub fn paste(&mut self, text: &str) -> Vec<CodeInputEvent> {
        let sanitized: Vec<char> = text
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .take(self.slots.len())
            .collect();
        if sanitized.is_empty() {
            return Vec::new();
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = sanitized.get(index).copied();
        }
        self.focus = sanitized.len().min(self.slots.len() - 1);
        // a paste is a new fill, even when it lands on an already-full input
        self.completed_emitted = false;
        self.emit_after_change()
    }

    fn insert_char(&mut self, c: char) -> Vec<CodeInputEvent> {
        if !c.is_ascii_alphanumeric() {
            return Vec::new();
        }
        self.slots[self.focus] = Some(c.to_ascii_uppercase());
        if self.focus + 1 < self.slots.len() {
            self.focus += 1;
        }
        self.emit_after_change()
    }

    fn backspace(&mut self) -> Vec<CodeInputEvent> {
        if self.slots[self.focus].is_some() {
            self.slots[self.focus] = None;
            self.emit_after_change()
        } else {
            // empty slot: move focus back without deleting in the previous slot
            self.focus = self.focus.saturating_sub(1);
            Vec::new()
        }
    }

    fn emit_after_change(&mut self) -> Vec<CodeInputEvent> {
        let value = self.value();
        let mut events = vec![CodeInputEvent::Changed(value.clone())];
        if self.is_complete() {
            if !self.completed_emitted {
                self.completed_emitted = true;
                events.push(CodeInputEvent::Completed(value));
            }
        } else {
            // re-arm once the content regresses below a full fill
            self.completed_emitted = false;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut CodeInput, text: &str) -> Vec<CodeInputEvent> {
        let mut events = Vec::new();
        for c in text.chars() {
            events.extend(input.press(Key::Char(c)));
        }
        events
    }

    #[test]
    fn test_typing_assembles_uppercased() {
        let mut input = CodeInput::new(6);
        let events = type_str(&mut input, "a1b2c3");

        assert_eq!(input.value(), "A1B2C3");
        assert_eq!(
            events.first(),
            Some(&CodeInputEvent::Changed("A".to_string()))
        );
        assert_eq!(
            events.last(),
            Some(&CodeInputEvent::Completed("A1B2C3".to_string()))
        );
        // one Changed per keystroke plus a single Completed
        assert_eq!(events.len(), 7);
    }

    #[test]
    fn test_non_alphanumeric_keystrokes_are_rejected() {
        let mut input = CodeInput::new(6);
        assert!(input.press(Key::Char('#')).is_empty());
        assert!(input.press(Key::Char(' ')).is_empty());
        assert!(input.press(Key::Char('한')).is_empty());
        assert_eq!(input.value(), "");
        assert_eq!(input.focus(), 0);
    }

    #[test]
    fn test_paste_full_code_fires_completed_once() {
        let mut input = CodeInput::new(6);
        let events = input.paste("AB12CD");
        assert_eq!(
            events,
            vec![
                CodeInputEvent::Changed("AB12CD".to_string()),
                CodeInputEvent::Completed("AB12CD".to_string()),
            ]
        );
        assert_eq!(input.focus(), 5);
    }

    #[test]
    fn test_paste_sanitizes_and_stays_incomplete() {
        let mut input = CodeInput::new(6);
        let events = input.paste("ab##12");
        assert_eq!(events, vec![CodeInputEvent::Changed("AB12".to_string())]);
        assert_eq!(input.value(), "AB12");
        assert!(!input.is_complete());
        // focus on the first empty slot
        assert_eq!(input.focus(), 4);
    }

    #[test]
    fn test_paste_truncates_overlong_text() {
        let mut input = CodeInput::new(6);
        let events = input.paste("A1B2C3D4E5");
        assert_eq!(input.value(), "A1B2C3");
        assert!(events.contains(&CodeInputEvent::Completed("A1B2C3".to_string())));
    }

    #[test]
    fn test_backspace_on_filled_slot_clears_in_place() {
        let mut input = CodeInput::new(6);
        type_str(&mut input, "A1B2C3");
        // focus stuck on the last slot, which is filled
        let events = input.press(Key::Backspace);
        assert_eq!(events, vec![CodeInputEvent::Changed("A1B2C".to_string())]);
        assert_eq!(input.focus(), 5);
    }

    #[test]
    fn test_backspace_on_empty_slot_moves_focus_only() {
        let mut input = CodeInput::new(6);
        type_str(&mut input, "A1");
        // focus is on slot 2, which is empty
        let events = input.press(Key::Backspace);
        assert!(events.is_empty());
        assert_eq!(input.focus(), 1);
        assert_eq!(input.value(), "A1");

        // a second backspace now clears slot 1 in place
        let events = input.press(Key::Backspace);
        assert_eq!(events, vec![CodeInputEvent::Changed("A".to_string())]);
    }

    #[test]
    fn test_arrows_move_focus_without_touching_content() {
        let mut input = CodeInput::new(6);
        type_str(&mut input, "A1B");
        assert_eq!(input.focus(), 3);

        input.press(Key::ArrowLeft);
        input.press(Key::ArrowLeft);
        assert_eq!(input.focus(), 1);
        input.press(Key::ArrowRight);
        assert_eq!(input.focus(), 2);
        assert_eq!(input.value(), "A1B");

        // bounds are clamped
        for _ in 0..10 {
            input.press(Key::ArrowLeft);
        }
        assert_eq!(input.focus(), 0);
        for _ in 0..10 {
            input.press(Key::ArrowRight);
        }
        assert_eq!(input.focus(), 5);
    }

    #[test]
    fn test_completed_rearms_after_regression() {
        let mut input = CodeInput::new(4);
        type_str(&mut input, "AB12");
        // delete the last character, then retype it
        input.press(Key::Backspace);
        let events = input.press(Key::Char('2'));
        assert!(events.contains(&CodeInputEvent::Completed("AB12".to_string())));
    }

    #[test]
    fn test_overtyping_last_slot_does_not_refire_completed() {
        let mut input = CodeInput::new(4);
        type_str(&mut input, "AB12");
        let events = input.press(Key::Char('9'));
        assert_eq!(events, vec![CodeInputEvent::Changed("AB19".to_string())]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut input = CodeInput::new(6);
        type_str(&mut input, "A1B2C3");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.focus(), 0);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_eight_slot_input_for_long_codes() {
        let mut input = CodeInput::new(8);
        let events = input.paste("deadbeef");
        assert!(events.contains(&CodeInputEvent::Completed("DEADBEEF".to_string())));
    }
}
