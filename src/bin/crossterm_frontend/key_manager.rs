use super::crossterm_io::key_to_u8;

use crossterm::event::{poll, read, Event, KeyCode};
use std::time::{Duration, Instant};

/// Terminals report key presses but not releases,
/// so a key counts as held for this long after its last press.
pub const KEY_HOLD: Duration = Duration::from_millis(250);

/// Host controls, as opposed to keypad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    Step,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Press(u8),
    Release(u8),
    Command(Command),
}

/// Turns terminal events into keypad presses and releases.
pub struct KeyManager {
    hold: Duration,
    last_pressed: [Option<Instant>; 16],
}

impl KeyManager {
    pub fn new(hold: Duration) -> KeyManager {
        KeyManager {
            hold,
            last_pressed: [None; 16],
        }
    }

    /// Drain every pending terminal event without blocking.
    pub fn poll(&mut self) -> crossterm::Result<Vec<Input>> {
        let mut inputs = Vec::new();
        while poll(Duration::from_secs(0))? {
            if let Event::Key(key_event) = read()? {
                log::debug!("Got event {:?}", key_event);
                if let Some(input) = self.translate(key_event.code, Instant::now()) {
                    inputs.push(input);
                }
            }
        }
        inputs.extend(self.expire(Instant::now()));
        Ok(inputs)
    }

    fn translate(&mut self, code: KeyCode, now: Instant) -> Option<Input> {
        let command = match code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('p') => Some(Command::TogglePause),
            KeyCode::Char('n') => Some(Command::Step),
            KeyCode::Char('0') => Some(Command::Restart),
            _ => None,
        };
        if let Some(command) = command {
            return Some(Input::Command(command));
        }

        let key = key_to_u8(code)?;
        self.last_pressed[key as usize] = Some(now);
        Some(Input::Press(key))
    }

    /// Release keys that have not been pressed again within the hold time.
    fn expire(&mut self, now: Instant) -> Vec<Input> {
        let hold = self.hold;
        let mut released = Vec::new();
        for (key, last_pressed) in self.last_pressed.iter_mut().enumerate() {
            if let Some(at) = *last_pressed {
                if now.duration_since(at) >= hold {
                    *last_pressed = None;
                    released.push(Input::Release(key as u8));
                }
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_released_after_the_hold_time() {
        let mut manager = KeyManager::new(Duration::from_millis(100));
        let start = Instant::now();
        assert_eq!(manager.translate(KeyCode::Char('w'), start), Some(Input::Press(0x5)));
        assert_eq!(manager.expire(start + Duration::from_millis(50)), vec![]);
        assert_eq!(
            manager.expire(start + Duration::from_millis(100)),
            vec![Input::Release(0x5)]
        );
        assert_eq!(manager.expire(start + Duration::from_millis(200)), vec![]);
    }

    #[test]
    fn control_keys_are_commands() {
        let mut manager = KeyManager::new(KEY_HOLD);
        let now = Instant::now();
        assert_eq!(manager.translate(KeyCode::Esc, now), Some(Input::Command(Command::Quit)));
        assert_eq!(
            manager.translate(KeyCode::Char('p'), now),
            Some(Input::Command(Command::TogglePause))
        );
        assert_eq!(manager.translate(KeyCode::Char('m'), now), None);
    }
}
