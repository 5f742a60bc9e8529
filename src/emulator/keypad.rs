use crate::emulator::error::Error;

pub const NUM_KEYS: usize = 16;

/// Pressed/released state of the sixteen hexadecimal keys.
/// Written by the host, read by the skip and wait instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn set(&mut self, key: u8, pressed: bool) -> Result<(), Error> {
        let slot = self
            .pressed
            .get_mut(key as usize)
            .ok_or(Error::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    /// Keys outside the keypad are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// Release and return the lowest pressed key, if any.
    pub fn take_first_pressed(&mut self) -> Option<u8> {
        let key = self.pressed.iter().position(|pressed| *pressed)?;
        self.pressed[key] = false;
        Some(key as u8)
    }

    pub fn pressed(&self) -> [bool; NUM_KEYS] {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_keys_outside_the_pad() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.set(0x10, true), Err(Error::InvalidKey(0x10)));
        assert!(!keypad.is_pressed(0x10));
    }

    #[test]
    fn takes_the_lowest_pressed_key() {
        let mut keypad = Keypad::new();
        keypad.set(0xC, true).unwrap();
        keypad.set(0x3, true).unwrap();
        assert_eq!(keypad.take_first_pressed(), Some(0x3));
        assert!(!keypad.is_pressed(0x3));
        assert!(keypad.is_pressed(0xC));
        assert_eq!(keypad.take_first_pressed(), Some(0xC));
        assert_eq!(keypad.take_first_pressed(), None);
    }
}
