/// A raw instruction word with accessors for its bit fields.
///
/// Given the word `0xABCD`:
/// - `class` is `0xA` (bits 12-15)
/// - `x` is `0xB` (bits 8-11)
/// - `y` is `0xC` (bits 4-7)
/// - `n` is `0xD` (bits 0-3)
/// - `kk` is `0xCD` (bits 0-7)
/// - `nnn` is `0xBCD` (bits 0-11)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Join two bytes stored big-endian in memory.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn class(self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Opcode {
        Opcode(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fields_of_abcd() {
        let opcode = Opcode(0xABCD);
        assert_eq!(opcode.class(), 0xA);
        assert_eq!(opcode.x(), 0xB);
        assert_eq!(opcode.y(), 0xC);
        assert_eq!(opcode.n(), 0xD);
        assert_eq!(opcode.kk(), 0xCD);
        assert_eq!(opcode.nnn(), 0xBCD);
    }

    #[test]
    fn from_two_u8_is_big_endian() {
        assert_eq!(Opcode::from_two_u8(0x12, 0x34), Opcode(0x1234));
        assert_eq!(Opcode::from_two_u8(0xFF, 0x00), Opcode(0xFF00));
        assert_eq!(Opcode::from_two_u8(0x00, 0xFF), Opcode(0x00FF));
    }

    proptest! {
        #[test]
        fn nibbles_reassemble_the_word(word in any::<u16>()) {
            let opcode = Opcode(word);
            let rebuilt = (opcode.class() as u16) << 12
                | (opcode.x() as u16) << 8
                | (opcode.y() as u16) << 4
                | opcode.n() as u16;
            prop_assert_eq!(rebuilt, word);
            prop_assert_eq!(opcode.nnn(), word & 0xFFF);
            prop_assert_eq!(opcode.kk() as u16, word & 0xFF);
        }
    }
}
