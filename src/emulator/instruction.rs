use crate::emulator::error::Error;
use crate::emulator::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Sys(Addr), // 0NNN
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
}

impl Instruction {
    pub fn from_two_u8(left: u8, right: u8) -> Result<Instruction, Error> {
        Instruction::decode(Opcode::from_two_u8(left, right))
    }

    pub fn from_u16(value: u16) -> Result<Instruction, Error> {
        Instruction::decode(Opcode(value))
    }

    /// Classify an opcode by its top nibble, then by the sub-opcode
    /// or low byte for the families that share a class.
    pub fn decode(opcode: Opcode) -> Result<Instruction, Error> {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let kk = Const(opcode.kk());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.class() {
            0x0 => match opcode.as_u16() {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => Instruction::Sys(nnn),
            },
            0x1 => Instruction::Goto(nnn),
            0x2 => Instruction::Call(nnn),
            0x3 => Instruction::IfRegEqConst(x, kk),
            0x4 => Instruction::IfRegNeqConst(x, kk),
            0x5 if opcode.n() == 0 => Instruction::IfRegEqReg(x, y),
            0x6 => Instruction::SetRegToConst(x, kk),
            0x7 => Instruction::IncRegByConst(x, kk),
            0x8 => match opcode.n() {
                0x0 => Instruction::SetRegToReg(x, y),
                0x1 => Instruction::BitwiseOr(x, y),
                0x2 => Instruction::BitwiseAnd(x, y),
                0x3 => Instruction::BitwiseXor(x, y),
                0x4 => Instruction::IncRegByReg(x, y),
                0x5 => Instruction::DecRegByReg(x, y),
                0x6 => Instruction::BitshiftRight(x, y),
                0x7 => Instruction::SetVxVyMinusVx(x, y),
                0xE => Instruction::BitshiftLeft(x, y),
                _ => return Err(unsupported(opcode)),
            },
            0x9 if opcode.n() == 0 => Instruction::IfRegNeqReg(x, y),
            0xA => Instruction::SetI(nnn),
            0xB => Instruction::SetPcToV0PlusAddr(nnn),
            0xC => Instruction::SetVxRand(x, kk),
            0xD => Instruction::Draw(x, y, Const(opcode.n())),
            0xE => match opcode.kk() {
                0x9E => Instruction::IfKeyEqVx(x),
                0xA1 => Instruction::IfKeyNeqVx(x),
                _ => return Err(unsupported(opcode)),
            },
            0xF => match opcode.kk() {
                0x07 => Instruction::SetRegToDelayTimer(x),
                0x0A => Instruction::SetRegToGetKey(x),
                0x15 => Instruction::SetDelayTimerToReg(x),
                0x18 => Instruction::SetSoundTimerToReg(x),
                0x1E => Instruction::AddRegToI(x),
                0x29 => Instruction::SetIToSpriteAddrVx(x),
                0x33 => Instruction::SetIToBcdOfReg(x),
                0x55 => Instruction::RegDump(x),
                0x65 => Instruction::RegLoad(x),
                _ => return Err(unsupported(opcode)),
            },
            _ => return Err(unsupported(opcode)),
        };

        Ok(instruction)
    }
}

fn unsupported(opcode: Opcode) -> Error {
    Error::UnsupportedInstruction(opcode.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }

    #[test_case(0x00E0 => Instruction::ClearScreen ; "clear screen")]
    #[test_case(0x00EE => Instruction::Return ; "return from subroutine")]
    #[test_case(0x0123 => Instruction::Sys(Addr(0x123)) ; "legacy sys call")]
    #[test_case(0x1025 => Instruction::Goto(Addr(0x25)) ; "goto")]
    #[test_case(0x2037 => Instruction::Call(Addr(0x37)) ; "call")]
    #[test_case(0x3315 => Instruction::IfRegEqConst(Reg(3), Const(0x15)) ; "skip if equal const")]
    #[test_case(0x4AFF => Instruction::IfRegNeqConst(Reg(0xA), Const(0xFF)) ; "skip if not equal const")]
    #[test_case(0x5120 => Instruction::IfRegEqReg(Reg(1), Reg(2)) ; "skip if equal reg")]
    #[test_case(0x6305 => Instruction::SetRegToConst(Reg(3), Const(5)) ; "load const")]
    #[test_case(0x7310 => Instruction::IncRegByConst(Reg(3), Const(0x10)) ; "add const")]
    #[test_case(0x8AB0 => Instruction::SetRegToReg(Reg(0xA), Reg(0xB)) ; "copy reg")]
    #[test_case(0x8AB1 => Instruction::BitwiseOr(Reg(0xA), Reg(0xB)) ; "or")]
    #[test_case(0x8AB2 => Instruction::BitwiseAnd(Reg(0xA), Reg(0xB)) ; "and")]
    #[test_case(0x8AB3 => Instruction::BitwiseXor(Reg(0xA), Reg(0xB)) ; "xor")]
    #[test_case(0x8AB4 => Instruction::IncRegByReg(Reg(0xA), Reg(0xB)) ; "add reg")]
    #[test_case(0x8AB5 => Instruction::DecRegByReg(Reg(0xA), Reg(0xB)) ; "sub reg")]
    #[test_case(0x8AB6 => Instruction::BitshiftRight(Reg(0xA), Reg(0xB)) ; "shift right")]
    #[test_case(0x8AB7 => Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)) ; "reverse sub")]
    #[test_case(0x8ABE => Instruction::BitshiftLeft(Reg(0xA), Reg(0xB)) ; "shift left")]
    #[test_case(0x9120 => Instruction::IfRegNeqReg(Reg(1), Reg(2)) ; "skip if not equal reg")]
    #[test_case(0xA12E => Instruction::SetI(Addr(0x12E)) ; "set index")]
    #[test_case(0xB300 => Instruction::SetPcToV0PlusAddr(Addr(0x300)) ; "indexed jump")]
    #[test_case(0xC4F0 => Instruction::SetVxRand(Reg(4), Const(0xF0)) ; "random")]
    #[test_case(0xD125 => Instruction::Draw(Reg(1), Reg(2), Const(5)) ; "draw")]
    #[test_case(0xE59E => Instruction::IfKeyEqVx(Reg(5)) ; "skip if key")]
    #[test_case(0xE5A1 => Instruction::IfKeyNeqVx(Reg(5)) ; "skip if not key")]
    #[test_case(0xF207 => Instruction::SetRegToDelayTimer(Reg(2)) ; "read delay")]
    #[test_case(0xF20A => Instruction::SetRegToGetKey(Reg(2)) ; "wait key")]
    #[test_case(0xF215 => Instruction::SetDelayTimerToReg(Reg(2)) ; "set delay")]
    #[test_case(0xF218 => Instruction::SetSoundTimerToReg(Reg(2)) ; "set sound")]
    #[test_case(0xF21E => Instruction::AddRegToI(Reg(2)) ; "add to index")]
    #[test_case(0xF229 => Instruction::SetIToSpriteAddrVx(Reg(2)) ; "font address")]
    #[test_case(0xF133 => Instruction::SetIToBcdOfReg(Reg(1)) ; "bcd")]
    #[test_case(0xF355 => Instruction::RegDump(Reg(3)) ; "store registers")]
    #[test_case(0xF365 => Instruction::RegLoad(Reg(3)) ; "load registers")]
    fn opcodes_are_parsed_correctly(word: u16) -> Instruction {
        Instruction::from_u16(word).unwrap()
    }

    #[test_case(0x5121 ; "skip if equal with nonzero low nibble")]
    #[test_case(0x9121 ; "skip if not equal with nonzero low nibble")]
    #[test_case(0x8AB8 ; "arithmetic sub opcode 8")]
    #[test_case(0x8ABF ; "arithmetic sub opcode f")]
    #[test_case(0xE500 ; "key family low byte 00")]
    #[test_case(0xF000 ; "timer family low byte 00")]
    #[test_case(0xF0FF ; "timer family low byte ff")]
    fn unknown_opcodes_are_reported(word: u16) {
        assert_eq!(Instruction::from_u16(word), Err(Error::UnsupportedInstruction(word)));
    }
}
