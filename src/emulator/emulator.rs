//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emulator::config::{Config, ShiftSource};
use crate::emulator::display::Display;
use crate::emulator::error::Error;
use crate::emulator::instruction::*;
use crate::emulator::keypad::{Keypad, NUM_KEYS};
use crate::emulator::memory::{Memory, FONT_START, FONT_STRIDE, PROGRAM_START};
use crate::emulator::run_state::RunState;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
const FLAG: usize = 0xF;
const ADDR_MASK: u16 = 0xFFF;

/// A copy of every register, for debugger views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDump {
    pub v: [u8; NUM_REGISTERS],
    pub index: u16,
    pub program_counter: u16,
    pub stack_pointer: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub current_opcode: Option<u16>,
}

pub struct Emulator {
    // Standard fields
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    display: Display,
    keypad: Keypad,

    current_opcode: Option<u16>,
    awaiting_key: Option<Reg>,
    run_state: RunState,
    config: Config,
    rng: StdRng,
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl Emulator {
    /// Create a new emulator with the modern interpreter behaviour
    pub fn new() -> Emulator {
        Emulator::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Emulator {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PROGRAM_START as u16,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            display: Display::new(),
            keypad: Keypad::new(),

            current_opcode: None,
            awaiting_key: None,
            run_state: RunState::Running,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make the random instruction deterministic.
    pub fn with_seed(mut self, seed: u64) -> Emulator {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Return to the power-on state, keeping the configuration.
    /// The program has to be loaded again.
    pub fn reset(&mut self) {
        let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
        *self = Emulator::with_config(self.config);
        self.rng = rng;
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        self.memory.load(program)?;
        log::info!("Loaded {} bytes", program.len());
        Ok(())
    }

    /// Run one cycle of the main loop: a single step, unless paused.
    /// Returns whether an instruction was executed.
    pub fn cycle(&mut self) -> Result<bool, Error> {
        match self.run_state {
            RunState::Paused => Ok(false),
            _ => self.step().map(|()| true),
        }
    }

    /// Fetch the instruction at the program counter and execute it.
    /// This also works while paused.
    pub fn step(&mut self) -> Result<(), Error> {
        self.ensure_not_halted()?;
        let result = match self.awaiting_key {
            // Still blocked on FX0A; poll the keypad again instead of refetching
            Some(reg) => self.advance_and_execute(Instruction::SetRegToGetKey(reg)),
            None => self
                .memory
                .word(self.program_counter)
                .and_then(|word| self.decode_and_execute(word)),
        };
        self.halt_on_error(result)
    }

    /// Execute `word` as if it had been fetched from the program counter.
    pub fn step_with(&mut self, word: u16) -> Result<(), Error> {
        self.ensure_not_halted()?;
        let result = self.decode_and_execute(word);
        self.halt_on_error(result)
    }

    /// Execute a single instruction, without touching the program counter first.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Error> {
        self.ensure_not_halted()?;
        let result = self.apply(instruction);
        self.halt_on_error(result)
    }

    /// Execute several instructions, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Error> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Halted(_) => {}
        }
    }

    pub fn decrement_delay_timer(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
    }

    pub fn decrement_sound_timer(&mut self) {
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Whether the host should currently be making a sound.
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), Error> {
        self.keypad.set(key, pressed)
    }

    pub fn press_key(&mut self, key: u8) -> Result<(), Error> {
        self.set_key(key, true)
    }

    pub fn release_key(&mut self, key: u8) -> Result<(), Error> {
        self.set_key(key, false)
    }

    pub fn keys(&self) -> [bool; NUM_KEYS] {
        self.keypad.pressed()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Read and clear the redraw-requested flag.
    pub fn take_redraw(&mut self) -> bool {
        self.display.take_redraw()
    }

    pub fn registers(&self) -> [u8; NUM_REGISTERS] {
        self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    /// Return addresses currently on the stack, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer as usize]
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_bytes()
    }

    /// The most recently executed instruction word.
    pub fn current_opcode(&self) -> Option<u16> {
        self.current_opcode
    }

    /// The register FX0A will store the next key press in, while blocked.
    pub fn awaiting_key(&self) -> Option<u8> {
        self.awaiting_key.map(|Reg(x)| x)
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn is_halted(&self) -> bool {
        self.run_state.halt_reason().is_some()
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn dump(&self) -> RegisterDump {
        RegisterDump {
            v: self.registers,
            index: self.i,
            program_counter: self.program_counter,
            stack_pointer: self.stack_pointer,
            delay_timer: self.delay_timer,
            sound_timer: self.sound_timer,
            current_opcode: self.current_opcode,
        }
    }

    fn ensure_not_halted(&self) -> Result<(), Error> {
        match self.run_state.halt_reason() {
            Some(reason) => Err(Error::Halted(Box::new(reason.clone()))),
            None => Ok(()),
        }
    }

    fn halt_on_error(&mut self, result: Result<(), Error>) -> Result<(), Error> {
        if let Err(error) = &result {
            log::error!("Halting at {:#05x}: {}", self.program_counter, error);
            self.run_state = RunState::Halted(error.clone());
        }
        result
    }

    fn decode_and_execute(&mut self, word: u16) -> Result<(), Error> {
        self.current_opcode = Some(word);
        let instruction = Instruction::from_u16(word)?;
        log::trace!("{:#05x}: {:#06x} {:?}", self.program_counter, word, instruction);
        self.advance_and_execute(instruction)
    }

    /// Each opcode is two bytes. On failure the program counter is left
    /// pointing at the faulting instruction.
    fn advance_and_execute(&mut self, instruction: Instruction) -> Result<(), Error> {
        let pc = self.program_counter;
        self.program_counter = pc.wrapping_add(2);
        let result = self.apply(instruction);
        if result.is_err() {
            self.program_counter = pc;
        }
        result
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    /// The value a shift instruction operates on.
    fn shift_operand(&self, x: u8, y: u8) -> u8 {
        match self.config.shift_source {
            ShiftSource::Vx => self.registers[x as usize],
            ShiftSource::Vy => self.registers[y as usize],
        }
    }

    /// Store a result and its flag. The flag is written last,
    /// so it wins when VX is VF.
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.registers[x as usize] = value;
        self.registers[FLAG] = flag as u8;
    }

    fn apply(&mut self, instruction: Instruction) -> Result<(), Error> {
        // Any other instruction abandons a pending key wait
        let was_waiting = self.awaiting_key.take().is_some();

        match instruction {
            // Jump to a native routine. Ignored by every modern interpreter.
            Instruction::Sys(Addr(addr)) => {
                log::debug!("Ignoring SYS {:#05x}", addr);
            }

            // Clear the screen
            Instruction::ClearScreen => {
                self.display.clear();
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Error::StackUnderflow);
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize]; // Jump back via stack
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize >= STACK_SIZE {
                    return Err(Error::StackOverflow);
                }
                self.stack[self.stack_pointer as usize] = self.program_counter; // Store current address
                self.stack_pointer += 1;
                self.program_counter = addr; // Jump to addr
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[x as usize] == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[x as usize] != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[x as usize] == self.registers[y as usize]);
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // Wraps around, and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
            }

            // VF is set to 1 if there is a carry, 0 otherwise.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.set_with_flag(x, sum, carry);
            }

            // VF is set to 0 if there is a borrow, 1 otherwise.
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.set_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }

            // VF gets the bit shifted out
            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let value = self.shift_operand(x, y);
                self.set_with_flag(x, value >> 1, value & 1 == 1);
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.set_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let value = self.shift_operand(x, y);
                self.set_with_flag(x, value << 1, value >> 7 == 1);
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[x as usize] != self.registers[y as usize]);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                let target = self.registers[0] as u16 + addr;
                if target > ADDR_MASK {
                    return Err(Error::AddressOutOfRange(target as u32));
                }
                self.program_counter = target;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                // Get coordinates
                let x_coord = self.registers[x as usize] as usize;
                let y_coord = self.registers[y as usize] as usize;

                // Get sprite, each row is 8 bits
                let sprite = self.memory.slice(self.i, sprite_height as usize)?;

                self.registers[FLAG] = 0;
                let any_collisions = self.display.draw_sprite(x_coord, y_coord, sprite);

                // Set VF collision flag
                self.registers[FLAG] = any_collisions as u8;
            }

            // Skip if the key in Vx is pressed
            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.registers[x as usize]));
            }

            // Skip if the key in Vx isn't pressed
            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.registers[x as usize]));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            // Get a key press. Without one, rewind so that this instruction
            // is polled again on the next step.
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.take_first_pressed() {
                Some(key) => {
                    log::debug!("Got key {:#x} into V{:X}", key, x);
                    self.registers[x as usize] = key;
                }
                None => {
                    if !was_waiting {
                        log::debug!("Waiting for a key press into V{:X}", x);
                    }
                    self.program_counter = self.program_counter.wrapping_sub(2);
                    self.awaiting_key = Some(Reg(x));
                }
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.registers[x as usize];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.registers[x as usize];
            }

            // Stays within the 12-bit address space
            Instruction::AddRegToI(Reg(x)) => {
                self.i = (self.i + self.registers[x as usize] as u16) & ADDR_MASK;
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = FONT_START as u16 + FONT_STRIDE * self.registers[x as usize] as u16;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.registers[x as usize];
                let digits = self.memory.slice_mut(self.i, 3)?;
                digits[0] = value / 100;
                digits[1] = value / 10 % 10;
                digits[2] = value % 10;
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let count = x as usize + 1;
                self.memory
                    .slice_mut(self.i, count)?
                    .copy_from_slice(&self.registers[..count]);
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                let values = self.memory.slice(self.i, count)?;
                self.registers[..count].copy_from_slice(values);
            }
        };

        Ok(())
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
