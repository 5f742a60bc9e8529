/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

The library is the interpreter core: memory, registers, stack, timers, the
framebuffer and the keypad, plus the fetch-decode-execute cycle. Rendering,
sound, key capture and timing belong to the host.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keys `1234`, `qwer`, `asdf` and `zxcv` form the keypad, `p` pauses,
`n` steps while paused and `Esc` quits.

# Library

The main way of running a program is to load instructions as bytes.

```rust
use chip_8_vm::emulator::{Emulator, Error};

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display)?;
emulator.step()?; // Will now clear the display
assert!(emulator.take_redraw());
# Ok::<(), Error>(())
```

Alternatively, you can experiment by executing instruction words directly,
or decoded instructions.

```rust
use chip_8_vm::emulator::{Emulator, Error};
use chip_8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Bypass memory and execute a word as if it had been fetched
emulator.step_with(0x6305)?;
assert_eq!(emulator.registers()[3], 5);

// Or execute many instructions sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
])?;
assert_eq!(emulator.program_counter(), 0x250);
assert_eq!(emulator.registers()[0xB], 35);
# Ok::<(), Error>(())
```

## Driving the machine

The host calls [`Emulator::cycle`](emulator::Emulator::cycle) as often as it likes,
calls the timer decrement functions at 60 Hz, writes key state with
[`Emulator::set_key`](emulator::Emulator::set_key) and redraws the
[`Display`](emulator::display::Display) whenever
[`Emulator::take_redraw`](emulator::Emulator::take_redraw) says so.
The emulator does no locking of its own; a multithreaded host should keep it behind a `Mutex`.

```rust
use chip_8_vm::emulator::{Emulator, Error};

let mut emulator = Emulator::new();
emulator.load(&[0xF1, 0x0A])?; // Wait for a key into V1

emulator.cycle()?;
assert_eq!(emulator.awaiting_key(), Some(1));

emulator.press_key(0x4)?;
emulator.cycle()?;
assert_eq!(emulator.registers()[1], 0x4);
# Ok::<(), Error>(())
```
*/

pub mod emulator;
