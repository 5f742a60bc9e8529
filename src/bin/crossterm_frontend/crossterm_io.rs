use chip_8_vm::emulator::display::{Display, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip_8_vm::emulator::{RegisterDump, RunState};

use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};

/// Each pixel is two characters wide to look roughly square.
const CELL_WIDTH: usize = 2;

/// The terminal in raw mode on the alternate screen, restored when dropped.
pub struct CrosstermOutput {
    stdout: Stdout,
}

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        let mut output = CrosstermOutput { stdout };
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let inner = "━".repeat(SCREEN_WIDTH * CELL_WIDTH);
        let right = (SCREEN_WIDTH * CELL_WIDTH + 1) as u16;
        let bottom = (SCREEN_HEIGHT + 1) as u16;
        queue!(self.stdout, cursor::MoveTo(0, 0), Print(format!("┏{}┓", inner)))?;
        for y in 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                Print('┃'),
                cursor::MoveTo(right, y),
                Print('┃')
            )?;
        }
        queue!(self.stdout, cursor::MoveTo(0, bottom), Print(format!("┗{}┛", inner)))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Redraw every row of the framebuffer.
    pub fn draw(&mut self, display: &Display) -> crossterm::Result<()> {
        for (y, row) in display.screen().iter().enumerate() {
            let line: String = row
                .iter()
                .map(|pixel| if *pixel == 1 { "██" } else { "  " })
                .collect();
            queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Show registers and run state below the screen.
    pub fn status(&mut self, dump: &RegisterDump, state: &RunState) -> crossterm::Result<()> {
        let state = match state {
            RunState::Running => "running".to_string(),
            RunState::Paused => "paused (n to step)".to_string(),
            RunState::Halted(error) => format!("halted: {}", error),
        };
        let opcode = dump
            .current_opcode
            .map(|word| format!("{:04X}", word))
            .unwrap_or_else(|| "----".to_string());
        let registers: Vec<String> = dump.v.iter().map(|v| format!("{:02X}", v)).collect();
        queue!(
            self.stdout,
            cursor::MoveTo(0, SCREEN_HEIGHT as u16 + 2),
            Clear(ClearType::CurrentLine),
            Print(format!(
                "PC {:03X}  I {:03X}  SP {:X}  DT {:02X}  ST {:02X}  OP {}  {}",
                dump.program_counter,
                dump.index,
                dump.stack_pointer,
                dump.delay_timer,
                dump.sound_timer,
                opcode,
                state
            )),
            cursor::MoveTo(0, SCREEN_HEIGHT as u16 + 3),
            Clear(ClearType::CurrentLine),
            Print(format!("V {}", registers.join(" ")))
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// The usual layout of the hexadecimal keypad on a QWERTY keyboard:
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D  ->  q w e r
/// 7 8 9 E      a s d f
/// A 0 B F      z x c v
/// ```
pub fn key_to_u8(key: KeyCode) -> Option<u8> {
    let key = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let value = match key {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypad_layout() {
        assert_eq!(key_to_u8(KeyCode::Char('x')), Some(0x0));
        assert_eq!(key_to_u8(KeyCode::Char('4')), Some(0xC));
        assert_eq!(key_to_u8(KeyCode::Char('V')), Some(0xF));
        assert_eq!(key_to_u8(KeyCode::Char('p')), None);
        assert_eq!(key_to_u8(KeyCode::Esc), None);
    }
}
