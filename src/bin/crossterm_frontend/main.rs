use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use chip_8_vm::emulator::{Config, Emulator, RunState, ShiftSource};

mod crossterm_io;
mod key_manager;
use crossterm_io::CrosstermOutput;
use key_manager::{Command, Input, KeyManager, KEY_HOLD};

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions executed per second
    #[structopt(short, long, default_value = "700")]
    speed: u32,

    /// How many times per second the timers count down
    #[structopt(long, default_value = "60")]
    timer_hz: u32,

    /// Shift VY into VX in 8XY6 and 8XYE, like the COSMAC VIP
    #[structopt(long)]
    shift_vy: bool,
}

impl Opt {
    fn config(&self) -> Config {
        Config {
            shift_source: if self.shift_vy { ShiftSource::Vy } else { ShiftSource::Vx },
        }
    }
}

fn period(per_second: u32) -> Duration {
    Duration::from_secs_f64(1.0 / per_second.max(1) as f64)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_config(opt.config());
    emulator.load(&program)?;

    let mut output = CrosstermOutput::new()?;
    let mut key_manager = KeyManager::new(KEY_HOLD);
    output.draw(emulator.display())?;

    let instruction_period = period(opt.speed);
    let timer_period = period(opt.timer_hz);
    let mut next_instruction = Instant::now();
    let mut next_tick = Instant::now();

    // Start execution
    loop {
        for input in key_manager.poll()? {
            match input {
                Input::Press(key) => emulator.press_key(key)?,
                Input::Release(key) => emulator.release_key(key)?,
                Input::Command(Command::Quit) => return Ok(()),
                Input::Command(Command::TogglePause) => emulator.toggle_pause(),
                Input::Command(Command::Step) => {
                    if *emulator.run_state() == RunState::Paused {
                        emulator.step()?;
                    }
                }
                Input::Command(Command::Restart) => {
                    log::info!("Restarting {:?}", &opt.input);
                    emulator.reset();
                    emulator.load(&program)?;
                    output.draw(emulator.display())?;
                }
            }
        }

        let now = Instant::now();
        if *emulator.run_state() == RunState::Paused {
            next_instruction = now + instruction_period;
            next_tick = now + timer_period;
        }
        while next_instruction <= now {
            emulator.cycle()?;
            next_instruction += instruction_period;
        }
        while next_tick <= now {
            emulator.decrement_delay_timer();
            emulator.decrement_sound_timer();
            next_tick += timer_period;
        }

        if emulator.take_redraw() {
            output.draw(emulator.display())?;
        }
        output.status(&emulator.dump(), emulator.run_state())?;

        std::thread::sleep(Duration::from_millis(1));
    }
}
