use std::error::Error;
use std::path::PathBuf;

use structopt::StructOpt;

use chip_8_vm::emulator::{Config, Emulator, ShiftSource};

/// Roughly 700 instructions per second against 60 Hz timers.
const CYCLES_PER_TICK: u64 = 12;

/// Run a program without input and print the final screen and registers.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Maximum number of instructions to execute
    #[structopt(short, long, default_value = "10000")]
    cycles: u64,

    /// Shift VY into VX in 8XY6 and 8XYE, like the COSMAC VIP
    #[structopt(long)]
    shift_vy: bool,

    /// Seed for the random number instruction
    #[structopt(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        shift_source: if opt.shift_vy { ShiftSource::Vy } else { ShiftSource::Vx },
    };
    let mut emulator = Emulator::with_config(config);
    if let Some(seed) = opt.seed {
        emulator = emulator.with_seed(seed);
    }
    emulator.load(&program)?;

    let mut result = Ok(());
    for cycle in 0..opt.cycles {
        if cycle % CYCLES_PER_TICK == 0 {
            emulator.decrement_delay_timer();
            emulator.decrement_sound_timer();
        }
        if let Err(error) = emulator.cycle() {
            result = Err(error);
            break;
        }
        if let Some(register) = emulator.awaiting_key() {
            log::info!("Stopped after {} cycles, waiting for a key into V{:X}", cycle + 1, register);
            break;
        }
    }

    print!("{}", emulator);
    println!("{:#X?}", emulator.dump());
    result?;
    Ok(())
}
