/// Which register the shift instructions (8XY6 and 8XYE) read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSource {
    /// Shift VX in place, ignoring VY.
    Vx,
    /// Shift VY and store the result in VX, as the COSMAC VIP did.
    Vy,
}

impl Default for ShiftSource {
    fn default() -> Self {
        ShiftSource::Vx
    }
}

/// Interpreter behaviour that differs between CHIP-8 dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub shift_source: ShiftSource,
}

impl Config {
    /// The original interpreter's behaviour.
    pub fn cosmac_vip() -> Config {
        Config {
            shift_source: ShiftSource::Vy,
        }
    }
}
