/// How a successful step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Keep on stepping
    Continue,
    /// The program executed 00FD and asked to be stopped
    Exit,
}

/// Conditions that stop the current step, carrying the opcode that caused them
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unsupported superchip instruction: {0:#06X} (0xF030, 0xFx75 and 0xFx85 are not supported)")]
    UnsupportedInstruction(u16),

    #[error("invalid opcode: {0:#06X}")]
    InvalidOpcode(u16),
}

pub type Result<T> = std::result::Result<T, Error>;
