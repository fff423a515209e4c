//! Process exit codes for the `sever` binary.

use std::process::{ExitCode, Termination};

/// Exit status of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SeverExit {
    /// Input ended normally.
    Success = 0,
    /// Some turn had no path to any exit left to defend.
    NoViableDefense = 1,
    /// Malformed input, or reading/writing the protocol failed.
    InvalidInput = 2,
}

impl SeverExit {
    /// Numeric process exit code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Termination for SeverExit {
    fn report(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}
