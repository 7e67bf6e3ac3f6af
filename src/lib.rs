mod config;
mod error;
mod executor;
mod host;
mod image_loader;
mod instruction;
mod sign_extend;
mod state;
mod trap_vector;
mod traps;

pub use crate::config::Config;
pub use crate::error::{ArgumentError, FatalOpcode, ImageLoadError, LcError};
pub use crate::host::{install_interrupt_handler, TerminalGuard};

use crate::state::State;

/// Loads every image named in `config` into a fresh machine, left to right, then runs the
/// fetch/decode/execute loop until HALT clears the run flag or a fatal opcode is hit.
pub fn run(config: Config) -> Result<(), LcError> {
    let mut state = State::new();

    for path in &config.images {
        image_loader::load_image(&mut state, path)?;
    }

    while state.running {
        executor::step(&mut state)?;
    }

    Ok(())
}
