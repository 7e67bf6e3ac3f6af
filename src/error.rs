use std::io;
use std::path::PathBuf;

/// Raised by [`crate::config::Config::new`] when the command line names no images.
#[derive(Debug, thiserror::Error)]
#[error("lc3 [image-file1] ...")]
pub struct ArgumentError;

/// An image file could not be read into memory.
#[derive(Debug, thiserror::Error)]
#[error("failed to load image: {}", path.display())]
pub struct ImageLoadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The executor fetched a reserved or RTI opcode, which this machine has no semantics for.
#[derive(Debug, thiserror::Error)]
#[error("illegal opcode {opcode:#06x} at {address:#06x}")]
pub struct FatalOpcode {
    pub opcode: u16,
    pub address: u16,
}

/// Everything that can go wrong once the fetch/execute loop is running.
#[derive(Debug, thiserror::Error)]
pub enum LcError {
    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),
    #[error(transparent)]
    FatalOpcode(#[from] FatalOpcode),
}
