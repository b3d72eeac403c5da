// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A framebuffer or sound buffer whose layout cannot be written safely.
    #[error("Invalid buffer descriptor: {0}")]
    InvalidDescriptor(String),
    /// A generator setting that has no meaningful output (e.g. a 0 Hz tone).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Window init error: {0}")]
    WindowInit(String),
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    #[error("Audio init error: {0}")]
    AudioInit(String),
    #[error("Screenshot error: {0}")]
    Screenshot(String),
}
