use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("usb: {0}")]
    Usb(#[from] rusb::Error),

    #[error("short transfer: expected {expected} bytes, moved {actual}")]
    ShortTransfer { expected: usize, actual: usize },

    #[error("invalid hex payload: {0}")]
    InvalidHex(String),

    #[error("no device {vid:04x}:{pid:04x} found")]
    DeviceNotFound { vid: u16, pid: u16 },

    #[error("payload of {0} bytes does not fit a control transfer")]
    PayloadTooLarge(usize),

    #[error("step {index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("script: {0}")]
    Script(#[from] serde_json::Error),
}
