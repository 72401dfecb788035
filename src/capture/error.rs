use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("not a pcap file (magic {0:08x})")]
    BadMagic(u32),

    #[error("capture truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("packet {index}: {reason}")]
    MalformedPacket { index: usize, reason: &'static str },
}
