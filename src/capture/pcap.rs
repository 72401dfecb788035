use super::error::{Error, Result};

const GLOBAL_HEADER_LEN: usize = 24;
const RECORD_HEADER_LEN: usize = 16;

const MAGIC_MICROS: u32 = 0xa1b2_c3d4;
const MAGIC_NANOS: u32 = 0xa1b2_3c4d;

#[derive(Debug, Clone, PartialEq)]
pub struct PcapRecord {
    pub ts_sec: u32,
    pub ts_usec: u32,
    pub orig_len: u32,
    pub data: Vec<u8>,
}

impl PcapRecord {
    pub fn timestamp_micros(&self) -> u64 {
        u64::from(self.ts_sec) * 1_000_000 + u64::from(self.ts_usec)
    }
}

#[derive(Clone, Copy)]
struct Layout {
    big_endian: bool,
    nanos: bool,
}

impl Layout {
    fn u32_at(&self, bytes: &[u8], offset: usize) -> Result<u32> {
        let raw: [u8; 4] = bytes
            .get(offset..offset + 4)
            .and_then(|s| s.try_into().ok())
            .ok_or(Error::Truncated { offset })?;
        Ok(if self.big_endian {
            u32::from_be_bytes(raw)
        } else {
            u32::from_le_bytes(raw)
        })
    }
}

/// Both byte orders and the nanosecond variant are accepted.
pub fn parse_pcap(bytes: &[u8]) -> Result<Vec<PcapRecord>> {
    let magic: [u8; 4] = bytes
        .get(..4)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::Truncated { offset: 0 })?;
    let layout = match (u32::from_le_bytes(magic), u32::from_be_bytes(magic)) {
        (MAGIC_MICROS, _) => Layout { big_endian: false, nanos: false },
        (MAGIC_NANOS, _) => Layout { big_endian: false, nanos: true },
        (_, MAGIC_MICROS) => Layout { big_endian: true, nanos: false },
        (_, MAGIC_NANOS) => Layout { big_endian: true, nanos: true },
        (other, _) => return Err(Error::BadMagic(other)),
    };
    if bytes.len() < GLOBAL_HEADER_LEN {
        return Err(Error::Truncated { offset: bytes.len() });
    }

    let mut records = Vec::new();
    let mut offset = GLOBAL_HEADER_LEN;
    while offset < bytes.len() {
        let ts_sec = layout.u32_at(bytes, offset)?;
        let frac = layout.u32_at(bytes, offset + 4)?;
        let incl_len = layout.u32_at(bytes, offset + 8)? as usize;
        let orig_len = layout.u32_at(bytes, offset + 12)?;

        let start = offset + RECORD_HEADER_LEN;
        let data = bytes
            .get(start..start + incl_len)
            .ok_or(Error::Truncated { offset: start })?
            .to_vec();

        records.push(PcapRecord {
            ts_sec,
            ts_usec: if layout.nanos { frac / 1000 } else { frac },
            orig_len,
            data,
        });
        offset = start + incl_len;
    }

    Ok(records)
}

pub fn read_pcap(path: &std::path::Path) -> Result<Vec<PcapRecord>> {
    let bytes = std::fs::read(path)?;
    parse_pcap(&bytes)
}
