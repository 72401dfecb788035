use super::error::{Error, Result};
use crate::usb::ControlSetup;

/// Packed USBPcap packet header: irp id, status, function, info, bus,
/// device, endpoint, transfer, data length.
pub const PACKET_HEADER_LEN: usize = 27;
/// Packet header plus the control stage byte.
pub const CONTROL_HEADER_LEN: usize = 28;
const SETUP_LEN: usize = 8;

const TRANSFER_ISOCHRONOUS: u8 = 0;
const TRANSFER_INTERRUPT: u8 = 1;
const TRANSFER_CONTROL: u8 = 2;
const TRANSFER_BULK: u8 = 3;

const STAGE_SETUP: u8 = 0;
const STAGE_DATA: u8 = 1;
const STAGE_STATUS: u8 = 2;

const INFO_PDO_TO_FDO: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupPacket {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    pub fn is_in(&self) -> bool {
        self.request_type & 0x80 != 0
    }

    pub fn is_vendor(&self) -> bool {
        self.request_type & 0x60 == 0x40
    }

    pub fn control_setup(&self) -> ControlSetup {
        ControlSetup::new(self.request_type, self.request, self.value, self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlStage {
    /// `spare` is set when bytes follow the setup packet.
    Setup { setup: SetupPacket, spare: bool },
    Data(Vec<u8>),
    Status(Vec<u8>),
    Unknown(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transfer {
    Control(ControlStage),
    Bulk(Vec<u8>),
    Isochronous,
    Interrupt,
    Unknown(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsbPacket {
    pub irp_id: u64,
    pub status: u32,
    pub function: u16,
    pub info: u8,
    pub bus: u16,
    pub device: u16,
    pub endpoint: u8,
    pub data_length: u32,
    pub transfer: Transfer,
}

impl UsbPacket {
    pub fn endpoint_number(&self) -> u8 {
        self.endpoint & 0x7f
    }

    pub fn direction(&self) -> char {
        if self.endpoint & 0x80 != 0 {
            'i'
        } else {
            'o'
        }
    }

    pub fn host_to_device(&self) -> bool {
        self.info & INFO_PDO_TO_FDO == 0
    }

    /// `S`ubmission, `C`ompletion or `E`rror.
    pub fn event(&self) -> char {
        match (self.status, self.host_to_device()) {
            (0, true) => 'S',
            (0, false) => 'C',
            _ => 'E',
        }
    }
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

fn u64_at(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(raw)
}

// Payload after a header, cut to the declared length and to what was captured.
fn payload(bytes: &[u8], start: usize, declared: u32) -> Vec<u8> {
    let available = bytes.len().saturating_sub(start);
    let len = available.min(declared as usize);
    bytes[start..start + len].to_vec()
}

pub fn parse_packet(index: usize, bytes: &[u8]) -> Result<UsbPacket> {
    if bytes.len() < PACKET_HEADER_LEN {
        return Err(Error::MalformedPacket {
            index,
            reason: "smaller than usb packet header",
        });
    }

    let data_length = u32_at(bytes, 23);
    let transfer = match bytes[22] {
        TRANSFER_CONTROL => {
            if bytes.len() < CONTROL_HEADER_LEN {
                return Err(Error::MalformedPacket {
                    index,
                    reason: "control packet too small for the control header",
                });
            }
            Transfer::Control(match bytes[27] {
                STAGE_SETUP => {
                    if bytes.len() < CONTROL_HEADER_LEN + SETUP_LEN {
                        return Err(Error::MalformedPacket {
                            index,
                            reason: "setup packet without setup data",
                        });
                    }
                    let s = CONTROL_HEADER_LEN;
                    ControlStage::Setup {
                        setup: SetupPacket {
                            request_type: bytes[s],
                            request: bytes[s + 1],
                            value: u16_at(bytes, s + 2),
                            index: u16_at(bytes, s + 4),
                            length: u16_at(bytes, s + 6),
                        },
                        spare: bytes.len() > CONTROL_HEADER_LEN + SETUP_LEN,
                    }
                }
                STAGE_DATA => ControlStage::Data(payload(bytes, CONTROL_HEADER_LEN, data_length)),
                STAGE_STATUS => {
                    ControlStage::Status(payload(bytes, CONTROL_HEADER_LEN, data_length))
                }
                other => ControlStage::Unknown(other),
            })
        }
        TRANSFER_BULK => Transfer::Bulk(payload(bytes, PACKET_HEADER_LEN, data_length)),
        TRANSFER_ISOCHRONOUS => Transfer::Isochronous,
        TRANSFER_INTERRUPT => Transfer::Interrupt,
        other => Transfer::Unknown(other),
    };

    Ok(UsbPacket {
        irp_id: u64_at(bytes, 2),
        status: u32_at(bytes, 10),
        function: u16_at(bytes, 14),
        info: bytes[16],
        bus: u16_at(bytes, 17),
        device: u16_at(bytes, 19),
        endpoint: bytes[21],
        data_length,
        transfer,
    })
}
