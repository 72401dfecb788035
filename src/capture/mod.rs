//! Reading USBPcap captures of the SDS 200A: per-packet dumps, usbmon-style
//! one-liners and conversion of control traffic into replay scripts.

mod error;
mod format;
mod pcap;
mod script;
mod usbpcap;

pub use error::{Error, Result};
pub use format::{dump_block, format_data, mon_line};
pub use pcap::{parse_pcap, read_pcap, PcapRecord};
pub use script::{control_script, ScriptFilter};
pub use usbpcap::{
    parse_packet, ControlStage, SetupPacket, Transfer, UsbPacket, CONTROL_HEADER_LEN,
    PACKET_HEADER_LEN,
};

pub fn parse_packets(records: &[PcapRecord]) -> Result<Vec<UsbPacket>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_packet(index, &record.data))
        .collect()
}
