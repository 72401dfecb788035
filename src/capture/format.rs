use super::usbpcap::{ControlStage, Transfer, UsbPacket};
use std::fmt::Write;
use tracing::warn;

/// Hex bytes in groups of four. With `wrap`, every 32 bytes start a new
/// indented line instead of the group separator.
pub fn format_data(data: &[u8], wrap: bool) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, b) in data.iter().enumerate() {
        let _ = write!(out, "{:02x}", b);
        let n = i + 1;
        if n % 4 == 0 {
            if wrap && n % 32 == 0 {
                out.push_str("\n\t\t");
            } else {
                out.push(' ');
            }
        }
    }
    out
}

fn warn_unhandled(index: usize, transfer: &Transfer) {
    match transfer {
        Transfer::Isochronous => warn!(packet = index, "isochronous transfer not implemented, skipping"),
        Transfer::Interrupt => warn!(packet = index, "interrupt transfer not implemented, skipping"),
        Transfer::Unknown(kind) => warn!(packet = index, kind, "unknown transfer type, skipping"),
        Transfer::Control(ControlStage::Unknown(stage)) => {
            warn!(packet = index, stage, "unknown control stage")
        }
        Transfer::Control(ControlStage::Setup { spare: true, .. }) => {
            warn!(packet = index, "spare data in setup packet")
        }
        Transfer::Control(ControlStage::Status(data)) if !data.is_empty() => {
            warn!(packet = index, "status stage carries data, parsing assumptions may not hold")
        }
        _ => {}
    }
}

/// One usbmon-style line (without the newline) for a packet captured at
/// `micros` since the epoch.
pub fn mon_line(index: usize, packet: &UsbPacket, micros: u64) -> String {
    warn_unhandled(index, &packet.transfer);

    let mut line = format!("{:x} {} {} ", packet.irp_id, micros, packet.event());
    let address = format!(
        "{:03}:{:03}:{}",
        packet.bus,
        packet.device,
        packet.endpoint_number()
    );

    match &packet.transfer {
        Transfer::Control(stage) => {
            let _ = write!(line, "C{}:{} ", packet.direction(), address);
            match stage {
                ControlStage::Setup { setup, spare } => {
                    let _ = write!(
                        line,
                        "s {:02x} {:02x} {:04x} {:04x} {:04x} {} ",
                        setup.request_type,
                        setup.request,
                        setup.value,
                        setup.index,
                        setup.length,
                        setup.length
                    );
                    if !spare {
                        line.push('<');
                    }
                }
                ControlStage::Data(data) | ControlStage::Status(data) => {
                    let _ = write!(
                        line,
                        "{} {} = {}",
                        packet.status,
                        packet.data_length,
                        format_data(data, false)
                    );
                }
                ControlStage::Unknown(_) => {}
            }
        }
        Transfer::Bulk(data) => {
            let _ = write!(
                line,
                "B{}:{} {} {} = {}",
                packet.direction(),
                address,
                packet.status,
                packet.data_length,
                format_data(data, false)
            );
        }
        _ => {}
    }
    line
}

/// Multi-line description of a packet, `offset_micros` after the first
/// dumped packet.
pub fn dump_block(index: usize, packet: &UsbPacket, offset_micros: u64) -> String {
    warn_unhandled(index, &packet.transfer);

    let mut out = String::new();
    out.push_str(if packet.host_to_device() { "-> " } else { "<- " });
    let _ = writeln!(out, "Packet {} found", index);
    let _ = writeln!(out, "\tID: {:x}", packet.irp_id);
    let _ = writeln!(out, "\tTime: {}", offset_micros);
    let _ = writeln!(out, "\tDirection: {}", packet.event());
    let _ = writeln!(out, "\tirpInfo: {}", packet.info);
    let _ = writeln!(out, "\tbus: {:03}", packet.bus);
    let _ = writeln!(out, "\tdevice: {:03}", packet.device);
    let _ = writeln!(out, "\tendpoint: {}", packet.endpoint_number());

    match &packet.transfer {
        Transfer::Control(stage) => {
            let _ = writeln!(out, "\tTransfertype: C{}", packet.direction());
            match stage {
                ControlStage::Setup { setup, spare } => {
                    out.push_str("\tURB-Statusword: setup\n\tSetupdata:\n");
                    let _ = writeln!(out, "\t\tbmRequesttype:\t{:02x}", setup.request_type);
                    let _ = writeln!(out, "\t\tbRequest:\t{:02x}", setup.request);
                    let _ = writeln!(out, "\t\twValue:\t\t{:04x}", setup.value);
                    let _ = writeln!(out, "\t\twIndex:\t\t{:04x}", setup.index);
                    let _ = writeln!(out, "\t\twLength:\t{:04x}", setup.length);
                    let _ = writeln!(out, "\tLength: {}", setup.length);
                    if !spare {
                        out.push_str("\tData: <\n");
                    }
                }
                ControlStage::Data(data) | ControlStage::Status(data) => {
                    let _ = writeln!(out, "\tURB-Statusword: {}", packet.status);
                    let _ = writeln!(out, "\tLength: {}", packet.data_length);
                    let _ = writeln!(out, "\tData:\t{}", format_data(data, true));
                }
                ControlStage::Unknown(_) => {}
            }
        }
        Transfer::Bulk(data) => {
            let _ = writeln!(out, "\tTransfertype: B{}", packet.direction());
            let _ = writeln!(out, "\tData:\t{}", format_data(data, true));
        }
        _ => {}
    }
    out
}
