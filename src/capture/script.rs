use super::usbpcap::{ControlStage, Transfer, UsbPacket};
use crate::usb::{encode_hex, Step};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptFilter {
    pub bus: Option<u16>,
    pub device: Option<u16>,
    /// Keep standard and class requests too, not only vendor ones.
    pub all_requests: bool,
}

impl ScriptFilter {
    fn accepts(&self, packet: &UsbPacket) -> bool {
        self.bus.map_or(true, |bus| bus == packet.bus)
            && self.device.map_or(true, |device| device == packet.device)
    }
}

/// Turn the control transfers of a capture into replay steps. OUT payloads
/// are taken from the data stage the host submits under the same request id.
pub fn control_script(packets: &[UsbPacket], filter: ScriptFilter) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut pending_out: HashMap<u64, usize> = HashMap::new();

    for packet in packets.iter().filter(|p| filter.accepts(p)) {
        match &packet.transfer {
            Transfer::Control(ControlStage::Setup { setup, .. }) => {
                if !filter.all_requests && !setup.is_vendor() {
                    continue;
                }
                if setup.is_in() {
                    steps.push(Step::In {
                        request_type: setup.request_type,
                        request: setup.request,
                        value: setup.value,
                        index: setup.index,
                        length: setup.length,
                    });
                } else {
                    pending_out.insert(packet.irp_id, steps.len());
                    steps.push(Step::Out {
                        request_type: setup.request_type,
                        request: setup.request,
                        value: setup.value,
                        index: setup.index,
                        data: None,
                    });
                }
            }
            Transfer::Control(ControlStage::Data(bytes)) if packet.host_to_device() => {
                if let Some(at) = pending_out.remove(&packet.irp_id) {
                    if let Some(Step::Out { data, .. }) = steps.get_mut(at) {
                        if !bytes.is_empty() {
                            *data = Some(encode_hex(bytes));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    steps
}
