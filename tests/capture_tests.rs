// tests/capture_tests.rs
// USBPcap captures: pcap framing, packet decoding, text output and replay scripts

use sds_tools::capture::{
    self, control_script, dump_block, format_data, mon_line, parse_packet, parse_pcap,
    ControlStage, Error, ScriptFilter, Transfer,
};
use sds_tools::usb::Step;

const CONTROL: u8 = 2;
const BULK: u8 = 3;

// Packed USBPcap header followed by `rest`
fn usb_frame(
    irp: u64,
    info: u8,
    device: u16,
    endpoint: u8,
    transfer: u8,
    data_length: u32,
    rest: &[u8],
) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&27u16.to_le_bytes());
    frame.extend_from_slice(&irp.to_le_bytes());
    frame.extend_from_slice(&0u32.to_le_bytes()); // status
    frame.extend_from_slice(&0u16.to_le_bytes()); // function
    frame.push(info);
    frame.extend_from_slice(&1u16.to_le_bytes()); // bus
    frame.extend_from_slice(&device.to_le_bytes());
    frame.push(endpoint);
    frame.push(transfer);
    frame.extend_from_slice(&data_length.to_le_bytes());
    frame.extend_from_slice(rest);
    frame
}

fn setup_frame(irp: u64, device: u16, request_type: u8, request: u8, length: u16) -> Vec<u8> {
    let mut rest = vec![0u8]; // setup stage
    rest.push(request_type);
    rest.push(request);
    rest.extend_from_slice(&0u16.to_le_bytes());
    rest.extend_from_slice(&0u16.to_le_bytes());
    rest.extend_from_slice(&length.to_le_bytes());
    usb_frame(irp, 0, device, 0x00, CONTROL, 8, &rest)
}

fn data_frame(irp: u64, device: u16, info: u8, data: &[u8]) -> Vec<u8> {
    let mut rest = vec![1u8]; // data stage
    rest.extend_from_slice(data);
    usb_frame(irp, info, device, 0x00, CONTROL, data.len() as u32, &rest)
}

// Little-endian microsecond pcap file holding `frames`
fn pcap_file(frames: &[(u32, u32, Vec<u8>)]) -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
    file.extend_from_slice(&2u16.to_le_bytes());
    file.extend_from_slice(&4u16.to_le_bytes());
    file.extend_from_slice(&0i32.to_le_bytes());
    file.extend_from_slice(&0u32.to_le_bytes());
    file.extend_from_slice(&65535u32.to_le_bytes());
    file.extend_from_slice(&249u32.to_le_bytes()); // USBPcap link type
    for (sec, usec, data) in frames {
        file.extend_from_slice(&sec.to_le_bytes());
        file.extend_from_slice(&usec.to_le_bytes());
        file.extend_from_slice(&(data.len() as u32).to_le_bytes());
        file.extend_from_slice(&(data.len() as u32).to_le_bytes());
        file.extend_from_slice(data);
    }
    file
}

#[cfg(test)]
mod pcap_tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let file = pcap_file(&[(1, 5, vec![1, 2, 3]), (2, 0, vec![])]);
        let records = parse_pcap(&file).expect("valid capture");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, vec![1, 2, 3]);
        assert_eq!(records[0].timestamp_micros(), 1_000_005);
        assert_eq!(records[1].timestamp_micros(), 2_000_000);
    }

    #[test]
    fn test_big_endian_nanosecond_capture() {
        let mut file = Vec::new();
        file.extend_from_slice(&0xa1b2_3c4du32.to_be_bytes());
        file.extend_from_slice(&[0u8; 20]);
        file.extend_from_slice(&3u32.to_be_bytes());
        file.extend_from_slice(&7_000u32.to_be_bytes());
        file.extend_from_slice(&1u32.to_be_bytes());
        file.extend_from_slice(&1u32.to_be_bytes());
        file.push(0xaa);

        let records = parse_pcap(&file).expect("valid capture");
        assert_eq!(records[0].ts_usec, 7, "Nanoseconds are scaled to microseconds");
        assert_eq!(records[0].data, vec![0xaa]);
    }

    #[test]
    fn test_bad_magic() {
        let err = parse_pcap(&[0u8; 24]).unwrap_err();
        assert!(matches!(err, Error::BadMagic(0)));
    }

    #[test]
    fn test_truncated_record() {
        let mut file = pcap_file(&[(0, 0, vec![1, 2, 3, 4])]);
        file.truncate(file.len() - 2);
        assert!(matches!(parse_pcap(&file), Err(Error::Truncated { .. })));
    }
}

#[cfg(test)]
mod packet_tests {
    use super::*;

    #[test]
    fn test_decode_setup_packet() {
        let packet = parse_packet(0, &setup_frame(0x1a, 5, 0xc0, 0xb1, 21)).expect("setup");

        assert_eq!(packet.irp_id, 0x1a);
        assert_eq!(packet.device, 5);
        assert_eq!(packet.event(), 'S');
        match packet.transfer {
            Transfer::Control(ControlStage::Setup { setup, spare }) => {
                assert_eq!(setup.request_type, 0xc0);
                assert_eq!(setup.request, 0xb1);
                assert_eq!(setup.length, 21);
                assert!(setup.is_in() && setup.is_vendor());
                assert!(!spare);
            }
            other => panic!("expected setup stage, got {:?}", other),
        }
    }

    #[test]
    fn test_short_frames_are_malformed() {
        assert!(matches!(
            parse_packet(3, &[0u8; 10]),
            Err(Error::MalformedPacket { index: 3, .. })
        ));

        let mut frame = setup_frame(1, 5, 0x40, 0xb5, 1);
        frame.truncate(30);
        assert!(matches!(parse_packet(0, &frame), Err(Error::MalformedPacket { .. })));
    }

    #[test]
    fn test_payload_clamped_to_captured_bytes() {
        let frame = usb_frame(1, 1, 5, 0x82, BULK, 16, &[0xaa, 0xbb]);
        let packet = parse_packet(0, &frame).unwrap();
        assert_eq!(packet.transfer, Transfer::Bulk(vec![0xaa, 0xbb]));
        assert_eq!(packet.data_length, 16);
    }

    #[test]
    fn test_parse_packets_from_capture() {
        let file = pcap_file(&[(0, 0, setup_frame(1, 5, 0x40, 0xb5, 1)), (0, 1, vec![0u8; 4])]);
        let records = parse_pcap(&file).unwrap();
        let err = capture::parse_packets(&records).unwrap_err();
        assert!(matches!(err, Error::MalformedPacket { index: 1, .. }), "Second frame is too short");
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn test_format_data_groups() {
        assert_eq!(format_data(&[1, 2, 3, 4, 5], false), "01020304 05");
        let wrapped = format_data(&[0u8; 36], true);
        assert!(wrapped.contains("00000000\n\t\t00000000"), "Wraps after 32 bytes");
    }

    #[test]
    fn test_mon_line_setup() {
        let packet = parse_packet(0, &setup_frame(0x1a, 5, 0x40, 0xb5, 1)).unwrap();
        assert_eq!(
            mon_line(0, &packet, 1_000_005),
            "1a 1000005 S Co:001:005:0 s 40 b5 0000 0000 0001 1 <"
        );
    }

    #[test]
    fn test_mon_line_data_and_bulk() {
        let data = parse_packet(0, &data_frame(0x1a, 5, 0, &[1, 2, 3, 4, 5])).unwrap();
        assert_eq!(mon_line(0, &data, 7), "1a 7 S Co:001:005:0 0 5 = 01020304 05");

        let bulk = parse_packet(1, &usb_frame(0x2b, 1, 5, 0x82, BULK, 4, &[0xaa, 0xbb, 0xcc, 0xdd]))
            .unwrap();
        assert_eq!(mon_line(1, &bulk, 9), "2b 9 C Bi:001:005:2 0 4 = aabbccdd ");
    }

    #[test]
    fn test_dump_block_setup() {
        let packet = parse_packet(4, &setup_frame(0x1a, 5, 0xc0, 0xb1, 21)).unwrap();
        let block = dump_block(4, &packet, 250);

        assert!(block.starts_with("-> Packet 4 found\n"));
        assert!(block.contains("\tTime: 250\n"));
        assert!(block.contains("\tDirection: S\n"));
        assert!(block.contains("\t\tbmRequesttype:\tc0\n"));
        assert!(block.contains("\t\twLength:\t0015\n"));
        assert!(block.ends_with("\tLength: 21\n\tData: <\n"));
    }
}

#[cfg(test)]
mod script_tests {
    use super::*;

    fn sample_packets() -> Vec<capture::UsbPacket> {
        let frames = vec![
            setup_frame(1, 5, 0x80, 0x06, 18), // GET_DESCRIPTOR
            setup_frame(2, 5, 0x40, 0xb5, 1),
            data_frame(2, 5, 0, &[0x01]),
            setup_frame(3, 5, 0xc0, 0xb1, 21),
            data_frame(3, 5, 1, &[0u8; 21]),
            setup_frame(4, 9, 0x40, 0xd0, 0),
        ];
        frames
            .iter()
            .enumerate()
            .map(|(i, f)| parse_packet(i, f).unwrap())
            .collect()
    }

    #[test]
    fn test_vendor_requests_become_steps() {
        let steps = control_script(&sample_packets(), ScriptFilter::default());

        assert_eq!(steps.len(), 3, "Standard request is skipped");
        assert_eq!(
            steps[0],
            Step::Out {
                request_type: 0x40,
                request: 0xb5,
                value: 0,
                index: 0,
                data: Some("01".to_string()),
            }
        );
        assert_eq!(
            steps[1],
            Step::In {
                request_type: 0xc0,
                request: 0xb1,
                value: 0,
                index: 0,
                length: 21,
            }
        );
        assert!(matches!(steps[2], Step::Out { request: 0xd0, data: None, .. }));
    }

    #[test]
    fn test_filter_by_device_and_all_requests() {
        let filter = ScriptFilter {
            device: Some(5),
            all_requests: true,
            ..ScriptFilter::default()
        };
        let steps = control_script(&sample_packets(), filter);

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].setup().request, 0x06);
        assert!(steps.iter().all(|s| s.setup().request != 0xd0), "Device 9 filtered out");
    }

    #[test]
    fn test_script_round_trips_through_replay_format() {
        let steps = control_script(&sample_packets(), ScriptFilter::default());
        let json = serde_json::to_string(&steps).unwrap();
        assert_eq!(sds_tools::usb::parse_script(&json).unwrap(), steps);
    }
}
