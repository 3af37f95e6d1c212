//! End-to-end behaviour of the management action frame over shared windows.

use linkframe_wire::{
    ActionFrame, ActionHeader, AnyFrame, BufferPolicy, Duration, FrameKind, MacAddress, Payload,
    SequenceControl, Window, WireError,
};

const DESTINATION: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
const SOURCE: MacAddress = MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
const BSSID: MacAddress = MacAddress([0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA]);

fn encoded_action() -> Vec<u8> {
    let mut frame = ActionFrame::action(DESTINATION, SOURCE, BSSID);
    frame.to_bytes().unwrap().to_vec()
}

#[test]
fn test_example_scenario_bytes() {
    let bytes = encoded_action();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[0..2], &[0xD0, 0x00]);
    assert_eq!(
        &bytes[2..22],
        &[
            0x00, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA
        ]
    );
    assert_eq!(&bytes[22..24], &[0x00, 0x00]);
}

#[test]
fn test_exact_header_has_no_payload() {
    let window = Window::new(encoded_action());
    let frame = ActionFrame::from_window(&window).unwrap();

    assert!(frame.payload().is_absent());
    assert_eq!(frame.header().unwrap().available_length(), 0);
    assert_eq!(frame.fields().destination, DESTINATION);
    assert_eq!(frame.fields().source, SOURCE);
    assert_eq!(frame.fields().bssid, BSSID);
}

#[test]
fn test_trailing_bytes_become_payload() {
    let mut bytes = encoded_action();
    bytes.extend_from_slice(&[0x7F, 0x01, 0x02, 0x03, 0x04]);
    let window = Window::new(bytes);
    let frame = ActionFrame::from_window(&window).unwrap();

    let header = frame.header().unwrap();
    assert_eq!(header.len(), 24);

    let payload = frame.payload().as_window().unwrap();
    assert_eq!(payload.offset(), 24);
    assert_eq!(payload.len(), 5);
    assert!(payload.same_buffer(&window));
    assert!(frame.payload_is_chained());
    assert_eq!(frame.total_length(), 29);
}

#[test]
fn test_larger_window_header_is_still_frame_size() {
    let mut bytes = encoded_action();
    bytes.resize(100, 0);
    let frame = ActionFrame::from_bytes(&bytes).unwrap();
    assert_eq!(frame.header().unwrap().len(), ActionFrame::FRAME_SIZE);
    assert_eq!(frame.payload().length(), 76);
}

#[test]
fn test_short_buffer_is_out_of_range() {
    let bytes = encoded_action();
    assert_eq!(
        ActionFrame::from_bytes(&bytes[..23]),
        Err(WireError::OutOfRange {
            offset: 0,
            len: 24,
            bound: 23
        })
    );
}

#[test]
fn test_values_round_trip_through_wire() {
    let mut header = ActionHeader::new(DESTINATION, SOURCE, BSSID);
    header.duration = Duration(314);
    header.sequence_control = SequenceControl(0x1230);

    let mut frame = ActionFrame::new(header);
    frame.set_payload(Payload::raw(b"\x03\x01category"));
    let bytes = frame.to_bytes().unwrap();

    let parsed = ActionFrame::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.fields(), &header);
    assert_eq!(
        parsed.payload().as_window().unwrap().to_vec(),
        b"\x03\x01category".to_vec()
    );
}

#[test]
fn test_frames_alias_one_buffer() {
    let mut bytes = encoded_action();
    bytes.extend_from_slice(&[0u8; 4]);
    let window = Window::new(bytes);

    let mut writer = ActionFrame::from_window(&window).unwrap();
    let reader_view = window.clone();

    writer.fields_mut().bssid = MacAddress::BROADCAST;
    assert_eq!(reader_view.read(16, 6).unwrap(), BSSID.octets().to_vec());

    writer.recompute_and_serialize();
    assert_eq!(reader_view.read(16, 6).unwrap(), vec![0xFF; 6]);

    let reparsed = ActionFrame::from_window(&window).unwrap();
    assert_eq!(reparsed.fields().bssid, MacAddress::BROADCAST);
    assert_eq!(reparsed.payload().length(), 4);
}

#[test]
fn test_policy_controls_stale_buffer() {
    let mut bytes = encoded_action();
    bytes.extend_from_slice(&[1, 2, 3]);

    let mut reuse = ActionFrame::from_bytes(&bytes).unwrap();
    let header = reuse.recompute_with(BufferPolicy::Reuse);
    assert_eq!(header.backing_len(), 27);

    let mut compact = ActionFrame::from_bytes(&bytes).unwrap();
    let header = compact.recompute_with(BufferPolicy::Compact);
    assert_eq!(header.backing_len(), 24);
    assert_eq!(compact.payload().length(), 3);
}

#[test]
fn test_any_frame_dispatch() {
    let frame = AnyFrame::from_bytes(&encoded_action()).unwrap();
    assert_eq!(frame.kind(), FrameKind::Action);
    match frame {
        AnyFrame::Action(action) => assert_eq!(action.fields().source, SOURCE),
        other => panic!("unexpected frame kind: {:?}", other.kind()),
    }
}
