//! Dissector behaviour over nested and edited frames.

use linkframe::{
    AckFrame, AckHeader, ActionFrame, AnyFrame, Dissector, FrameKind, LinkframeConfig,
    MacAddress, Payload,
};

#[test]
fn test_nested_frame_round_trip() {
    let dissector = Dissector::default();

    let ack = AckFrame::new(AckHeader::new(MacAddress([0x10; 6])));
    let mut outer: AnyFrame = ActionFrame::action(
        MacAddress([0xAA; 6]),
        MacAddress([0xBB; 6]),
        MacAddress([0xCC; 6]),
    )
    .into();
    *outer.payload_mut() = Payload::nested(ack);

    let bytes = dissector.assemble(&mut outer).unwrap();
    assert_eq!(bytes.len(), 34);

    let plain = dissector.dissect(&bytes).unwrap();
    assert_eq!(plain.payload().as_window().unwrap().len(), 10);

    let nested = dissector.dissect_nested(&bytes).unwrap();
    let inner = nested.payload().as_nested().unwrap();
    assert_eq!(inner.kind(), FrameKind::Ack);
    match inner {
        AnyFrame::Ack(ack) => assert_eq!(ack.fields().receiver, MacAddress([0x10; 6])),
        other => panic!("unexpected nested kind: {:?}", other.kind()),
    }
    assert_eq!(nested, outer);
}

#[test]
fn test_edit_in_place_then_reassemble() {
    let dissector = Dissector::new(LinkframeConfig::default());

    let mut original = ActionFrame::action(
        MacAddress([1; 6]),
        MacAddress([2; 6]),
        MacAddress([3; 6]),
    );
    original.set_payload(Payload::raw(&[9, 9, 9]));
    let bytes = original.to_bytes().unwrap();

    let mut frame = dissector.dissect(&bytes).unwrap();
    if let AnyFrame::Action(action) = &mut frame {
        action.fields_mut().destination = MacAddress::BROADCAST;
    }

    let header = dissector.refresh(&mut frame).clone();
    assert_eq!(header.read(4, 6).unwrap(), vec![0xFF; 6]);

    let reassembled = dissector.assemble(&mut frame).unwrap();
    assert_eq!(&reassembled[4..10], &[0xFF; 6]);
    assert_eq!(&reassembled[24..], &[9, 9, 9]);
}
