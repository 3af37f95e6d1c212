//! Closed set of supported frame kinds.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::control::AckFrame;
use crate::field::FrameControl;
use crate::frame::BufferPolicy;
use crate::management::{ActionFrame, DeauthenticationFrame};
use crate::payload::Payload;
use crate::window::Window;
use crate::WireError;

/// Frame kinds, keyed by frame-control type and subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    /// Management action frame
    Action,
    /// Management deauthentication frame
    Deauthentication,
    /// Control acknowledgement frame
    Ack,
}

impl FrameKind {
    /// Frame-control `(type, subtype)` bits for this kind
    pub fn type_and_subtype(self) -> (u8, u8) {
        match self {
            FrameKind::Action => (FrameControl::TYPE_MANAGEMENT, 0b1101),
            FrameKind::Deauthentication => (FrameControl::TYPE_MANAGEMENT, 0b1100),
            FrameKind::Ack => (FrameControl::TYPE_CONTROL, 0b1101),
        }
    }

    /// Frame control with this kind's type and subtype and no flags
    pub fn frame_control(self) -> FrameControl {
        let (typ, subtype) = self.type_and_subtype();
        FrameControl::new(typ, subtype)
    }
}

impl TryFrom<FrameControl> for FrameKind {
    type Error = WireError;

    fn try_from(fc: FrameControl) -> Result<Self, Self::Error> {
        match (fc.frame_type(), fc.subtype()) {
            (FrameControl::TYPE_MANAGEMENT, 0b1101) => Ok(FrameKind::Action),
            (FrameControl::TYPE_MANAGEMENT, 0b1100) => Ok(FrameKind::Deauthentication),
            (FrameControl::TYPE_CONTROL, 0b1101) => Ok(FrameKind::Ack),
            (typ, subtype) => Err(WireError::UnknownKind { typ, subtype }),
        }
    }
}

/// A frame of any supported kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyFrame {
    /// Management action frame
    Action(ActionFrame),
    /// Management deauthentication frame
    Deauthentication(DeauthenticationFrame),
    /// Control acknowledgement frame
    Ack(AckFrame),
}

macro_rules! each_frame {
    ($value:expr, $frame:ident => $body:expr) => {
        match $value {
            AnyFrame::Action($frame) => $body,
            AnyFrame::Deauthentication($frame) => $body,
            AnyFrame::Ack($frame) => $body,
        }
    };
}

impl AnyFrame {
    /// Decode the frame starting at offset 0 of `window`, selecting the kind
    /// from its frame control field
    pub fn parse(window: &Window) -> Result<Self, WireError> {
        let fc = window.decode::<FrameControl>(0)?;
        match FrameKind::try_from(fc)? {
            FrameKind::Action => Ok(AnyFrame::Action(ActionFrame::from_window(window)?)),
            FrameKind::Deauthentication => Ok(AnyFrame::Deauthentication(
                DeauthenticationFrame::from_window(window)?,
            )),
            FrameKind::Ack => Ok(AnyFrame::Ack(AckFrame::from_window(window)?)),
        }
    }

    /// Copy `bytes` into a fresh buffer and decode it
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        Self::parse(&Window::from_slice(bytes))
    }

    /// Kind of the contained frame
    pub fn kind(&self) -> FrameKind {
        each_frame!(self, frame => frame.kind())
    }

    /// Header size of the contained frame
    pub fn frame_size(&self) -> usize {
        each_frame!(self, frame => frame.frame_size())
    }

    /// Header plus payload length
    pub fn total_length(&self) -> usize {
        each_frame!(self, frame => frame.total_length())
    }

    /// Header window, if backed
    pub fn header(&self) -> Option<&Window> {
        each_frame!(self, frame => frame.header())
    }

    /// Payload slot
    pub fn payload(&self) -> &Payload {
        each_frame!(self, frame => frame.payload())
    }

    /// Mutable payload slot
    pub fn payload_mut(&mut self) -> &mut Payload {
        each_frame!(self, frame => frame.payload_mut())
    }

    /// Recompute the header under `policy`
    pub fn recompute_with(&mut self, policy: BufferPolicy) -> &Window {
        each_frame!(self, frame => frame.recompute_with(policy))
    }

    /// Serialize header and payload into a fresh buffer
    pub fn serialize(&mut self) -> Result<Window, WireError> {
        each_frame!(self, frame => frame.serialize())
    }

    /// Serialize header and payload into the start of `target`
    pub fn serialize_into(&mut self, target: &Window) -> Result<(), WireError> {
        each_frame!(self, frame => frame.serialize_into(target))
    }

    /// Serialize and snapshot the resulting bytes
    pub fn to_bytes(&mut self) -> Result<Bytes, WireError> {
        each_frame!(self, frame => frame.to_bytes())
    }
}

impl From<ActionFrame> for AnyFrame {
    fn from(frame: ActionFrame) -> Self {
        AnyFrame::Action(frame)
    }
}

impl From<DeauthenticationFrame> for AnyFrame {
    fn from(frame: DeauthenticationFrame) -> Self {
        AnyFrame::Deauthentication(frame)
    }
}

impl From<AckFrame> for AnyFrame {
    fn from(frame: AckFrame) -> Self {
        AnyFrame::Ack(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::AckHeader;
    use crate::field::{MacAddress, ReasonCode};
    use crate::management::{ActionHeader, DeauthenticationHeader};

    #[test]
    fn test_kind_conversion() {
        for kind in [FrameKind::Action, FrameKind::Deauthentication, FrameKind::Ack] {
            assert_eq!(FrameKind::try_from(kind.frame_control()).unwrap(), kind);
        }
        assert_eq!(
            FrameKind::try_from(FrameControl::new(FrameControl::TYPE_DATA, 0)),
            Err(WireError::UnknownKind { typ: 2, subtype: 0 })
        );
    }

    #[test]
    fn test_kind_ignores_flag_bits() {
        let fc = FrameControl::from_bits(FrameKind::Action.frame_control().bits() | 0x0800);
        assert_eq!(FrameKind::try_from(fc).unwrap(), FrameKind::Action);
    }

    #[test]
    fn test_parse_selects_kind() {
        let mut deauth = DeauthenticationFrame::new(DeauthenticationHeader::new(
            MacAddress([1; 6]),
            MacAddress([2; 6]),
            MacAddress([3; 6]),
            ReasonCode(7),
        ));
        let bytes = deauth.to_bytes().unwrap();

        let parsed = AnyFrame::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.kind(), FrameKind::Deauthentication);
        assert_eq!(parsed.frame_size(), 26);
        assert_eq!(parsed, AnyFrame::from(deauth));
    }

    #[test]
    fn test_parse_rejects_short_and_unknown() {
        assert!(matches!(
            AnyFrame::from_bytes(&[0xD0]),
            Err(WireError::OutOfRange { .. })
        ));
        assert!(matches!(
            AnyFrame::from_bytes(&[0xD0, 0x00, 0x00]),
            Err(WireError::OutOfRange { len: 24, .. })
        ));
        assert!(matches!(
            AnyFrame::from_bytes(&[0x08, 0x00, 0x00, 0x00]),
            Err(WireError::UnknownKind { typ: 2, subtype: 0 })
        ));
    }

    #[test]
    fn test_nested_serialization() {
        let ack = AckFrame::new(AckHeader::new(MacAddress([0x42; 6])));
        let mut outer: AnyFrame = ActionFrame::new(ActionHeader::new(
            MacAddress([1; 6]),
            MacAddress([2; 6]),
            MacAddress([3; 6]),
        ))
        .into();
        *outer.payload_mut() = Payload::nested(ack);
        assert_eq!(outer.total_length(), 34);

        let bytes = outer.to_bytes().unwrap();
        assert_eq!(bytes.len(), 34);
        assert_eq!(&bytes[24..26], &[0xD4, 0x00]);
        assert_eq!(&bytes[28..34], &[0x42; 6]);

        let mut reparsed = AnyFrame::from_bytes(&bytes).unwrap();
        let nested = reparsed.payload_mut().decode_nested().unwrap().unwrap();
        assert_eq!(nested.kind(), FrameKind::Ack);
        assert_eq!(reparsed, outer);
    }
}
