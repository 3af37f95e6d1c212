//! Control frame layouts.

use serde::{Deserialize, Serialize};

use crate::field::{Duration, FieldCodec, FieldReader, FieldWriter, FrameControl, MacAddress};
use crate::frame::{Frame, Layout};
use crate::kind::FrameKind;
use crate::WireError;

/// Acknowledgement frame
pub type AckFrame = Frame<AckHeader>;

/// Fixed header of an ACK: frame control, duration, receiver address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckHeader {
    /// Frame control
    pub frame_control: FrameControl,
    /// Duration/ID
    pub duration: Duration,
    /// Address 1
    pub receiver: MacAddress,
}

impl AckHeader {
    /// ACK header with zero duration
    pub fn new(receiver: MacAddress) -> Self {
        Self {
            frame_control: FrameKind::Ack.frame_control(),
            duration: Duration::default(),
            receiver,
        }
    }
}

impl Layout for AckHeader {
    const KIND: FrameKind = FrameKind::Ack;
    const FRAME_SIZE: usize = FrameControl::WIDTH + Duration::WIDTH + MacAddress::WIDTH;

    fn decode(reader: &mut FieldReader<'_>) -> Result<Self, WireError> {
        Ok(Self {
            frame_control: reader.read()?,
            duration: reader.read()?,
            receiver: reader.read()?,
        })
    }

    fn encode(&self, writer: &mut FieldWriter<'_>) {
        writer.put(&self.frame_control);
        writer.put(&self.duration);
        writer.put(&self.receiver);
    }
}
