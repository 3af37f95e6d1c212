//! Management frame layouts.
//!
//! Both layouts share the 24-byte management MAC header:
//!
//! ```text
//! +--------+----------+-------------+--------+--------+----------+
//! | FC (2) | Dur (2)  | Address1 (6)| Addr2  | Addr3  | SeqCtl(2)|
//! +--------+----------+-------------+--------+--------+----------+
//!  0        2          4             10       16       22       24
//! ```
//!
//! Deauthentication appends a 2-byte reason code at offset 24.

use serde::{Deserialize, Serialize};

use crate::field::{
    Duration, FieldCodec, FieldReader, FieldWriter, FrameControl, MacAddress, ReasonCode,
    SequenceControl,
};
use crate::frame::{Frame, Layout};
use crate::kind::FrameKind;
use crate::WireError;

/// Size of the shared management MAC header
pub const MANAGEMENT_HEADER_SIZE: usize = FrameControl::WIDTH
    + Duration::WIDTH
    + (MacAddress::WIDTH * 3)
    + SequenceControl::WIDTH;

/// Management action frame
pub type ActionFrame = Frame<ActionHeader>;

/// Management deauthentication frame
pub type DeauthenticationFrame = Frame<DeauthenticationHeader>;

/// Fixed header of a management action frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionHeader {
    /// Frame control
    pub frame_control: FrameControl,
    /// Duration/ID
    pub duration: Duration,
    /// Address 1
    pub destination: MacAddress,
    /// Address 2
    pub source: MacAddress,
    /// Address 3
    pub bssid: MacAddress,
    /// Sequence control
    pub sequence_control: SequenceControl,
}

impl ActionHeader {
    /// Action header with zero duration and sequence control
    pub fn new(destination: MacAddress, source: MacAddress, bssid: MacAddress) -> Self {
        Self {
            frame_control: FrameKind::Action.frame_control(),
            duration: Duration::default(),
            destination,
            source,
            bssid,
            sequence_control: SequenceControl::default(),
        }
    }
}

impl Layout for ActionHeader {
    const KIND: FrameKind = FrameKind::Action;
    const FRAME_SIZE: usize = MANAGEMENT_HEADER_SIZE;

    fn decode(reader: &mut FieldReader<'_>) -> Result<Self, WireError> {
        Ok(Self {
            frame_control: reader.read()?,
            duration: reader.read()?,
            destination: reader.read()?,
            source: reader.read()?,
            bssid: reader.read()?,
            sequence_control: reader.read()?,
        })
    }

    fn encode(&self, writer: &mut FieldWriter<'_>) {
        writer.put(&self.frame_control);
        writer.put(&self.duration);
        writer.put(&self.destination);
        writer.put(&self.source);
        writer.put(&self.bssid);
        writer.put(&self.sequence_control);
    }
}

impl Frame<ActionHeader> {
    /// Unbacked action frame addressed from `source` to `destination`.
    ///
    /// Arguments follow wire order (address 1, 2, 3): receiver first, then
    /// transmitter, then BSSID.
    pub fn action(destination: MacAddress, source: MacAddress, bssid: MacAddress) -> Self {
        Frame::new(ActionHeader::new(destination, source, bssid))
    }
}

/// Fixed header of a deauthentication frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeauthenticationHeader {
    /// Frame control
    pub frame_control: FrameControl,
    /// Duration/ID
    pub duration: Duration,
    /// Address 1
    pub destination: MacAddress,
    /// Address 2
    pub source: MacAddress,
    /// Address 3
    pub bssid: MacAddress,
    /// Sequence control
    pub sequence_control: SequenceControl,
    /// Why the station is being deauthenticated
    pub reason: ReasonCode,
}

impl DeauthenticationHeader {
    /// Deauthentication header with zero duration and sequence control
    pub fn new(
        destination: MacAddress,
        source: MacAddress,
        bssid: MacAddress,
        reason: ReasonCode,
    ) -> Self {
        Self {
            frame_control: FrameKind::Deauthentication.frame_control(),
            duration: Duration::default(),
            destination,
            source,
            bssid,
            sequence_control: SequenceControl::default(),
            reason,
        }
    }
}

impl Layout for DeauthenticationHeader {
    const KIND: FrameKind = FrameKind::Deauthentication;
    const FRAME_SIZE: usize = MANAGEMENT_HEADER_SIZE + ReasonCode::WIDTH;

    fn decode(reader: &mut FieldReader<'_>) -> Result<Self, WireError> {
        Ok(Self {
            frame_control: reader.read()?,
            duration: reader.read()?,
            destination: reader.read()?,
            source: reader.read()?,
            bssid: reader.read()?,
            sequence_control: reader.read()?,
            reason: reader.read()?,
        })
    }

    fn encode(&self, writer: &mut FieldWriter<'_>) {
        writer.put(&self.frame_control);
        writer.put(&self.duration);
        writer.put(&self.destination);
        writer.put(&self.source);
        writer.put(&self.bssid);
        writer.put(&self.sequence_control);
        writer.put(&self.reason);
    }
}
