//! Fixed-width header field codecs.
//!
//! Each field type knows its byte width and how to read itself from, and
//! write itself into, exactly that many bytes. Fields carry no position:
//! a frame layout places them back to back with [`FieldReader`] and
//! [`FieldWriter`], so offsets follow declaration order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::window::Window;
use crate::WireError;

/// Frame control field width
pub const FRAME_CONTROL_LENGTH: usize = 2;
/// Duration/ID field width
pub const DURATION_LENGTH: usize = 2;
/// Hardware address field width
pub const ADDRESS_LENGTH: usize = 6;
/// Sequence control field width
pub const SEQUENCE_CONTROL_LENGTH: usize = 2;
/// Reason code field width
pub const REASON_CODE_LENGTH: usize = 2;

/// A fixed-width, position-independent header field.
///
/// `read` and `write` receive slices of exactly `WIDTH` bytes.
pub trait FieldCodec: Sized {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Interpret `src` as this field
    fn read(src: &[u8]) -> Self;

    /// Write the canonical encoding into `dst`
    fn write(&self, dst: &mut [u8]);
}

fn read_u16_le(src: &[u8]) -> u16 {
    u16::from_le_bytes([src[0], src[1]])
}

/// Frame control field (little-endian).
///
/// Only the type and subtype bits are interpreted here; the remaining flag
/// bits are carried through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameControl(u16);

impl FrameControl {
    /// Management frame type
    pub const TYPE_MANAGEMENT: u8 = 0b00;
    /// Control frame type
    pub const TYPE_CONTROL: u8 = 0b01;
    /// Data frame type
    pub const TYPE_DATA: u8 = 0b10;

    /// Frame control with protocol version 0, no flags, and the given type/subtype
    pub fn new(typ: u8, subtype: u8) -> Self {
        Self((((typ & 0x03) as u16) << 2) | (((subtype & 0x0F) as u16) << 4))
    }

    /// Wrap raw field bits
    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw field bits
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Frame type (bits 2-3)
    pub fn frame_type(self) -> u8 {
        ((self.0 >> 2) & 0x03) as u8
    }

    /// Frame subtype (bits 4-7)
    pub fn subtype(self) -> u8 {
        ((self.0 >> 4) & 0x0F) as u8
    }

    /// Replace type and subtype, keeping the other bits
    pub fn set_kind(&mut self, typ: u8, subtype: u8) {
        self.0 = (self.0 & !0x00FC) | Self::new(typ, subtype).0;
    }
}

impl FieldCodec for FrameControl {
    const WIDTH: usize = FRAME_CONTROL_LENGTH;

    fn read(src: &[u8]) -> Self {
        Self(read_u16_le(src))
    }

    fn write(&self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.0.to_le_bytes());
    }
}

/// Duration/ID field (little-endian)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Duration(pub u16);

impl FieldCodec for Duration {
    const WIDTH: usize = DURATION_LENGTH;

    fn read(src: &[u8]) -> Self {
        Self(read_u16_le(src))
    }

    fn write(&self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.0.to_le_bytes());
    }
}

/// Sequence control field (little-endian, opaque)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceControl(pub u16);

impl FieldCodec for SequenceControl {
    const WIDTH: usize = SEQUENCE_CONTROL_LENGTH;

    fn read(src: &[u8]) -> Self {
        Self(read_u16_le(src))
    }

    fn write(&self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.0.to_le_bytes());
    }
}

/// Reason code carried by deauthentication frames (little-endian)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReasonCode(pub u16);

impl FieldCodec for ReasonCode {
    const WIDTH: usize = REASON_CODE_LENGTH;

    fn read(src: &[u8]) -> Self {
        Self(read_u16_le(src))
    }

    fn write(&self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.0.to_le_bytes());
    }
}

/// 48-bit hardware address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(pub [u8; ADDRESS_LENGTH]);

impl MacAddress {
    /// Broadcast address `FF:FF:FF:FF:FF:FF`
    pub const BROADCAST: MacAddress = MacAddress([0xFF; ADDRESS_LENGTH]);

    /// Address octets
    pub fn octets(&self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }
}

impl From<[u8; ADDRESS_LENGTH]> for MacAddress {
    fn from(octets: [u8; ADDRESS_LENGTH]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

impl FieldCodec for MacAddress {
    const WIDTH: usize = ADDRESS_LENGTH;

    fn read(src: &[u8]) -> Self {
        let mut octets = [0u8; ADDRESS_LENGTH];
        octets.copy_from_slice(src);
        Self(octets)
    }

    fn write(&self, dst: &mut [u8]) {
        dst.copy_from_slice(&self.0);
    }
}

/// Reads consecutive fields out of a header window
#[derive(Debug)]
pub struct FieldReader<'a> {
    window: &'a Window,
    at: usize,
}

impl<'a> FieldReader<'a> {
    /// Start reading at offset 0 of `window`
    pub fn new(window: &'a Window) -> Self {
        Self { window, at: 0 }
    }

    /// Decode the next field and advance past it
    pub fn read<C: FieldCodec>(&mut self) -> Result<C, WireError> {
        let value = self.window.decode::<C>(self.at)?;
        self.at += C::WIDTH;
        Ok(value)
    }

    /// Offset of the next field
    pub fn position(&self) -> usize {
        self.at
    }
}

/// Writes consecutive fields into a header region.
///
/// The region must be at least as long as the sum of the written widths;
/// layouts guarantee this by writing exactly their `FRAME_SIZE`.
#[derive(Debug)]
pub struct FieldWriter<'a> {
    dst: &'a mut [u8],
    at: usize,
}

impl<'a> FieldWriter<'a> {
    /// Start writing at offset 0 of `dst`
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, at: 0 }
    }

    /// Encode the next field and advance past it
    ///
    /// A field that would run past the region is skipped, but the position
    /// still advances so the mismatch shows up in [`FieldWriter::position`].
    pub fn put<C: FieldCodec>(&mut self, value: &C) {
        let end = self.at + C::WIDTH;
        debug_assert!(
            end <= self.dst.len(),
            "field at {} overruns {} byte header",
            self.at,
            self.dst.len()
        );
        if let Some(dst) = self.dst.get_mut(self.at..end) {
            value.write(dst);
        }
        self.at = end;
    }

    /// Offset of the next field
    pub fn position(&self) -> usize {
        self.at
    }
}
