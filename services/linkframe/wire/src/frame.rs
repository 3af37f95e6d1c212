//! Frame lifecycle shared by every concrete frame kind.
//!
//! A [`Frame`] pairs a typed [`Layout`] (the fixed header fields of one frame
//! kind) with an optional header [`Window`] and a trailing [`Payload`]. It is
//! either *unbacked* (built from values, no buffer yet) or *backed* (decoded
//! from a window, or recomputed). Setting a field never touches the buffer;
//! bytes are only written by [`Frame::recompute_and_serialize`] and the
//! `serialize*` methods.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::field::{FieldReader, FieldWriter};
use crate::kind::FrameKind;
use crate::payload::Payload;
use crate::window::Window;
use crate::WireError;

/// Typed fixed header of one frame kind.
///
/// `decode` and `encode` walk the fields in declaration order, so each field
/// sits at a fixed offset. `FRAME_SIZE` must equal the sum of the widths
/// written by `encode`.
pub trait Layout: Clone + fmt::Debug + PartialEq {
    /// Frame kind this layout describes
    const KIND: FrameKind;
    /// Header size in bytes, excluding payload
    const FRAME_SIZE: usize;

    /// Decode every field from the start of the header
    fn decode(reader: &mut FieldReader<'_>) -> Result<Self, WireError>;

    /// Encode every field into a region of exactly `FRAME_SIZE` bytes
    fn encode(&self, writer: &mut FieldWriter<'_>);
}

/// What to do with an oversized backing buffer when recomputing a header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferPolicy {
    /// Keep any buffer that can hold the header; bytes past it are left alone
    #[default]
    Reuse,
    /// Move the header into a buffer of exactly `FRAME_SIZE` bytes
    Compact,
}

/// Outcome of the capacity check that precedes header encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPlan {
    /// Encode into the existing header window
    Reuse,
    /// Allocate a fresh `FRAME_SIZE` buffer and adopt it as the header
    Reallocate,
}

/// Decide whether `header` can hold a `frame_size` byte header.
///
/// A missing header, one whose declared length or remaining capacity is
/// below `frame_size`, or (under [`BufferPolicy::Compact`]) one living in a
/// larger buffer, is reallocated.
pub fn plan_header(header: Option<&Window>, frame_size: usize, policy: BufferPolicy) -> HeaderPlan {
    match header {
        None => HeaderPlan::Reallocate,
        Some(h) if h.capacity() < frame_size || h.len() < frame_size => HeaderPlan::Reallocate,
        Some(h) if policy == BufferPolicy::Compact && h.backing_len() > frame_size => {
            HeaderPlan::Reallocate
        }
        Some(_) => HeaderPlan::Reuse,
    }
}

/// A frame of kind `L`: header window, typed fields and payload.
///
/// Cloning a backed frame clones its windows, so the clone aliases the same
/// bytes until either side reallocates.
#[derive(Debug, Clone)]
pub struct Frame<L: Layout> {
    header: Option<Window>,
    fields: L,
    payload: Payload,
}

impl<L: Layout> Frame<L> {
    /// Header size of this frame kind
    pub const FRAME_SIZE: usize = L::FRAME_SIZE;

    /// Build an unbacked frame from field values; no buffer is allocated
    pub fn new(fields: L) -> Self {
        Self {
            header: None,
            fields,
            payload: Payload::Absent,
        }
    }

    /// Decode a frame whose header starts at offset 0 of `window`.
    ///
    /// The header is exactly `FRAME_SIZE` bytes even when `window` is longer;
    /// whatever the backing buffer holds past the header becomes a raw payload.
    pub fn from_window(window: &Window) -> Result<Self, WireError> {
        let header = window.slice(0, L::FRAME_SIZE)?;
        let fields = L::decode(&mut FieldReader::new(&header))?;

        let available = header.available_length();
        let payload = if available > 0 {
            Payload::Raw(header.next(available)?)
        } else {
            Payload::Absent
        };
        trace!(
            "Decoded {:?} header at offset {} ({} payload bytes)",
            L::KIND,
            header.offset(),
            available
        );

        Ok(Self {
            header: Some(header),
            fields,
            payload,
        })
    }

    /// Copy `bytes` into a fresh buffer and decode it
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        Self::from_window(&Window::from_slice(bytes))
    }

    /// Kind of this frame
    pub fn kind(&self) -> FrameKind {
        L::KIND
    }

    /// Header size in bytes, independent of field values and payload
    pub fn frame_size(&self) -> usize {
        L::FRAME_SIZE
    }

    /// Header plus payload length
    pub fn total_length(&self) -> usize {
        L::FRAME_SIZE + self.payload.length()
    }

    /// Typed header fields
    pub fn fields(&self) -> &L {
        &self.fields
    }

    /// Mutable header fields; changes reach the buffer on the next recompute
    pub fn fields_mut(&mut self) -> &mut L {
        &mut self.fields
    }

    /// Header window, if the frame is backed
    pub fn header(&self) -> Option<&Window> {
        self.header.as_ref()
    }

    /// Whether the frame has a header window
    pub fn is_backed(&self) -> bool {
        self.header.is_some()
    }

    /// Payload slot
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Mutable payload slot
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Attach or replace the payload; `FRAME_SIZE` is unaffected
    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    /// Detach the payload, leaving the slot absent
    pub fn take_payload(&mut self) -> Payload {
        std::mem::take(&mut self.payload)
    }

    /// Whether the payload bytes start right after the header in the same buffer
    pub fn payload_is_chained(&self) -> bool {
        match (self.header.as_ref(), self.payload.region()) {
            (Some(header), Some(region)) => region.follows(header),
            _ => false,
        }
    }

    /// Write the current field values into the header, reusing the buffer
    /// when it can hold `FRAME_SIZE` bytes.
    ///
    /// Idempotent. See [`Frame::recompute_with`].
    pub fn recompute_and_serialize(&mut self) -> &Window {
        self.recompute_with(BufferPolicy::default())
    }

    /// Write the current field values into the header under `policy`.
    ///
    /// When [`plan_header`] asks for a reallocation, a zeroed `FRAME_SIZE`
    /// buffer becomes the new header. The payload keeps its own window and is
    /// no longer chained to the header; [`Frame::serialize`] re-chains it.
    /// A reused header longer than `FRAME_SIZE` is redeclared to `FRAME_SIZE`.
    pub fn recompute_with(&mut self, policy: BufferPolicy) -> &Window {
        let reused = match plan_header(self.header.as_ref(), L::FRAME_SIZE, policy) {
            HeaderPlan::Reuse => self
                .header
                .as_ref()
                .and_then(|header| header.slice(0, L::FRAME_SIZE).ok()),
            HeaderPlan::Reallocate => None,
        };
        let header = reused.unwrap_or_else(|| {
            debug!(
                "Allocating {} byte header for {:?} frame",
                L::FRAME_SIZE,
                L::KIND
            );
            Window::zeroed(L::FRAME_SIZE)
        });

        let written = header.with_bytes_mut(|dst| {
            let mut writer = FieldWriter::new(dst);
            self.fields.encode(&mut writer);
            writer.position()
        });
        debug_assert_eq!(
            written,
            L::FRAME_SIZE,
            "{:?} layout encoded {} bytes but declares FRAME_SIZE {}",
            L::KIND,
            written,
            L::FRAME_SIZE
        );
        self.header.insert(header)
    }

    /// Serialize header and payload into one fresh contiguous buffer.
    ///
    /// The frame adopts the new buffer: its header and any raw payload view
    /// the returned window afterwards.
    pub fn serialize(&mut self) -> Result<Window, WireError> {
        let buffer = Window::zeroed(self.total_length());
        self.serialize_into(&buffer)?;
        Ok(buffer)
    }

    /// Serialize header and payload into the start of `target`.
    ///
    /// Fails with [`WireError::OutOfRange`] when `target` is shorter than
    /// [`Frame::total_length`]; nothing is written in that case.
    pub fn serialize_into(&mut self, target: &Window) -> Result<(), WireError> {
        let total = self.total_length();
        if target.len() < total {
            return Err(WireError::OutOfRange {
                offset: 0,
                len: total,
                bound: target.len(),
            });
        }

        let header = target.slice(0, L::FRAME_SIZE)?;
        self.payload.detach_from(&header);
        self.header = Some(header);
        self.recompute_with(BufferPolicy::Reuse);

        let payload_len = self.payload.length();
        if payload_len > 0 {
            let region = target.slice(L::FRAME_SIZE, payload_len)?;
            self.payload.serialize_into(&region)?;
        }
        Ok(())
    }

    /// Serialize and snapshot the resulting bytes
    pub fn to_bytes(&mut self) -> Result<Bytes, WireError> {
        Ok(self.serialize()?.to_bytes())
    }
}

impl<L: Layout> PartialEq for Frame<L> {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields && self.payload == other.payload
    }
}

impl<L: Layout + Eq> Eq for Frame<L> {}
