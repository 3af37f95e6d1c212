//! Trailing payload slot of a frame.

use crate::kind::AnyFrame;
use crate::window::Window;
use crate::WireError;

/// Bytes that follow a frame's fixed header.
///
/// Decoding a frame only wraps the remaining bytes as [`Payload::Raw`];
/// [`Payload::decode_nested`] turns them into a structured frame on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// No payload
    #[default]
    Absent,
    /// Raw bytes viewed through a window
    Raw(Window),
    /// A nested frame
    Nested(Box<AnyFrame>),
}

impl Payload {
    /// Raw payload copied from `bytes`; empty input gives [`Payload::Absent`]
    pub fn raw(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            Payload::Absent
        } else {
            Payload::Raw(Window::from_slice(bytes))
        }
    }

    /// Nested frame payload
    pub fn nested(frame: impl Into<AnyFrame>) -> Self {
        Payload::Nested(Box::new(frame.into()))
    }

    /// Byte length of the payload content
    pub fn length(&self) -> usize {
        match self {
            Payload::Absent => 0,
            Payload::Raw(window) => window.len(),
            Payload::Nested(frame) => frame.total_length(),
        }
    }

    /// Whether the slot is empty
    pub fn is_absent(&self) -> bool {
        matches!(self, Payload::Absent)
    }

    /// Window of a raw payload
    pub fn as_window(&self) -> Option<&Window> {
        match self {
            Payload::Raw(window) => Some(window),
            _ => None,
        }
    }

    /// Nested frame, if decoded or attached
    pub fn as_nested(&self) -> Option<&AnyFrame> {
        match self {
            Payload::Nested(frame) => Some(&**frame),
            _ => None,
        }
    }

    /// Mutable nested frame
    pub fn as_nested_mut(&mut self) -> Option<&mut AnyFrame> {
        match self {
            Payload::Nested(frame) => Some(&mut **frame),
            _ => None,
        }
    }

    /// Where the payload bytes currently live, if anywhere
    pub fn region(&self) -> Option<&Window> {
        match self {
            Payload::Absent => None,
            Payload::Raw(window) => Some(window),
            Payload::Nested(frame) => frame.header(),
        }
    }

    /// Decode a raw payload as a frame, in place.
    ///
    /// Returns `None` for an absent payload. On error the raw payload is
    /// kept as it was.
    pub fn decode_nested(&mut self) -> Result<Option<&mut AnyFrame>, WireError> {
        if let Payload::Raw(window) = self {
            let frame = AnyFrame::parse(window)?;
            *self = Payload::nested(frame);
        }
        Ok(self.as_nested_mut())
    }

    /// Give raw payload bytes that overlap `region` a buffer of their own,
    /// so that writing into `region` cannot clobber them before they are
    /// copied. Nested frames are handled recursively.
    pub(crate) fn detach_from(&mut self, region: &Window) {
        match self {
            Payload::Absent => {}
            Payload::Raw(window) => {
                if window.overlaps(region) {
                    *window = Window::new(window.to_vec());
                }
            }
            Payload::Nested(frame) => frame.payload_mut().detach_from(region),
        }
    }

    /// Write the payload into the start of `target`.
    ///
    /// Fails with [`WireError::OutOfRange`] when `target` is shorter than
    /// [`Payload::length`]. Afterwards the payload views `target`.
    pub fn serialize_into(&mut self, target: &Window) -> Result<(), WireError> {
        let len = self.length();
        if target.len() < len {
            return Err(WireError::OutOfRange {
                offset: 0,
                len,
                bound: target.len(),
            });
        }

        match self {
            Payload::Absent => Ok(()),
            Payload::Raw(window) => {
                let region = target.slice(0, len)?;
                if !(region.same_buffer(window) && region.offset() == window.offset()) {
                    region.copy_from(window)?;
                }
                *window = region;
                Ok(())
            }
            Payload::Nested(frame) => frame.serialize_into(target),
        }
    }
}
