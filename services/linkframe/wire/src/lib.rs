//! Typed 802.11 MAC frames over shared byte windows.
//!
//! This crate maps the fixed header regions of wireless MAC frames onto typed
//! fields and back. A frame can be decoded from an existing buffer or built
//! from values and serialized later; both directions share the same layout
//! description, so serialized bytes re-parse to the same values.
//!
//! ## Building blocks
//!
//! - **Window**: bounds-checked `(offset, len)` view into a reference-counted
//!   buffer; windows over one buffer alias each other
//! - **Field codecs**: fixed-width header fields (frame control, duration,
//!   addresses, sequence control, reason code)
//! - **Frame**: generic lifecycle over a per-kind [`Layout`]: decode,
//!   construct, recompute, serialize
//! - **Payload**: absent, raw trailing bytes, or a nested frame
//!
//! ## Wire Format (management action frame)
//!
//! ```text
//! +----------------------+----------------------------+
//! | Frame Control (2B)   | type/subtype + flags       |
//! +----------------------+----------------------------+
//! | Duration/ID (2B)     | little-endian              |
//! +----------------------+----------------------------+
//! | Address 1 (6B)       | destination                |
//! +----------------------+----------------------------+
//! | Address 2 (6B)       | source                     |
//! +----------------------+----------------------------+
//! | Address 3 (6B)       | BSSID                      |
//! +----------------------+----------------------------+
//! | Sequence Control (2B)| little-endian              |
//! +----------------------+----------------------------+
//! | payload              | variable (rest of buffer)  |
//! +----------------------+----------------------------+
//! ```
//!
//! Frames hold `Rc`-shared buffers and are therefore not `Send`; copy bytes
//! out with `to_bytes` to move them across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod control;
pub mod error;
pub mod field;
pub mod frame;
pub mod kind;
pub mod management;
pub mod payload;
pub mod window;

// Re-export main types
pub use control::{AckFrame, AckHeader};
pub use error::WireError;
pub use field::{
    Duration, FieldCodec, FieldReader, FieldWriter, FrameControl, MacAddress, ReasonCode,
    SequenceControl, ADDRESS_LENGTH, DURATION_LENGTH, FRAME_CONTROL_LENGTH, REASON_CODE_LENGTH,
    SEQUENCE_CONTROL_LENGTH,
};
pub use frame::{plan_header, BufferPolicy, Frame, HeaderPlan, Layout};
pub use kind::{AnyFrame, FrameKind};
pub use management::{
    ActionFrame, ActionHeader, DeauthenticationFrame, DeauthenticationHeader,
    MANAGEMENT_HEADER_SIZE,
};
pub use payload::Payload;
pub use window::Window;
