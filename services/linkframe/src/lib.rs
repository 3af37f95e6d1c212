//! Typed 802.11 MAC frame model.
//!
//! Re-exports the wire core from `linkframe-wire` and adds the pieces an
//! application needs around it: YAML configuration, log setup, and a
//! [`Dissector`] that applies the configuration when decoding and
//! assembling frames.
//!
//! ```no_run
//! use linkframe::{Dissector, LinkframeConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = LinkframeConfig::load_from_file("linkframe.yaml")?;
//! linkframe::init_logging(&config.log_level)?;
//!
//! let dissector = Dissector::new(config);
//! let mut frame = dissector.dissect(&[0xD4, 0x00, 0x00, 0x00, 1, 2, 3, 4, 5, 6])?;
//! let bytes = dissector.assemble(&mut frame)?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dissect;
pub mod logging;

pub use linkframe_wire as wire;

pub use config::{LinkframeConfig, DEFAULT_MAX_FRAME_SIZE};
pub use dissect::Dissector;
pub use linkframe_wire::{
    AckFrame, AckHeader, ActionFrame, ActionHeader, AnyFrame, BufferPolicy,
    DeauthenticationFrame, DeauthenticationHeader, Frame, FrameKind, Layout, MacAddress,
    Payload, Window, WireError,
};
pub use logging::{init_logging, LinkframeLogFormatter};
