//! Configured entry point for decoding and assembling frames.

use bytes::Bytes;
use linkframe_wire::{AnyFrame, Window, WireError};
use tracing::trace;

use crate::component_debug;
use crate::config::LinkframeConfig;

/// Decodes and assembles frames under a [`LinkframeConfig`]
#[derive(Debug, Clone, Default)]
pub struct Dissector {
    config: LinkframeConfig,
}

impl Dissector {
    /// Create a dissector with the given configuration
    pub fn new(config: LinkframeConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &LinkframeConfig {
        &self.config
    }

    /// Decode a frame from `bytes`; the payload stays raw
    pub fn dissect(&self, bytes: &[u8]) -> Result<AnyFrame, WireError> {
        self.dissect_window(&Window::from_slice(bytes))
    }

    /// Decode the frame at the start of `window` without copying it
    pub fn dissect_window(&self, window: &Window) -> Result<AnyFrame, WireError> {
        self.check_size(window.capacity())?;
        let frame = AnyFrame::parse(window)?;
        component_debug!(
            "dissect",
            "Dissected {:?} frame ({} header bytes, {} payload bytes)",
            frame.kind(),
            frame.frame_size(),
            frame.payload().length()
        );
        Ok(frame)
    }

    /// Decode a frame and, when its payload is itself a supported frame,
    /// decode that too. A payload that is not a frame stays raw.
    pub fn dissect_nested(&self, bytes: &[u8]) -> Result<AnyFrame, WireError> {
        let mut frame = self.dissect(bytes)?;
        if let Err(e) = frame.payload_mut().decode_nested() {
            trace!("Payload left raw: {}", e);
        }
        Ok(frame)
    }

    /// Rewrite the header of `frame` in place under the configured buffer policy
    pub fn refresh<'a>(&self, frame: &'a mut AnyFrame) -> &'a Window {
        frame.recompute_with(self.config.buffer_policy)
    }

    /// Serialize `frame` into fresh contiguous bytes.
    ///
    /// Fails with [`WireError::Size`] before writing anything when the frame
    /// would exceed `max_frame_size`.
    pub fn assemble(&self, frame: &mut AnyFrame) -> Result<Bytes, WireError> {
        self.check_size(frame.total_length())?;
        let bytes = frame.to_bytes()?;
        component_debug!(
            "dissect",
            "Assembled {:?} frame ({} bytes)",
            frame.kind(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn check_size(&self, len: usize) -> Result<(), WireError> {
        if len > self.config.max_frame_size {
            return Err(WireError::Size(len));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkframe_wire::{ActionFrame, BufferPolicy, FrameKind, MacAddress, Payload};

    fn action_bytes(payload: &[u8]) -> Bytes {
        let mut frame = ActionFrame::action(
            MacAddress([0xAA; 6]),
            MacAddress([0xBB; 6]),
            MacAddress([0xCC; 6]),
        );
        frame.set_payload(Payload::raw(payload));
        frame.to_bytes().unwrap()
    }

    #[test]
    fn test_dissect_enforces_max_size() {
        let dissector = Dissector::new(LinkframeConfig {
            max_frame_size: 30,
            ..LinkframeConfig::default()
        });

        assert!(dissector.dissect(&action_bytes(&[0; 6])).is_ok());
        assert_eq!(
            dissector.dissect(&action_bytes(&[0; 7])),
            Err(WireError::Size(31))
        );
    }

    #[test]
    fn test_assemble_enforces_max_size() {
        let dissector = Dissector::new(LinkframeConfig {
            max_frame_size: 24,
            ..LinkframeConfig::default()
        });

        let mut frame = dissector.dissect(&action_bytes(&[])).unwrap();
        assert_eq!(dissector.assemble(&mut frame).unwrap().len(), 24);

        *frame.payload_mut() = Payload::raw(&[1]);
        assert_eq!(dissector.assemble(&mut frame), Err(WireError::Size(25)));
    }

    #[test]
    fn test_refresh_uses_configured_policy() {
        let bytes = action_bytes(&[1, 2, 3, 4]);

        let reuse = Dissector::default();
        let mut frame = reuse.dissect(&bytes).unwrap();
        assert_eq!(reuse.refresh(&mut frame).backing_len(), 28);

        let compact = Dissector::new(LinkframeConfig {
            buffer_policy: BufferPolicy::Compact,
            ..LinkframeConfig::default()
        });
        let mut frame = compact.dissect(&bytes).unwrap();
        assert_eq!(compact.refresh(&mut frame).backing_len(), 24);
    }

    #[test]
    fn test_dissect_nested_leaves_unknown_payload_raw() {
        let dissector = Dissector::default();
        let frame = dissector.dissect_nested(&action_bytes(&[0x7F, 0x00, 0x01])).unwrap();
        assert_eq!(frame.kind(), FrameKind::Action);
        assert!(frame.payload().as_window().is_some());
    }
}
