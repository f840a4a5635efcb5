//! Captured camera frame descriptions.

/// Pixel layout of a captured frame's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// Already-encoded JPEG bytes, ready for sampled decoding.
    Jpeg,
    /// NV21: full-resolution Y plane followed by an interleaved VU plane
    /// at half resolution in each dimension.
    Nv21,
}

/// One captured camera frame, as delivered by a capture callback.
///
/// The payload is owned so frames can be handed across threads without
/// borrowing from the capture layer.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Pixel layout of `bytes`.
    pub format: FrameFormat,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Raw frame payload.
    pub bytes: Vec<u8>,
}

impl RawFrame {
    /// Frame wrapping already-encoded JPEG bytes.
    pub fn jpeg(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            format: FrameFormat::Jpeg,
            width,
            height,
            bytes,
        }
    }

    /// Frame wrapping an NV21 payload.
    pub fn nv21(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            format: FrameFormat::Nv21,
            width,
            height,
            bytes,
        }
    }
}
