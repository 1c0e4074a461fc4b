use base::Vec2;

// v4l2 fourcc codes
pub(crate) const FOURCC_RGB3: u32 = u32::from_le_bytes(*b"RGB3");
pub(crate) const FOURCC_AB24: u32 = u32::from_le_bytes(*b"AB24");
pub(crate) const FOURCC_RA24: u32 = u32::from_le_bytes(*b"RA24");
pub(crate) const FOURCC_YU12: u32 = u32::from_le_bytes(*b"YU12");

/// Convert a fourcc code to a readable 4-character string.
pub fn fourcc_to_string(fourcc: u32) -> String {
    String::from_utf8_lossy(&fourcc.to_le_bytes()).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Interleaved 3-byte RGB (V4L2_PIX_FMT_RGB24).
    Rgb8,
    /// Interleaved 4-byte RGBA (V4L2_PIX_FMT_RGBA32).
    Rgba8,
    /// Interleaved 4-byte BGRA (V4L2_PIX_FMT_BGRA32).
    Bgra8,
    /// Planar YUV 4:2:0, Y plane then quarter-size U and V planes
    /// (V4L2_PIX_FMT_YUV420).
    Yu12,
}

impl PixelFormat {
    pub fn from_fourcc(fourcc: u32) -> Option<Self> {
        match fourcc {
            FOURCC_RGB3 => Some(PixelFormat::Rgb8),
            FOURCC_AB24 => Some(PixelFormat::Rgba8),
            FOURCC_RA24 => Some(PixelFormat::Bgra8),
            FOURCC_YU12 => Some(PixelFormat::Yu12),
            _ => None,
        }
    }

    pub fn as_fourcc(&self) -> u32 {
        match self {
            PixelFormat::Rgb8 => FOURCC_RGB3,
            PixelFormat::Rgba8 => FOURCC_AB24,
            PixelFormat::Bgra8 => FOURCC_RA24,
            PixelFormat::Yu12 => FOURCC_YU12,
        }
    }

    /// Byte length of one frame at the given size.
    ///
    /// Yu12 requires even dimensions; the chroma planes are a quarter of the
    /// luma plane each.
    pub fn frame_len(&self, size: Vec2<usize>) -> usize {
        let pixels = size.x * size.y;
        match self {
            PixelFormat::Rgb8 => pixels * 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => pixels * 4,
            PixelFormat::Yu12 => pixels * 3 / 2,
        }
    }
}

// BT.601 studio-swing YUV to RGB for a single pixel (fixed point, shift 8).
// The >> 8 on i32 is an arithmetic shift, so negative intermediates truncate
// toward negative infinity. Integer division would truncate toward zero and
// diverge by one at low luma.
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let c = y as i32 - 16;
    let d = u as i32 - 128;
    let e = v as i32 - 128;
    let r = (298 * c + 409 * e + 128) >> 8;
    let g = (298 * c - 100 * d - 208 * e + 128) >> 8;
    let b = (298 * c + 516 * d + 128) >> 8;
    (
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    )
}
