use crate::pixelformat::yuv_to_rgb;
use base::Vec2;

/// Converts a planar YU12 (YUV 4:2:0) frame to interleaved RGB.
///
/// `data` holds three consecutive row-major planes: a full-resolution Y plane
/// (`w * h` bytes) followed by quarter-resolution U and V planes
/// (`w/2 * h/2` bytes each). Chroma is upsampled nearest-neighbor: the four
/// pixels of each 2x2 block share one (U, V) pair.
///
/// Preconditions (owned by the framing boundary, not checked here beyond a
/// `debug_assert!`): `size.x` and `size.y` are positive and even, and
/// `data.len()` is exactly `w * h * 3 / 2`.
pub fn yu12_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let width = size.x;
    let height = size.y;
    debug_assert!(width % 2 == 0 && height % 2 == 0, "dimensions must be even");
    debug_assert_eq!(data.len(), width * height * 3 / 2, "not a full YU12 frame");

    let y_len = width * height;
    let uv_w = width / 2;

    let y_plane = &data[..y_len];
    let u_plane = &data[y_len..];
    let v_offset = uv_w * (height / 2);
    let v_plane = &data[y_len + v_offset..];

    let mut rgb = Vec::with_capacity(y_len * 3);

    for row in 0..height {
        for col in 0..width {
            let y = y_plane[row * width + col];
            let u = u_plane[(row / 2) * uv_w + col / 2];
            let v = v_plane[(row / 2) * uv_w + col / 2];
            let (r, g, b) = yuv_to_rgb(y, u, v);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    rgb
}

/// Converts a planar YU12 frame to interleaved RGBA with opaque alpha.
///
/// Same contract as [`yu12_to_rgb`]; every fourth output byte is 255.
pub fn yu12_to_rgba(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let width = size.x;
    let height = size.y;
    debug_assert!(width % 2 == 0 && height % 2 == 0, "dimensions must be even");
    debug_assert_eq!(data.len(), width * height * 3 / 2, "not a full YU12 frame");

    let y_len = width * height;
    let uv_w = width / 2;

    let y_plane = &data[..y_len];
    let u_plane = &data[y_len..];
    let v_offset = uv_w * (height / 2);
    let v_plane = &data[y_len + v_offset..];

    let mut rgba = Vec::with_capacity(y_len * 4);

    for row in 0..height {
        for col in 0..width {
            let y = y_plane[row * width + col];
            let u = u_plane[(row / 2) * uv_w + col / 2];
            let v = v_plane[(row / 2) * uv_w + col / 2];
            let (r, g, b) = yuv_to_rgb(y, u, v);
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }

    rgba
}
