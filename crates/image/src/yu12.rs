use base::Vec2;

fn clamp(val: i32) -> u8 {
    val.clamp(0, 255) as u8
}

/// Converts an interleaved 4-byte BGRA frame to planar YU12.
///
/// The forward direction of [`crate::yu12_to_rgb`]: BT.601 studio swing,
/// one (U, V) pair sampled from the top-left pixel of each 2x2 block.
/// Alpha is ignored.
///
/// Preconditions as for the inverse: even positive dimensions and
/// `data.len()` exactly `w * h * 4`.
pub fn bgra_to_yu12(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let width = size.x;
    let height = size.y;
    debug_assert!(width % 2 == 0 && height % 2 == 0, "dimensions must be even");
    debug_assert_eq!(data.len(), width * height * 4, "not a full BGRA frame");

    let y_len = width * height;
    let uv_len = (width / 2) * (height / 2);
    let mut yuv = vec![0u8; y_len + 2 * uv_len];

    for row in 0..height {
        for col in 0..width {
            let idx = (row * width + col) * 4;
            let b = data[idx] as i32;
            let g = data[idx + 1] as i32;
            let r = data[idx + 2] as i32;

            let y = ((66 * r + 129 * g + 25 * b + 128) >> 8) + 16;
            yuv[row * width + col] = clamp(y);

            if row % 2 == 0 && col % 2 == 0 {
                let u = ((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128;
                let v = ((112 * r - 94 * g - 18 * b + 128) >> 8) + 128;
                let uv_idx = (row / 2) * (width / 2) + col / 2;
                yuv[y_len + uv_idx] = clamp(u);
                yuv[y_len + uv_len + uv_idx] = clamp(v);
            }
        }
    }

    yuv
}
