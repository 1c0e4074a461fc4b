use {base::Vec2, image::PixelFormat};

/// A single frame headed for the output device.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub size: Vec2<usize>,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl VideoFrame {
    pub fn new(size: Vec2<usize>, format: PixelFormat, data: Vec<u8>) -> Self {
        Self { size, format, data }
    }

    /// Byte length the data buffer must have for this size and format.
    pub fn expected_len(&self) -> usize {
        self.format.frame_len(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_len() {
        let frame = VideoFrame::new(Vec2::new(4, 2), PixelFormat::Rgb8, vec![0; 24]);
        assert_eq!(frame.expected_len(), 24);
        assert_eq!(frame.data.len(), frame.expected_len());

        let frame = VideoFrame::new(Vec2::new(4, 2), PixelFormat::Rgba8, vec![0; 24]);
        assert_eq!(frame.expected_len(), 32);
        assert_ne!(frame.data.len(), frame.expected_len());
    }
}
