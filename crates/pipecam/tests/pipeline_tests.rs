use {
    base::Vec2,
    image::PixelFormat,
    pipecam::{FrameSource, pipeline},
    std::io::Cursor,
    video::{FrameSink, VideoError, VideoFrame},
};

struct MemSink {
    size: Vec2<usize>,
    format: PixelFormat,
    frames: Vec<VideoFrame>,
}

impl MemSink {
    fn new(size: Vec2<usize>, format: PixelFormat) -> Self {
        Self {
            size,
            format,
            frames: Vec::new(),
        }
    }
}

impl FrameSink for MemSink {
    fn size(&self) -> Vec2<usize> {
        self.size
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn frame_rate(&self) -> f32 {
        15.0
    }

    async fn send(&mut self, frame: VideoFrame) -> Result<(), VideoError> {
        if frame.data.len() != frame.expected_len() {
            return Err(VideoError::Format(format!(
                "frame data is {} bytes, expected {}",
                frame.data.len(),
                frame.expected_len()
            )));
        }
        self.frames.push(frame);
        Ok(())
    }
}

/// One YU12 frame: luma plane of `y`, chroma planes of `u` and `v`.
fn yu12_frame(size: Vec2<usize>, y: u8, u: u8, v: u8) -> Vec<u8> {
    let y_len = size.x * size.y;
    let uv_len = (size.x / 2) * (size.y / 2);
    let mut data = vec![y; y_len];
    data.extend(std::iter::repeat_n(u, uv_len));
    data.extend(std::iter::repeat_n(v, uv_len));
    data
}

#[tokio::test]
async fn test_black_frame_end_to_end() {
    // Y=16 with neutral chroma is black: every delivered pixel must be
    // exactly (0, 0, 0).
    let size = Vec2::new(4, 2);
    let input = yu12_frame(size, 16, 128, 128);
    assert_eq!(input.len(), 12);

    let source = FrameSource::spawn(Cursor::new(input), 12);
    let mut sink = MemSink::new(size, PixelFormat::Rgb8);
    let frames = pipeline::run(source, &mut sink).await.unwrap();

    assert_eq!(frames, 1);
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].data, vec![0u8; 8 * 3]);
}

#[tokio::test]
async fn test_black_frame_rgba() {
    let size = Vec2::new(4, 2);
    let input = yu12_frame(size, 16, 128, 128);

    let source = FrameSource::spawn(Cursor::new(input), 12);
    let mut sink = MemSink::new(size, PixelFormat::Rgba8);
    let frames = pipeline::run(source, &mut sink).await.unwrap();

    assert_eq!(frames, 1);
    let expected: Vec<u8> = [0, 0, 0, 255].repeat(8);
    assert_eq!(sink.frames[0].data, expected);
}

#[tokio::test]
async fn test_short_final_frame_is_clean_end() {
    // Two full frames followed by a partial one: the partial frame is the
    // end-of-stream signal and must not be delivered.
    let size = Vec2::new(4, 2);
    let mut input = yu12_frame(size, 235, 128, 128);
    input.extend(yu12_frame(size, 16, 128, 128));
    input.extend([1, 2, 3, 4, 5]);

    let source = FrameSource::spawn(Cursor::new(input), 12);
    let mut sink = MemSink::new(size, PixelFormat::Rgb8);
    let frames = pipeline::run(source, &mut sink).await.unwrap();

    assert_eq!(frames, 2);
    assert_eq!(sink.frames.len(), 2);
}

#[tokio::test]
async fn test_empty_input() {
    let size = Vec2::new(4, 2);
    let source = FrameSource::spawn(Cursor::new(Vec::new()), 12);
    let mut sink = MemSink::new(size, PixelFormat::Rgb8);
    let frames = pipeline::run(source, &mut sink).await.unwrap();

    assert_eq!(frames, 0);
    assert!(sink.frames.is_empty());
}

#[tokio::test]
async fn test_unconvertible_sink_format() {
    let size = Vec2::new(4, 2);
    let input = yu12_frame(size, 128, 128, 128);
    let source = FrameSource::spawn(Cursor::new(input), 12);
    let mut sink = MemSink::new(size, PixelFormat::Yu12);

    match pipeline::run(source, &mut sink).await {
        Err(VideoError::Format(_)) => {}
        other => panic!("expected format error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_frame_count_many() {
    let size = Vec2::new(4, 2);
    let mut input = Vec::new();
    for i in 0..30u8 {
        input.extend(yu12_frame(size, 16 + i, 128, 128));
    }

    let source = FrameSource::spawn(Cursor::new(input), 12);
    let mut sink = MemSink::new(size, PixelFormat::Rgb8);
    let frames = pipeline::run(source, &mut sink).await.unwrap();

    assert_eq!(frames, 30);
}
