use {
    crate::source::FrameSource,
    base::log_info,
    image::{PixelFormat, yu12_to_rgb, yu12_to_rgba},
    video::{FrameSink, VideoError, VideoFrame},
};

/// Reads YU12 frames from `source`, converts each to the sink's negotiated
/// pixel format, and delivers it. Returns the number of frames delivered.
///
/// The loop ends when the source runs dry, which is the normal end of
/// stream. Each frame is converted whole before it is sent; nothing partial
/// ever reaches the sink.
pub async fn run(
    mut source: FrameSource,
    sink: &mut impl FrameSink,
) -> Result<u64, VideoError> {
    let size = sink.size();
    let format = sink.format();
    let progress_interval = (sink.frame_rate().max(1.0)) as u64;

    let mut frames: u64 = 0;
    while let Some(yuv) = source.recv().await {
        let data = match format {
            PixelFormat::Rgb8 => yu12_to_rgb(size, &yuv),
            PixelFormat::Rgba8 => yu12_to_rgba(size, &yuv),
            other => {
                return Err(VideoError::Format(format!(
                    "cannot convert YU12 to {other:?}"
                )));
            }
        };
        sink.send(VideoFrame::new(size, format, data)).await?;

        frames += 1;
        if frames % progress_interval == 0 {
            log_info!("{} frames delivered", frames);
        }
    }

    Ok(frames)
}
