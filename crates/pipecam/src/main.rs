use {
    base::{Vec2, init_stderr_logger, log_fatal, log_info},
    clap::Parser,
    image::PixelFormat,
    pipecam::{FrameSource, pipeline},
    std::path::PathBuf,
    video::{FrameSink, V4l2Config, VideoOut, VideoOutConfig},
};

#[derive(Parser, Debug)]
#[command(version, about = "Stream raw YUV420P frames from stdin to a virtual camera")]
struct Args {
    /// Frame width in pixels (must be even)
    width: usize,
    /// Frame height in pixels (must be even)
    height: usize,
    /// Target frame rate
    #[arg(default_value_t = 15)]
    fps: u32,
    /// v4l2loopback device
    #[arg(short, long, default_value = "/dev/video10")]
    device: PathBuf,
    /// Ask the device for 4-byte RGBA output instead of 3-byte RGB
    #[arg(long)]
    rgba: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stderr_logger();
    let args = Args::parse();

    // the converter requires even dimensions, so reject odd ones before the
    // first frame
    if args.width == 0 || args.height == 0 || args.width % 2 != 0 || args.height % 2 != 0 {
        log_fatal!(
            "width and height must be positive and even (got {}x{})",
            args.width,
            args.height
        );
    }
    if !(1..=60).contains(&args.fps) {
        log_fatal!("fps must be 1-60 (got {})", args.fps);
    }

    let size = Vec2::new(args.width, args.height);
    let format = if args.rgba {
        PixelFormat::Rgba8
    } else {
        PixelFormat::Rgb8
    };

    // opening the virtual camera is one-shot setup; any failure is fatal
    let mut out = VideoOut::open(VideoOutConfig::V4l2(V4l2Config {
        path: Some(args.device.clone()),
        size: Some(size),
        format: Some(format),
        frame_rate: Some(args.fps as f32),
    }))
    .await?;

    if out.size() != size {
        log_fatal!(
            "device negotiated {}x{}, need {}x{}",
            out.size().x,
            out.size().y,
            size.x,
            size.y
        );
    }

    let frame_size = PixelFormat::Yu12.frame_len(size);
    log_info!(
        "waiting for {}x{} YU12 frames ({} bytes each) @ {} fps -> {}",
        args.width,
        args.height,
        frame_size,
        args.fps,
        args.device.display()
    );

    let source = FrameSource::stdin(frame_size);

    tokio::select! {
        result = pipeline::run(source, &mut out) => {
            let frames = result?;
            log_info!("end of stream ({} frames total)", frames);
        }
        _ = tokio::signal::ctrl_c() => {
            log_info!("interrupted, shutting down");
        }
    }

    Ok(())
}
