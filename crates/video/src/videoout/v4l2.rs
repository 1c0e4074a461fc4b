use {
    crate::{
        VideoError, VideoFrame,
        videoout::{VideoOutConfig, VideoOutDevice},
    },
    base::{Vec2, log_info},
    image::PixelFormat,
    std::path::PathBuf,
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::OutputStream, video::Output,
    },
};

// default v4l2loopback node
const DEFAULT_DEVICE: &str = "/dev/video10";

const DEFAULT_FRAME_RATE: f32 = 15.0;

#[derive(Debug, Clone)]
pub struct V4l2Config {
    pub path: Option<PathBuf>,
    pub size: Option<Vec2<usize>>,
    pub format: Option<PixelFormat>,
    pub frame_rate: Option<f32>,
}

pub(crate) struct V4l2 {
    stream: Option<MmapStream<'static>>,
    size: Vec2<usize>,
    format: PixelFormat,
    frame_rate: f32,
    frame_size: usize,
}

impl V4l2 {
    pub fn new() -> Self {
        Self {
            stream: None,
            size: Vec2::new(0, 0),
            format: PixelFormat::Rgb8,
            frame_rate: 0.0,
            frame_size: 0,
        }
    }
}

impl VideoOutDevice for V4l2 {
    fn open(&mut self, config: &VideoOutConfig) -> Result<VideoOutConfig, VideoError> {
        // close stream
        self.stream.take();

        // unpack config
        #[allow(irrefutable_let_patterns)]
        let config = if let VideoOutConfig::V4l2(config) = config {
            config
        } else {
            return Err(VideoError::Device(
                "V4l2::open should be called with VideoOutConfig::V4l2".to_string(),
            ));
        };

        // create device from path or the loopback default
        let path = config
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE));
        let device = Device::with_path(&path)?;
        let device_format = Output::format(&device)?;

        // build size
        let desired_size = match config.size {
            Some(size) => size,
            None => Vec2::new(device_format.width as usize, device_format.height as usize),
        };

        // build pixel format
        let desired_fourcc = match &config.format {
            Some(format) => FourCC::new(&format.as_fourcc().to_le_bytes()),
            None => FourCC::new(&PixelFormat::Rgb8.as_fourcc().to_le_bytes()),
        };

        // set the format and get the actual format back
        let actual_format = Output::set_format(
            &device,
            &Format::new(desired_size.x as u32, desired_size.y as u32, desired_fourcc),
        )?;

        // extract size and pixel format
        self.size = Vec2::new(actual_format.width as usize, actual_format.height as usize);
        self.format = PixelFormat::from_fourcc(u32::from_le_bytes(actual_format.fourcc.repr))
            .ok_or_else(|| {
                VideoError::Format(format!(
                    "device negotiated unsupported pixel format: {}",
                    actual_format.fourcc
                ))
            })?;
        self.frame_size = self.format.frame_len(self.size);

        // set the frame rate and get the actual frame rate back; loopback
        // devices that reject or zero the interval keep the desired rate
        let desired_frame_rate = config.frame_rate.unwrap_or(DEFAULT_FRAME_RATE);
        let actual_params = Output::set_params(
            &device,
            &v4l::video::output::Parameters::with_fps(desired_frame_rate as u32),
        );
        self.frame_rate = match actual_params {
            Ok(params) if params.interval.numerator > 0 && params.interval.denominator > 0 => {
                params.interval.denominator as f32 / params.interval.numerator as f32
            }
            _ => desired_frame_rate,
        };

        // create the stream
        self.stream = match MmapStream::with_buffers(&device, Type::VideoOutput, 4u32) {
            Ok(stream) => Some(stream),
            Err(error) => {
                return Err(VideoError::Stream(error.to_string()));
            }
        };

        log_info!(
            "vcam: opened {} {}x{} {:?} @ {} fps",
            path.display(),
            self.size.x,
            self.size.y,
            self.format,
            self.frame_rate
        );

        Ok(VideoOutConfig::V4l2(V4l2Config {
            path: Some(path),
            size: Some(self.size),
            format: Some(self.format),
            frame_rate: Some(self.frame_rate),
        }))
    }

    fn close(&mut self) {
        self.stream.take();
    }

    fn blocking_write(&mut self, frame: &VideoFrame) -> Result<(), VideoError> {
        if let Some(ref mut stream) = self.stream.as_mut() {
            if frame.data.len() < self.frame_size {
                return Err(VideoError::Format(format!(
                    "frame data is {} bytes, device needs {}",
                    frame.data.len(),
                    self.frame_size
                )));
            }
            match OutputStream::next(*stream) {
                Ok((buf_out, meta_out)) => {
                    if buf_out.len() < self.frame_size {
                        return Err(VideoError::Stream(format!(
                            "device buffer is {} bytes, frame needs {}",
                            buf_out.len(),
                            self.frame_size
                        )));
                    }
                    buf_out[..self.frame_size].copy_from_slice(&frame.data[..self.frame_size]);
                    meta_out.bytesused = self.frame_size as u32;
                    meta_out.field = 0;
                    Ok(())
                }
                Err(error) => Err(VideoError::Stream(error.to_string())),
            }
        } else {
            Err(VideoError::Stream("No stream".to_string()))
        }
    }
}
