use {
    crate::{VideoError, VideoFrame},
    base::{Vec2, log_error, log_info},
    image::PixelFormat,
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::{Duration, Instant},
    },
    tokio::{
        sync::{mpsc, oneshot},
        task::{JoinHandle, spawn_blocking},
    },
};

pub mod v4l2;

// capacity of the outgoing frame channel
const CHANNEL_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
pub enum VideoOutConfig {
    V4l2(v4l2::V4l2Config),
}

pub(crate) trait VideoOutDevice: Send {
    fn open(&mut self, config: &VideoOutConfig) -> Result<VideoOutConfig, VideoError>; // open the device, return config that was actually set
    fn close(&mut self); // close the device, if open
    fn blocking_write(&mut self, frame: &VideoFrame) -> Result<(), VideoError>; // write one frame
}

/// Sink seam for the delivery loop.
///
/// `VideoOut` implements this against a real device; tests substitute an
/// in-memory sink.
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    fn size(&self) -> Vec2<usize>;
    fn format(&self) -> PixelFormat;
    fn frame_rate(&self) -> f32;
    async fn send(&mut self, frame: VideoFrame) -> Result<(), VideoError>;
}

pub struct VideoOut {
    sender: mpsc::Sender<VideoFrame>,
    cancel: Arc<AtomicBool>,
    size: Vec2<usize>,
    format: PixelFormat,
    frame_rate: f32,
    join_handle: Option<JoinHandle<()>>,
}

impl VideoOut {
    fn create_device(config: &VideoOutConfig) -> Box<dyn VideoOutDevice> {
        match config {
            VideoOutConfig::V4l2(_) => Box::new(v4l2::V4l2::new()),
        }
    }

    async fn spawn_worker(
        mut receiver: mpsc::Receiver<VideoFrame>,
        config: VideoOutConfig,
        cancel: Arc<AtomicBool>,
    ) -> Result<(JoinHandle<()>, VideoOutConfig), VideoError> {
        let mut device = Self::create_device(&config);

        // Send the resolved config back from the worker thread via oneshot
        // channel. device.open() must run on the same OS thread as
        // blocking_write().
        let (init_tx, init_rx) = oneshot::channel::<Result<VideoOutConfig, VideoError>>();

        let join_handle = spawn_blocking({
            move || {
                // Open device on the worker thread. Opening a virtual camera
                // is one-shot setup: a failure here is final, no retry.
                let config = match device.open(&config) {
                    Ok(config) => {
                        let _ = init_tx.send(Ok(config.clone()));
                        config
                    }
                    Err(e) => {
                        let _ = init_tx.send(Err(e));
                        return;
                    }
                };

                let (_, _, frame_rate) = Self::decode_config(config);
                let frame_period = if frame_rate > 0.0 {
                    Some(Duration::from_secs_f32(1.0 / frame_rate))
                } else {
                    None
                };

                log_info!("video worker: starting delivery loop");
                while !cancel.load(Ordering::Relaxed) {
                    let frame = match receiver.blocking_recv() {
                        Some(frame) => frame,
                        None => break, // main closed the channel, so drop everything
                    };

                    let deadline = frame_period.map(|period| Instant::now() + period);
                    if let Err(error) = device.blocking_write(&frame) {
                        log_error!("video worker: write failed: {}", error);
                        break;
                    }

                    // pace delivery toward the configured frame rate
                    if let Some(deadline) = deadline {
                        let now = Instant::now();
                        if now < deadline {
                            std::thread::sleep(deadline - now);
                        }
                    }
                }
                device.close();
            }
        });

        let config = init_rx
            .await
            .map_err(|_| VideoError::Device("Worker thread died during init".to_string()))??;

        Ok((join_handle, config))
    }

    fn decode_config(config: VideoOutConfig) -> (Vec2<usize>, PixelFormat, f32) {
        match config {
            VideoOutConfig::V4l2(config) => (
                config.size.unwrap(),
                config.format.unwrap(),
                config.frame_rate.unwrap(),
            ),
        }
    }

    pub async fn open(config: VideoOutConfig) -> Result<Self, VideoError> {
        // channel for outgoing video frames
        let (sender, receiver) = mpsc::channel::<VideoFrame>(CHANNEL_CAPACITY);

        // external cancelation flag
        let cancel = Arc::new(AtomicBool::new(false));

        // spawn the worker
        let (join_handle, config) =
            Self::spawn_worker(receiver, config, Arc::clone(&cancel)).await?;

        let (size, format, frame_rate) = Self::decode_config(config);

        Ok(Self {
            sender,
            cancel,
            size,
            format,
            frame_rate,
            join_handle: Some(join_handle),
        })
    }
}

impl FrameSink for VideoOut {
    fn size(&self) -> Vec2<usize> {
        self.size
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// Queue one frame for delivery. The frame must match the negotiated
    /// size and format exactly; nothing partial ever reaches the device.
    async fn send(&mut self, frame: VideoFrame) -> Result<(), VideoError> {
        if frame.size != self.size || frame.format != self.format {
            return Err(VideoError::Format(format!(
                "frame is {}x{} {:?}, device wants {}x{} {:?}",
                frame.size.x, frame.size.y, frame.format, self.size.x, self.size.y, self.format
            )));
        }
        if frame.data.len() != frame.expected_len() {
            return Err(VideoError::Format(format!(
                "frame data is {} bytes, expected {}",
                frame.data.len(),
                frame.expected_len()
            )));
        }
        self.sender
            .send(frame)
            .await
            .map_err(|_| VideoError::Channel("video output channel closed".to_string()))
    }
}

impl Drop for VideoOut {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}
