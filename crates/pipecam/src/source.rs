use {base::log_error, std::io::Read, tokio::sync::mpsc};

// capacity of the incoming frame channel
const CHANNEL_CAPACITY: usize = 4;

/// Pulls fixed-size frames from a byte stream on a dedicated reader thread.
///
/// The stream is an unbroken concatenation of frames with no delimiters, so
/// the worker reads exactly `frame_size` bytes per frame. A short read
/// (end of stream before a frame is complete) is a clean termination signal,
/// not an error: the channel closes and `recv` returns `None`. A partial
/// frame is never forwarded.
///
/// The reader thread is detached rather than joined. A `read` blocked on a
/// stalled producer cannot be interrupted from here, so shutdown must not
/// wait for it; the thread notices the closed channel on its next frame or
/// dies with the process.
pub struct FrameSource {
    receiver: mpsc::Receiver<Vec<u8>>,
}

impl FrameSource {
    pub fn spawn(mut reader: impl Read + Send + 'static, frame_size: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<Vec<u8>>(CHANNEL_CAPACITY);

        std::thread::spawn(move || {
            loop {
                let mut frame = vec![0u8; frame_size];
                match read_frame(&mut reader, &mut frame) {
                    Ok(true) => {
                        if sender.blocking_send(frame).is_err() {
                            return; // main closed the channel, so drop everything
                        }
                    }
                    Ok(false) => return, // end of stream
                    Err(error) => {
                        log_error!("frame source: read failed: {}", error);
                        return;
                    }
                }
            }
        });

        Self { receiver }
    }

    /// Frame source reading from this process's stdin.
    pub fn stdin(frame_size: usize) -> Self {
        Self::spawn(std::io::stdin(), frame_size)
    }

    /// Receive the next complete frame. `None` means clean end of stream.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.receiver.recv().await
    }
}

/// Fills `buf` completely from `reader`. Returns `Ok(false)` if the stream
/// ends before the buffer is full.
fn read_frame(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(error) if error.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_frame_full() {
        let mut reader = std::io::Cursor::new(vec![7u8; 12]);
        let mut buf = [0u8; 12];
        assert!(read_frame(&mut reader, &mut buf).unwrap());
        assert_eq!(buf, [7u8; 12]);
    }

    #[test]
    fn test_read_frame_short() {
        let mut reader = std::io::Cursor::new(vec![7u8; 5]);
        let mut buf = [0u8; 12];
        assert!(!read_frame(&mut reader, &mut buf).unwrap());
    }

    #[test]
    fn test_read_frame_empty() {
        let mut reader = std::io::Cursor::new(Vec::<u8>::new());
        let mut buf = [0u8; 12];
        assert!(!read_frame(&mut reader, &mut buf).unwrap());
    }

    /// `read` that never returns until the far end hangs up.
    struct StalledReader(std::sync::mpsc::Receiver<u8>);

    impl Read for StalledReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_drop_while_reader_stalled() {
        // keep the sender alive so the reader blocks for the whole test;
        // dropping the source (and later the runtime) must not wait on it
        let (sender, receiver) = std::sync::mpsc::channel::<u8>();
        std::mem::forget(sender);
        let source = FrameSource::spawn(StalledReader(receiver), 16);
        drop(source);
    }
}
