//! Selfie capture.
//!
//! A [`Camera`] hands out a live [`CameraStream`]. [`CameraSession`] drives
//! one capture: grab a frame, mirror it the way the preview showed it,
//! encode it as JPEG, then stop the stream. Retaking discards the capture
//! and reopens the stream.

use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

use crate::error::MediaError;

/// JPEG quality for captured selfies.
pub const JPEG_QUALITY: u8 = 90;

/// A device that can start a video stream.
pub trait Camera {
    type Stream: CameraStream;

    /// Start streaming.
    ///
    /// # Errors
    ///
    /// Implementations return [`MediaError::CameraAccess`] when the device is
    /// missing, busy, or permission was refused.
    fn open(&mut self) -> Result<Self::Stream, MediaError>;
}

/// A running stream.
pub trait CameraStream {
    /// The current frame. A stream that is still warming up may return a
    /// zero-sized image.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::CaptureNotReady`] if no frame can be read.
    fn frame(&mut self) -> Result<DynamicImage, MediaError>;

    /// Release the device.
    fn stop(&mut self);
}

/// An encoded selfie ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfieCapture {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub captured_at: DateTime<Utc>,
}

impl SelfieCapture {
    /// Inline preview, `data:image/jpeg;base64,...`.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// Mirror `frame` horizontally and encode it as JPEG.
///
/// # Errors
///
/// Returns [`MediaError::CaptureNotReady`] for a zero-sized frame, or
/// [`MediaError::Encode`] if encoding fails.
pub fn encode_selfie(frame: &DynamicImage) -> Result<SelfieCapture, MediaError> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(MediaError::CaptureNotReady);
    }

    let rgb = frame.fliph().to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)?;

    Ok(SelfieCapture {
        bytes,
        width,
        height,
        captured_at: Utc::now(),
    })
}

/// One capture attempt against a camera.
///
/// The stream is stopped after a successful capture, on [`Self::close`], and
/// when the session is dropped.
pub struct CameraSession<C: Camera> {
    camera: C,
    stream: Option<C::Stream>,
    capture: Option<SelfieCapture>,
}

impl<C: Camera> CameraSession<C> {
    /// Open the camera and start streaming.
    ///
    /// # Errors
    ///
    /// Propagates [`Camera::open`] failures.
    pub fn open(mut camera: C) -> Result<Self, MediaError> {
        let stream = camera.open()?;
        tracing::debug!("camera stream started");
        Ok(Self {
            camera,
            stream: Some(stream),
            capture: None,
        })
    }

    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&SelfieCapture> {
        self.capture.as_ref()
    }

    /// Grab and encode the current frame, then stop the stream.
    ///
    /// A frame that is not ready leaves the stream running so the caller can
    /// simply try again.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::CaptureNotReady`] when there is no live stream or
    /// the frame is empty.
    pub fn capture(&mut self) -> Result<&SelfieCapture, MediaError> {
        let stream = self.stream.as_mut().ok_or(MediaError::CaptureNotReady)?;
        let frame = stream.frame()?;
        let selfie = encode_selfie(&frame)?;
        tracing::debug!(
            width = selfie.width,
            height = selfie.height,
            bytes = selfie.bytes.len(),
            "selfie captured"
        );
        self.close();
        Ok(self.capture.insert(selfie))
    }

    /// Discard the capture and restart the stream.
    ///
    /// # Errors
    ///
    /// Propagates [`Camera::open`] failures.
    pub fn retake(&mut self) -> Result<(), MediaError> {
        self.capture = None;
        if self.stream.is_none() {
            self.stream = Some(self.camera.open()?);
        }
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("camera stream stopped");
        }
    }

    /// End the session, keeping the capture if there is one.
    #[must_use]
    pub fn take(mut self) -> Option<SelfieCapture> {
        self.close();
        self.capture.take()
    }
}

impl<C: Camera> Drop for CameraSession<C> {
    fn drop(&mut self) {
        self.close();
    }
}

/// A stream that always shows the same picture.
#[derive(Debug)]
pub struct StillStream {
    image: Option<DynamicImage>,
}

impl CameraStream for StillStream {
    fn frame(&mut self) -> Result<DynamicImage, MediaError> {
        self.image.clone().ok_or(MediaError::CaptureNotReady)
    }

    fn stop(&mut self) {
        self.image = None;
    }
}

/// A camera backed by an image file on disk.
#[derive(Debug, Clone)]
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Camera for FileCamera {
    type Stream = StillStream;

    fn open(&mut self) -> Result<StillStream, MediaError> {
        let image = image::open(&self.path)
            .map_err(|e| MediaError::CameraAccess(format!("{}: {e}", self.path.display())))?;
        Ok(StillStream { image: Some(image) })
    }
}

/// A camera that shows a fixed in-memory frame.
#[derive(Debug, Clone)]
pub struct StillCamera {
    image: DynamicImage,
}

impl StillCamera {
    #[must_use]
    pub const fn new(image: DynamicImage) -> Self {
        Self { image }
    }
}

impl Camera for StillCamera {
    type Stream = StillStream;

    fn open(&mut self) -> Result<StillStream, MediaError> {
        Ok(StillStream {
            image: Some(self.image.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    /// Left half red, right half blue.
    fn split_frame() -> DynamicImage {
        let img = RgbImage::from_fn(32, 16, |x, _| {
            if x < 16 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn capture_mirrors_and_encodes_jpeg() {
        let selfie = encode_selfie(&split_frame()).unwrap();
        assert_eq!((selfie.width, selfie.height), (32, 16));
        assert_eq!(&selfie.bytes[..2], &[0xff, 0xd8]);

        let decoded = image::load_from_memory(&selfie.bytes).unwrap().to_rgb8();
        let left = decoded.get_pixel(4, 8);
        assert!(left[2] > left[0], "left edge should be blue after mirroring");
    }

    #[test]
    fn empty_frame_is_not_ready() {
        let err = encode_selfie(&DynamicImage::new_rgb8(0, 0)).unwrap_err();
        assert!(matches!(err, MediaError::CaptureNotReady));
        assert_eq!(err.to_string(), "Camera not ready, try again");
    }

    #[test]
    fn capture_stops_the_stream_and_retake_restarts_it() {
        let mut session = CameraSession::open(StillCamera::new(split_frame())).unwrap();
        assert!(session.is_live());

        session.capture().unwrap();
        assert!(!session.is_live());
        assert!(session.current().is_some());
        assert!(matches!(session.capture(), Err(MediaError::CaptureNotReady)));

        session.retake().unwrap();
        assert!(session.is_live());
        assert!(session.current().is_none());

        session.capture().unwrap();
        let selfie = session.take().unwrap();
        assert!(selfie.data_url().starts_with("data:image/jpeg;base64,/9j/"));
    }

    #[test]
    fn warming_stream_stays_live_after_failed_capture() {
        let mut session =
            CameraSession::open(StillCamera::new(DynamicImage::new_rgb8(0, 0))).unwrap();
        assert!(matches!(session.capture(), Err(MediaError::CaptureNotReady)));
        assert!(session.is_live());
        assert!(session.current().is_none());
    }

    #[test]
    fn file_camera_reads_an_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        split_frame().save(&path).unwrap();

        let mut session = CameraSession::open(FileCamera::new(&path)).unwrap();
        assert_eq!(session.capture().unwrap().width, 32);
    }

    #[test]
    fn missing_file_is_a_camera_access_error() {
        let err = CameraSession::open(FileCamera::new("/nonexistent/frame.png"))
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Unable to access camera"));
    }
}
