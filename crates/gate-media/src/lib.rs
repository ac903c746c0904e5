//! # gate-media
//!
//! Selfie capture and image hosting for visitor check-in.
//!
//! - [`capture`]: camera seam, mirrored JPEG encoding, and the
//!   capture → retake → confirm session
//! - [`signature`]: HMAC-SHA256 upload signatures with a bounded lifetime
//! - [`imagekit`]: the [`ImageHost`] seam and its ImageKit implementation

pub mod capture;
mod error;
pub mod imagekit;
pub mod signature;

pub use capture::{Camera, CameraSession, CameraStream, FileCamera, SelfieCapture, StillCamera};
pub use error::MediaError;
pub use imagekit::{ImageHost, ImageKitClient, UploadedImage, image_url};
pub use signature::{UploadSignature, sign};
