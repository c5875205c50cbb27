//! The camera boundary.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{CameraError, CaptureError};
use crate::frame::CapturedFrame;

/// Preferred facing direction of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Rear camera, the one pointed at a document.
    #[default]
    Environment,
    /// Front camera.
    User,
}

/// Stream constraints requested at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConstraints {
    /// A preference, not a requirement: devices with a single camera use it.
    pub facing: FacingMode,
    pub audio: bool,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            audio: false,
        }
    }
}

/// A device that produces still frames.
///
/// Owned by exactly one session. The owner calls [`Camera::release`] on
/// success, on close and on drop; implementations must tolerate repeated
/// calls.
pub trait Camera: Send {
    /// Start the stream. After `Ok`, [`Camera::is_ready`] returns `true`.
    fn initialize(
        &mut self,
        constraints: CameraConstraints,
    ) -> impl Future<Output = Result<(), CameraError>> + Send;

    /// Take one still frame from the live stream.
    fn capture_frame(&mut self) -> impl Future<Output = Result<CapturedFrame, CaptureError>> + Send;

    /// Whether the stream is live and can deliver frames.
    fn is_ready(&self) -> bool;

    /// Stop the stream and free the device. Synchronous and idempotent;
    /// failures are logged, never returned.
    fn release(&mut self);
}
