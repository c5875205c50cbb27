//! A camera backed by an image file on disk.
//!
//! Every capture re-reads the file, so replacing it between captures
//! behaves like pointing the camera at a new document.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::camera::{Camera, CameraConstraints};
use crate::error::{CameraError, CaptureError};
use crate::frame::CapturedFrame;

#[derive(Debug)]
pub struct StillImageCamera {
    path: PathBuf,
    ready: bool,
}

impl StillImageCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ready: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

impl Camera for StillImageCamera {
    fn initialize(
        &mut self,
        constraints: CameraConstraints,
    ) -> impl Future<Output = Result<(), CameraError>> + Send {
        async move {
            if constraints.audio {
                tracing::debug!("audio requested but not supported by a still-image camera");
            }
            match tokio::fs::metadata(&self.path).await {
                Ok(meta) if meta.is_file() => {
                    self.ready = true;
                    tracing::debug!(facing = ?constraints.facing, "still-image camera ready");
                    Ok(())
                }
                Ok(_) => Err(CameraError::Unavailable(format!(
                    "{} is not a file",
                    self.path.display()
                ))),
                Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                    Err(CameraError::PermissionDenied)
                }
                Err(e) => Err(CameraError::Unavailable(format!(
                    "{}: {e}",
                    self.path.display()
                ))),
            }
        }
    }

    fn capture_frame(&mut self) -> impl Future<Output = Result<CapturedFrame, CaptureError>> + Send {
        async move {
            if !self.ready {
                return Err(CaptureError::NotReady);
            }
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|e| CaptureError::Source(e.to_string()))?;
            if bytes.is_empty() {
                return Err(CaptureError::EmptyFrame);
            }
            Ok(CapturedFrame::new(bytes, media_type_for(&self.path)))
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn release(&mut self) {
        if self.ready {
            self.ready = false;
            tracing::debug!("still-image camera released");
        }
    }
}
