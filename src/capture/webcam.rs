//! Webcam capture using nokhwa
//!
//! The camera handle lives on a dedicated thread that keeps decoding the
//! latest frame into a shared slot; `grab` hands out a copy of that slot. The
//! stream is stopped when the source is released.

use super::traits::{CameraInfo, CaptureError, CaptureResult, FrameSource, Resolution, RgbaFrame};
use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
};
use nokhwa::Camera;
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

/// Get list of available cameras
pub fn get_cameras() -> Vec<CameraInfo> {
    match nokhwa::query(ApiBackend::Auto) {
        Ok(cameras) => cameras
            .into_iter()
            .map(|info| {
                let id = match info.index() {
                    CameraIndex::Index(i) => i.to_string(),
                    CameraIndex::String(s) => s.to_string(),
                };
                CameraInfo {
                    id,
                    name: info.human_name().to_string(),
                }
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to enumerate cameras: {:?}", e);
            Vec::new()
        }
    }
}

/// Parse a configured device id into a camera index
fn camera_index(device_id: Option<&str>) -> CameraIndex {
    match device_id {
        Some(id) => match id.parse::<u32>() {
            Ok(idx) => CameraIndex::Index(idx),
            Err(_) => CameraIndex::String(id.to_string()),
        },
        None => CameraIndex::Index(0),
    }
}

/// Live webcam frame source
pub struct WebcamSource {
    id: String,
    running: Arc<AtomicBool>,
    latest: Arc<ParkingMutex<Option<RgbaFrame>>>,
    capture_thread: Option<std::thread::JoinHandle<()>>,
}

impl WebcamSource {
    /// Open a camera and start streaming
    ///
    /// Blocks until the device either delivers its stream or refuses to open.
    pub fn open(device_id: Option<&str>, requested: Resolution) -> CaptureResult<Self> {
        if get_cameras().is_empty() {
            return Err(CaptureError::DeviceNotFound("No cameras found".to_string()));
        }

        let index = camera_index(device_id);
        let id = format!("webcam:{}", index);
        let running = Arc::new(AtomicBool::new(true));
        let latest = Arc::new(ParkingMutex::new(None));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<Resolution, String>>();

        let thread_running = running.clone();
        let thread_latest = latest.clone();
        let handle = std::thread::spawn(move || {
            let format = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::Closest(
                CameraFormat::new_from(requested.width, requested.height, FrameFormat::MJPEG, 30),
            ));

            let mut camera = match Camera::new(index.clone(), format) {
                Ok(c) => c,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("{:?}", e)));
                    return;
                }
            };

            if let Err(e) = camera.open_stream() {
                let _ = ready_tx.send(Err(format!("{:?}", e)));
                return;
            }

            let resolution = camera.camera_format().resolution();
            let _ = ready_tx.send(Ok(Resolution::new(
                resolution.width(),
                resolution.height(),
            )));

            while thread_running.load(Ordering::SeqCst) {
                // Blocks until the camera delivers the next frame
                let decoded = camera
                    .frame()
                    .and_then(|buffer| buffer.decode_image::<RgbAFormat>());
                match decoded {
                    Ok(image) => {
                        let (width, height) = (image.width(), image.height());
                        if let Ok(frame) = RgbaFrame::new(width, height, image.into_raw()) {
                            *thread_latest.lock() = Some(frame);
                        }
                    }
                    Err(e) => {
                        tracing::debug!("Failed to capture frame: {:?}", e);
                    }
                }
            }

            if let Err(e) = camera.stop_stream() {
                tracing::warn!("Error stopping camera stream: {:?}", e);
            }
            tracing::info!("Webcam capture thread stopped");
        });

        match ready_rx.recv() {
            Ok(Ok(actual)) => {
                tracing::info!(
                    "Webcam opened: {}x{} (requested {}x{})",
                    actual.width,
                    actual.height,
                    requested.width,
                    requested.height
                );
                Ok(Self {
                    id,
                    running,
                    latest,
                    capture_thread: Some(handle),
                })
            }
            Ok(Err(reason)) => {
                let _ = handle.join();
                Err(CaptureError::PermissionDenied(reason))
            }
            Err(_) => {
                let _ = handle.join();
                Err(CaptureError::PermissionDenied(
                    "camera thread exited before opening".to_string(),
                ))
            }
        }
    }
}

impl FrameSource for WebcamSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn grab(&mut self) -> CaptureResult<RgbaFrame> {
        self.latest
            .lock()
            .clone()
            .ok_or_else(|| CaptureError::FrameUnavailable("no frame yet".to_string()))
    }

    fn release(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
        *self.latest.lock() = None;
    }
}
