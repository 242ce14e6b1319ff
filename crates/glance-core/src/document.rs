//! The image being viewed and its loading lifecycle.
//!
//! Loading reads the file on the calling thread, checks the format
//! signature, then hands a private copy of the bytes to a background decode
//! thread. The thread reports exactly one [`DecodeOutcome`] over a channel;
//! from then on the pixels belong to the [`Document`] alone. Views learn
//! about progress through [`DocumentEvent`]s returned by [`Document::poll`].

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;

use image::ImageFormat;
use tracing::{debug, info, warn};

use crate::busy::{BusyLevel, ConsumerId, SharedBusyService};
use crate::error::{GlanceError, Result};
use crate::geom::Rect;
use crate::raster::Raster;

/// Notifications a document sends to its views.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentEvent {
    /// A new image started loading; previous pixels are gone.
    LoadingStarted,
    /// Dimensions are known (pixels may still be undecoded).
    SizeKnown { width: u32, height: u32 },
    /// This image-space rect now holds fully decoded pixels.
    RectUpdated(Rect),
    /// Loading finished successfully.
    Loaded,
    /// Loading failed; the document is empty.
    LoadFailed { message: String },
    /// Pixels changed in place (e.g. by an edit).
    Modified,
}

/// Terminal result of a background decode.
#[derive(Debug)]
pub enum DecodeOutcome {
    Succeeded(Raster),
    Failed(String),
}

/// Decode `bytes` as `format` into a raster.
pub fn decode_bytes(bytes: &[u8], format: ImageFormat) -> Result<Raster> {
    let img = image::load_from_memory_with_format(bytes, format)?;
    Raster::from_dynamic(img)
}

/// Identify the format from the leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat> {
    image::guess_format(bytes).map_err(|_| GlanceError::UnknownFormat)
}

/// A decode running on its own thread.
pub struct DecodeTask {
    rx: mpsc::Receiver<DecodeOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl DecodeTask {
    /// Start decoding `bytes` (owned by the task) on a background thread.
    pub fn spawn(bytes: Vec<u8>, format: ImageFormat) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("glance-decoder".into())
            .spawn(move || {
                let outcome = match decode_bytes(&bytes, format) {
                    Ok(raster) => DecodeOutcome::Succeeded(raster),
                    Err(e) => DecodeOutcome::Failed(e.to_string()),
                };
                let _ = tx.send(outcome);
            })?;
        Ok(Self {
            rx,
            handle: Some(handle),
        })
    }

    /// The outcome if the worker has finished, without blocking.
    pub fn try_outcome(&mut self) -> Option<DecodeOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.join();
                Some(DecodeOutcome::Failed(GlanceError::WorkerDisconnected.to_string()))
            }
        }
    }

    /// Block until the worker reports.
    pub fn wait(mut self) -> DecodeOutcome {
        let outcome = self
            .rx
            .recv()
            .unwrap_or_else(|_| DecodeOutcome::Failed(GlanceError::WorkerDisconnected.to_string()));
        self.join();
        outcome
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("decode worker panicked");
            }
        }
    }
}

/// The current image plus its loading state.
pub struct Document {
    path: Option<PathBuf>,
    format: Option<ImageFormat>,
    image: Option<Raster>,
    task: Option<DecodeTask>,
    events: VecDeque<DocumentEvent>,
    busy: Option<(SharedBusyService, ConsumerId)>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Document {
    /// With a busy service the document reports `Painting` while decoding.
    pub fn new(busy: Option<SharedBusyService>) -> Self {
        Self {
            path: None,
            format: None,
            image: None,
            task: None,
            events: VecDeque::new(),
            busy: busy.map(|svc| (svc, ConsumerId::next())),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    pub fn is_null(&self) -> bool {
        self.image.is_none()
    }

    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }

    pub fn width(&self) -> usize {
        self.image.as_ref().map_or(0, Raster::width)
    }

    pub fn height(&self) -> usize {
        self.image.as_ref().map_or(0, Raster::height)
    }

    fn set_busy(&self, level: BusyLevel) {
        if let Some((svc, id)) = &self.busy {
            svc.set_busy_level(*id, level);
        }
    }

    fn begin_load(&mut self, path: Option<PathBuf>) {
        self.task = None;
        self.image = None;
        self.format = None;
        self.path = path;
        self.events.push_back(DocumentEvent::LoadingStarted);
    }

    fn fail(&mut self, message: String) {
        warn!(path = ?self.path, %message, "image load failed");
        self.task = None;
        self.image = None;
        self.set_busy(BusyLevel::None);
        self.events.push_back(DocumentEvent::LoadFailed { message });
    }

    /// Start loading `path`. Failures are reported as a `LoadFailed` event.
    pub fn open(&mut self, path: &Path) {
        self.begin_load(Some(path.to_path_buf()));
        info!(path = %path.display(), "loading image");
        match std::fs::read(path) {
            Ok(bytes) => self.start_decode(bytes),
            Err(e) => self.fail(GlanceError::from(e).to_string()),
        }
    }

    /// Start loading in-memory data.
    pub fn open_bytes(&mut self, bytes: Vec<u8>) {
        self.begin_load(None);
        self.start_decode(bytes);
    }

    fn start_decode(&mut self, bytes: Vec<u8>) {
        let format = match sniff_format(&bytes) {
            Ok(f) => f,
            Err(e) => return self.fail(e.to_string()),
        };
        debug!(?format, size = bytes.len(), "starting background decode");
        self.format = Some(format);
        match DecodeTask::spawn(bytes, format) {
            Ok(task) => {
                self.task = Some(task);
                self.set_busy(BusyLevel::Painting);
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn finish(&mut self, outcome: DecodeOutcome) {
        self.task = None;
        self.set_busy(BusyLevel::None);
        match outcome {
            DecodeOutcome::Succeeded(raster) => {
                info!(width = raster.width(), height = raster.height(), "image decoded");
                let bounds = raster.bounds();
                self.events.push_back(DocumentEvent::SizeKnown {
                    width: raster.width() as u32,
                    height: raster.height() as u32,
                });
                self.image = Some(raster);
                self.events.push_back(DocumentEvent::RectUpdated(bounds));
                self.events.push_back(DocumentEvent::Loaded);
            }
            DecodeOutcome::Failed(message) => self.fail(message),
        }
    }

    /// Collect pending events, checking on the decode worker first.
    pub fn poll(&mut self) -> Vec<DocumentEvent> {
        if let Some(outcome) = self.task.as_mut().and_then(DecodeTask::try_outcome) {
            self.finish(outcome);
        }
        self.events.drain(..).collect()
    }

    /// Block until any running decode finishes, then collect events.
    pub fn wait(&mut self) -> Vec<DocumentEvent> {
        if let Some(task) = self.task.take() {
            let outcome = task.wait();
            self.finish(outcome);
        }
        self.events.drain(..).collect()
    }

    /// Install pixels whose content is not yet valid, e.g. from an
    /// incremental decoder that knows the size up front. Follow with
    /// [`Document::update_rect`] as parts become valid.
    pub fn set_image(&mut self, raster: Raster) {
        self.events.push_back(DocumentEvent::SizeKnown {
            width: raster.width() as u32,
            height: raster.height() as u32,
        });
        self.image = Some(raster);
    }

    /// Mutable pixels for producers filling in data.
    pub fn image_mut(&mut self) -> Option<&mut Raster> {
        self.image.as_mut()
    }

    /// Announce that `rect` now holds valid pixels.
    pub fn update_rect(&mut self, rect: Rect) {
        self.events.push_back(DocumentEvent::RectUpdated(rect));
    }

    /// Announce that the producer is done.
    pub fn finish_loading(&mut self) {
        self.events.push_back(DocumentEvent::Loaded);
    }

    /// Edit pixels in place and announce the change.
    pub fn modify(&mut self, edit: impl FnOnce(&mut Raster)) -> Result<()> {
        let image = self.image.as_mut().ok_or(GlanceError::NoDocument)?;
        edit(image);
        self.events.push_back(DocumentEvent::Modified);
        Ok(())
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        self.set_busy(BusyLevel::None);
    }
}
