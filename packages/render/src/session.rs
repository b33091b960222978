//! Mount/unmount lifecycle of a rendered map.
//!
//! A [`MapBackend`] is the only piece that talks to an actual map widget.
//! [`MapSession::init`] mounts a scene and reports failure as
//! [`SceneState::Error`] instead of propagating it, so the caller can show
//! an error view. The session unmounts on [`MapSession::dispose`] or when
//! dropped.

use std::io::Write;

use crate::{RenderError, scene::MapScene};

/// A map widget able to draw a [`MapScene`].
pub trait MapBackend {
    /// Draws `scene` into its container.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the scene cannot be drawn.
    fn mount(&mut self, scene: &MapScene) -> Result<(), RenderError>;

    /// Releases everything drawn into `container`.
    fn unmount(&mut self, container: &str);
}

/// Result of initialising a map.
#[derive(Debug)]
pub enum SceneState<B: MapBackend> {
    /// The scene is mounted.
    Ready(MapSession<B>),
    /// Mounting failed.
    Error(String),
}

impl<B: MapBackend> SceneState<B> {
    /// Whether the scene is mounted.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Error message, if mounting failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Error(message) => Some(message),
        }
    }
}

/// A mounted map.
#[derive(Debug)]
pub struct MapSession<B: MapBackend> {
    backend: Option<B>,
    container: String,
}

impl<B: MapBackend> MapSession<B> {
    /// Mounts `scene` with `backend`.
    ///
    /// A scene without a container id is rejected before the backend is
    /// touched.
    pub fn init(mut backend: B, scene: &MapScene) -> SceneState<B> {
        if scene.container.trim().is_empty() {
            let error = RenderError::MissingContainer;
            log::error!("Failed to initialise {} map: {error}", scene.variant);
            return SceneState::Error(error.to_string());
        }

        match backend.mount(scene) {
            Ok(()) => {
                log::debug!("Mounted {} map into #{}", scene.variant, scene.container);
                SceneState::Ready(Self {
                    backend: Some(backend),
                    container: scene.container.clone(),
                })
            }
            Err(e) => {
                log::error!("Failed to initialise {} map: {e}", scene.variant);
                SceneState::Error(e.to_string())
            }
        }
    }

    /// Container the map is mounted into.
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Unmounts the map and hands the backend back.
    #[must_use]
    pub fn dispose(mut self) -> B {
        let mut backend = self
            .backend
            .take()
            .unwrap_or_else(|| unreachable!("backend is only taken on dispose"));
        backend.unmount(&self.container);
        log::debug!("Disposed map in #{}", self.container);
        backend
    }
}

impl<B: MapBackend> Drop for MapSession<B> {
    fn drop(&mut self) {
        if let Some(backend) = &mut self.backend {
            backend.unmount(&self.container);
        }
    }
}

/// Backend that writes the scene as JSON, for offline export.
#[derive(Debug)]
pub struct JsonExport<W: Write> {
    writer: W,
}

impl<W: Write> JsonExport<W> {
    /// Creates an exporter writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MapBackend for JsonExport<W> {
    fn mount(&mut self, scene: &MapScene) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut self.writer, scene)?;
        self.writer
            .flush()
            .map_err(|e| RenderError::Backend(e.to_string()))
    }

    fn unmount(&mut self, _container: &str) {}
}
