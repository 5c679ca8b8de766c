//! Top-level controller for the capture → edit → send flow.
//!
//! Owns the zoom state, the current edit session, the drag gesture and the
//! status indicator. Front ends translate their input events into calls on
//! [`Controller`]; every external suspension point (frame acquisition,
//! zoom constraint, transport) is awaited here in sequence.

use std::time::{Duration, Instant};

use crate::camera::{self, CaptureError, FrameSource, SourceImage};
use crate::compositor::{self, EncodeError};
use crate::config::Config;
use crate::editor::{CropSettings, DragKind, DragState, EditSession, Rotation};
use crate::geometry::{Point, Rect, Size};
use crate::mapper::{self, MapError};
use crate::transport::{Dispatcher, SendGate, SendOutcome, Transport, TransportError};
use crate::zoom::{self, ZoomCapabilities, ZoomOutcome, ZoomState};

/// How long a status message stays visible.
pub const STATUS_HIDE_AFTER: Duration = Duration::from_secs(3);

/// Errors surfaced by the controller. None of them are fatal: after any
/// of these the controller is back in capture mode.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Mapping(#[from] MapError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("No photo is being edited")]
    NotEditing,
}

/// Tunables the controller needs, usually taken from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub viewport: Size,
    pub crop: CropSettings,
    pub zoom: ZoomCapabilities,
    pub jpeg_quality: u8,
    pub filename: String,
    pub instant_send: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            viewport: config.editor.viewport(),
            crop: config.editor.crop_settings(),
            zoom: config.zoom.capabilities(),
            jpeg_quality: config.capture.jpeg_quality,
            filename: config.capture.filename.clone(),
            instant_send: config.capture.instant_send,
        }
    }
}

/// User-visible status.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Sending,
    Sent,
    /// Something failed; the message is safe to show as-is
    Failed(String),
}

impl Status {
    pub fn message(&self) -> &str {
        match self {
            Status::Idle => "",
            Status::Sending => "Sending...",
            Status::Sent => "Sent to clipboard ✓",
            Status::Failed(message) => message,
        }
    }
}

/// Transient status line; hides itself [`STATUS_HIDE_AFTER`] after being shown.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    status: Status,
    shown_at: Option<Instant>,
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            shown_at: None,
        }
    }
}

impl StatusIndicator {
    pub fn show(&mut self, status: Status) {
        self.status = status;
        self.shown_at = Some(Instant::now());
    }

    pub fn current(&self) -> &Status {
        &self.status
    }

    /// Whether the status should still be on screen at `now`.
    ///
    /// "Sending" stays up until replaced.
    pub fn is_visible(&self, now: Instant) -> bool {
        match (&self.status, self.shown_at) {
            (Status::Idle, _) | (_, None) => false,
            (Status::Sending, Some(_)) => true,
            (_, Some(at)) => now.saturating_duration_since(at) < STATUS_HIDE_AFTER,
        }
    }
}

/// Where the flow currently is.
#[derive(Debug)]
pub enum Mode {
    /// Live preview; the shutter is armed
    Capturing,
    /// A still has been taken and is being rotated/cropped
    Editing {
        source: SourceImage,
        session: EditSession,
    },
}

/// What a shutter press did.
#[derive(Debug, Clone, PartialEq)]
pub enum ShutterOutcome {
    /// A send was in flight, so the press was ignored
    Ignored,
    /// The still was captured and edit mode entered
    Editing,
    /// Instant send: the still went straight to the transport
    Sent(SendOutcome),
}

/// Orchestrates zoom, capture, editing and sending.
pub struct Controller<S, T> {
    source: S,
    dispatcher: Dispatcher<T>,
    zoom: ZoomState,
    mode: Mode,
    drag: Option<DragState>,
    status: StatusIndicator,
    settings: ControllerSettings,
}

impl<S, T> std::fmt::Debug for Controller<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("zoom", &self.zoom)
            .field("mode", &self.mode)
            .field("drag", &self.drag)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl<S: FrameSource, T: Transport> Controller<S, T> {
    pub fn new(source: S, transport: T, settings: ControllerSettings) -> Self {
        let zoom = ZoomState::new(source.zoom_capabilities(), settings.zoom);
        Self {
            source,
            dispatcher: Dispatcher::new(transport),
            zoom,
            mode: Mode::Capturing,
            drag: None,
            status: StatusIndicator::default(),
            settings,
        }
    }

    /// Switch to a different frame source (e.g. another camera).
    ///
    /// Zoom state is rebuilt from the new source's capabilities and any
    /// edit in progress is dropped.
    pub fn replace_source(&mut self, source: S) {
        self.zoom = ZoomState::new(source.zoom_capabilities(), self.settings.zoom);
        self.source = source;
        self.mode = Mode::Capturing;
        self.drag = None;
        log::info!(
            "Frame source changed (native zoom: {})",
            self.zoom.native_supported()
        );
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.mode {
            Mode::Editing { session, .. } => Some(session),
            Mode::Capturing => None,
        }
    }

    pub fn source_image(&self) -> Option<&SourceImage> {
        match &self.mode {
            Mode::Editing { source, .. } => Some(source),
            Mode::Capturing => None,
        }
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn status(&self) -> &StatusIndicator {
        &self.status
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// The shared "sending" flag, for disabling controls while a send runs.
    pub fn send_gate(&self) -> &SendGate {
        self.dispatcher.gate()
    }

    pub fn is_sending(&self) -> bool {
        self.dispatcher.is_sending()
    }

    /// Zoom slider input. The factor is clamped to the current range first.
    pub async fn set_zoom(&mut self, factor: f64) -> ZoomOutcome {
        let factor = self.zoom.clamp(factor);
        let outcome = zoom::set_zoom(&mut self.zoom, &mut self.source, factor).await;
        if let ZoomOutcome::FellBack { error, .. } = &outcome {
            self.status
                .show(Status::Failed(format!("{}; using digital zoom", error)));
        }
        outcome
    }

    /// Shutter press: capture a still and enter edit mode.
    ///
    /// With instant send enabled the unedited still is sent right away.
    /// Ignored while a send is in flight.
    pub async fn shutter(&mut self) -> Result<ShutterOutcome, PipelineError> {
        if self.is_sending() {
            log::debug!("Shutter ignored: send in flight");
            return Ok(ShutterOutcome::Ignored);
        }

        self.mode = Mode::Capturing;
        self.drag = None;

        let source = match camera::capture(&mut self.source, self.zoom.region()).await {
            Ok(source) => source,
            Err(e) => {
                log::error!("{}", e);
                self.status.show(Status::Failed(e.to_string()));
                return Err(e.into());
            }
        };
        log::info!("Captured {}x{} still", source.width(), source.height());

        if self.settings.instant_send {
            let output = compositor::render(&source, Rotation::Deg0, None);
            let outcome = self.encode_and_send(&output).await?;
            return Ok(ShutterOutcome::Sent(outcome));
        }

        let session = EditSession::new(
            source.width(),
            source.height(),
            self.settings.viewport,
            self.settings.crop,
        );
        self.mode = Mode::Editing { source, session };
        Ok(ShutterOutcome::Editing)
    }

    /// Rotate the photo being edited by 90 degrees.
    pub fn rotate(&mut self) {
        if let Mode::Editing { session, .. } = &mut self.mode {
            session.rotate();
            self.drag = None;
        }
    }

    /// Turn crop mode on or off.
    pub fn toggle_crop(&mut self) {
        if let Mode::Editing { session, .. } = &mut self.mode {
            session.toggle_crop();
            self.drag = None;
        }
    }

    /// Place the crop rectangle directly (canvas coordinates).
    pub fn set_crop_rect(&mut self, rect: Rect) {
        if let Mode::Editing { session, .. } = &mut self.mode {
            session.set_crop_rect(rect);
        }
    }

    /// Pointer pressed on the crop body or one of its corner handles.
    pub fn pointer_down(&mut self, kind: DragKind, pointer: Point) {
        if let Mode::Editing { session, .. } = &self.mode {
            self.drag = session.begin_drag(kind, pointer);
        }
    }

    /// Pointer moved during a drag.
    pub fn pointer_move(&mut self, pointer: Point) {
        if let (Mode::Editing { session, .. }, Some(drag)) = (&mut self.mode, &self.drag) {
            session.drag_to(drag, pointer);
        }
    }

    /// Pointer released; the gesture ends.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Leave edit mode without sending.
    pub fn cancel(&mut self) {
        self.mode = Mode::Capturing;
        self.drag = None;
    }

    /// Render the edited photo and send it.
    ///
    /// Ignored (returns `SendOutcome::Skipped`) while another send is in
    /// flight. On success or any failure the controller returns to
    /// capture mode.
    pub async fn confirm(&mut self) -> Result<SendOutcome, PipelineError> {
        if self.is_sending() {
            log::debug!("Confirm ignored: send in flight");
            return Ok(SendOutcome::Skipped);
        }

        let output = {
            let Mode::Editing { source, session } = &self.mode else {
                return Err(PipelineError::NotEditing);
            };
            match mapper::map_session_crop(session) {
                Ok(rect) => compositor::render(source, session.rotation(), rect),
                Err(e) => {
                    log::error!("Edit aborted: {}", e);
                    self.status.show(Status::Failed(e.to_string()));
                    self.cancel();
                    return Err(e.into());
                }
            }
        };

        self.cancel();
        self.encode_and_send(&output).await
    }

    /// Send an already encoded image (file picker fallback).
    pub async fn send_file(&mut self, bytes: Vec<u8>, filename: &str) -> Result<SendOutcome, PipelineError> {
        if self.is_sending() {
            return Ok(SendOutcome::Skipped);
        }
        self.send_bytes(bytes, filename).await
    }

    async fn encode_and_send(
        &mut self,
        output: &compositor::OutputRaster,
    ) -> Result<SendOutcome, PipelineError> {
        let jpeg = match compositor::encode_jpeg(output, self.settings.jpeg_quality) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                log::error!("{}", e);
                self.status.show(Status::Failed(e.to_string()));
                return Err(e.into());
            }
        };
        let filename = self.settings.filename.clone();
        self.send_bytes(jpeg, &filename).await
    }

    async fn send_bytes(&mut self, bytes: Vec<u8>, filename: &str) -> Result<SendOutcome, PipelineError> {
        self.status.show(Status::Sending);
        match self.dispatcher.send(bytes, filename).await {
            Ok(SendOutcome::Sent(receipt)) => {
                self.status.show(Status::Sent);
                Ok(SendOutcome::Sent(receipt))
            }
            Ok(SendOutcome::Skipped) => Ok(SendOutcome::Skipped),
            Err(e) => {
                log::warn!("Send failed: {}", e);
                self.status
                    .show(Status::Failed("Send failed, please retry".to_string()));
                Err(e.into())
            }
        }
    }
}
