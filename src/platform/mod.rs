//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine core via MPSC.
//
// Architecture:
// ```text
//  Main Thread:                      Logic Thread:
//  ┌────────────────────────┐       ┌───────────────────────┐
//  │  Winit Event Loop      │       │  Engine               │
//  │   ↓                    │       │   ├─ handle_event()   │
//  │  WindowHost            │       │   └─ frame()          │
//  │   ├─ maps Winit types  │       └───────────────────────┘
//  │   └─ tracks cursor     │                 ↑
//  │   ↓                    │                 │
//  │  MPSC Channel ─────────┼─────────────────┘
//  └────────────────────────┘       HostEvent
// ```
//
// Key Design Decisions:
// - **One channel, two message kinds**: input events and the close
//   request travel the same channel so the logic thread observes them
//   in arrival order
// - **Graceful channel disconnect**: if the logic thread dies, the host
//   logs a warning but keeps running so the window can still be closed
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so `run()` must be called from the thread that owns main
//
// Responsibilities:
// - Create and manage the OS window
// - Convert Winit input into the engine's event vocabulary
// - Forward events to the logic thread as they arrive
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::{InputEvent, KeyCode};

//=== HostEvent ===========================================================

/// Messages sent from the window host to the logic thread.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// One translated device event, in arrival order.
    Input(InputEvent),

    /// Window close requested by the user or the OS. The logic thread
    /// should terminate cleanly upon receiving this.
    CloseRequested,
}

//=== HostError ===========================================================

/// Window host initialization and runtime errors.
///
/// These are fatal: without an event loop there is no window and no
/// input source.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(winit::error::EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(winit::error::EventLoopError),
}

//=== WindowHost ==========================================================

/// Window manager and input forwarder.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// [`HostEvent`]s to the logic thread over an MPSC channel.
///
/// # Lifecycle
///
/// 1. `WindowHost::new(sender)` constructs the host
/// 2. `host.run()` starts the event loop and blocks until exit
/// 3. Winit drives the `ApplicationHandler` methods
/// 4. User closes the window → `CloseRequested` is sent → loop exits
///
/// The window itself is created lazily in `resumed()` (mobile resume
/// may call it more than once).
pub struct WindowHost {
    window: Option<Window>,
    sender: Sender<HostEvent>,
    title: String,
    size: (u32, u32),
    cursor: (f32, f32),
}

impl WindowHost {
    //--- Construction -----------------------------------------------------

    /// Creates a host forwarding into the given channel.
    pub fn new(sender: Sender<HostEvent>) -> Self {
        info!(target: "platform", "Window host initialized");
        Self {
            window: None,
            sender,
            title: "Caprine Engine".to_string(),
            size: (800, 600),
            cursor: (0.0, 0.0),
        }
    }

    /// Overrides the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overrides the initial logical window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until the window closes.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit
    /// requirement).
    pub fn run(mut self) -> Result<(), HostError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(HostError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(HostError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn forward(&self, event: InputEvent) {
        if self.sender.send(HostEvent::Input(event)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping event");
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WindowHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.size;
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.sender.send(HostEvent::CloseRequested);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.sender.send(HostEvent::CloseRequested);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.repeat {
                    return;
                }
                let key = match key_event.physical_key {
                    PhysicalKey::Code(code) => map_key(code),
                    PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
                };
                if key == KeyCode::Unidentified {
                    trace!(target: "platform::input", "Unmapped key ignored");
                    return;
                }
                let event = match key_event.state {
                    ElementState::Pressed => InputEvent::KeyDown(key),
                    ElementState::Released => InputEvent::KeyUp(key),
                };
                self.forward(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.forward(InputEvent::PointerMoved { x, y });
            }

            WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => {
                let (x, y) = self.cursor;
                match button {
                    MouseButton::Left => self.forward(InputEvent::Click { x, y }),
                    MouseButton::Right => self.forward(InputEvent::RightClick { x, y }),
                    _ => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32,
                };
                self.forward(InputEvent::Wheel { delta });
            }

            WindowEvent::RedrawRequested => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Resized, Focused, etc. carry no input.
            }
        }
    }
}

//=== Key Mapping =========================================================

/// Translates a Winit physical key into the engine's vocabulary.
///
/// Anything outside the gameplay set maps to `Unidentified` and is
/// dropped by the host before it crosses the channel.
fn map_key(code: winit::keyboard::KeyCode) -> KeyCode {
    use winit::keyboard::KeyCode as W;

    match code {
        W::Digit0 => KeyCode::Digit0,
        W::Digit1 => KeyCode::Digit1,
        W::Digit2 => KeyCode::Digit2,
        W::Digit3 => KeyCode::Digit3,
        W::Digit4 => KeyCode::Digit4,
        W::Digit5 => KeyCode::Digit5,
        W::Digit6 => KeyCode::Digit6,
        W::Digit7 => KeyCode::Digit7,
        W::Digit8 => KeyCode::Digit8,
        W::Digit9 => KeyCode::Digit9,
        W::KeyA => KeyCode::KeyA,
        W::KeyB => KeyCode::KeyB,
        W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD,
        W::KeyE => KeyCode::KeyE,
        W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG,
        W::KeyH => KeyCode::KeyH,
        W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ,
        W::KeyK => KeyCode::KeyK,
        W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM,
        W::KeyN => KeyCode::KeyN,
        W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP,
        W::KeyQ => KeyCode::KeyQ,
        W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS,
        W::KeyT => KeyCode::KeyT,
        W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV,
        W::KeyW => KeyCode::KeyW,
        W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY,
        W::KeyZ => KeyCode::KeyZ,
        W::ArrowUp => KeyCode::ArrowUp,
        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,
        W::Space => KeyCode::Space,
        W::Enter => KeyCode::Enter,
        W::Escape => KeyCode::Escape,
        W::ShiftLeft => KeyCode::ShiftLeft,
        W::ShiftRight => KeyCode::ShiftRight,
        _ => KeyCode::Unidentified,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode as W;

    #[test]
    fn gameplay_keys_map_one_to_one() {
        assert_eq!(map_key(W::KeyW), KeyCode::KeyW);
        assert_eq!(map_key(W::ShiftLeft), KeyCode::ShiftLeft);
        assert_eq!(map_key(W::ArrowUp), KeyCode::ArrowUp);
        assert_eq!(map_key(W::Digit3), KeyCode::Digit3);
        assert_eq!(map_key(W::Escape), KeyCode::Escape);
    }

    #[test]
    fn non_gameplay_keys_are_unidentified() {
        assert_eq!(map_key(W::F12), KeyCode::Unidentified);
        assert_eq!(map_key(W::Backquote), KeyCode::Unidentified);
        assert_eq!(map_key(W::NumpadAdd), KeyCode::Unidentified);
    }

    #[test]
    fn host_events_are_cloneable() {
        let event = HostEvent::Input(InputEvent::Wheel { delta: 1.0 });
        let _cloned = event.clone();
        let _closed = HostEvent::CloseRequested.clone();
    }
}
