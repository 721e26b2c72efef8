use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use textinput_core::{ControlSettings, LogicalPoint, NativeBridge, NativeStatus, PositionMapper, ScaleFactor};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Ime, WindowEvent};
use winit::keyboard::ModifiersState;
use winit::window::Window;

use crate::editor::ImeEditor;
use crate::keys::{clipboard_shortcut, edit_command, inserts_text, ClipboardShortcut};

/// The window calls the bridge makes. Implemented for winit's `Window`.
pub trait ImeWindow: Send + Sync {
    fn set_ime_allowed(&self, allowed: bool);
    fn set_ime_cursor_area(&self, position: PhysicalPosition<f64>, size: PhysicalSize<f64>);
}

impl ImeWindow for Window {
    fn set_ime_allowed(&self, allowed: bool) {
        Window::set_ime_allowed(self, allowed);
    }

    fn set_ime_cursor_area(&self, position: PhysicalPosition<f64>, size: PhysicalSize<f64>) {
        Window::set_ime_cursor_area(self, position, size);
    }
}

#[derive(Debug)]
struct ImeState {
    editor: ImeEditor,
    scale: ScaleFactor,
    modifiers: ModifiersState,
    /// Set while the platform reports IME enabled; text then arrives as
    /// commits instead of key presses.
    ime_enabled: bool,
}

type SharedState = Arc<Mutex<ImeState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, ImeState> {
    state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        log::warn!("IME state lock poisoned; recovering");
        poisoned.into_inner()
    })
}

/// Native bridge over a winit window's IME.
pub struct WinitImeBridge<W: ImeWindow = Window> {
    window: Arc<W>,
    state: SharedState,
    settings: ControlSettings,
}

impl<W: ImeWindow> WinitImeBridge<W> {
    /// Creates the bridge and the event handle that feeds it.
    pub fn new(window: Arc<W>, scale_factor: f64) -> (Self, WinitImeEvents) {
        Self::with_settings(window, scale_factor, ControlSettings::default())
    }

    pub fn with_settings(
        window: Arc<W>,
        scale_factor: f64,
        settings: ControlSettings,
    ) -> (Self, WinitImeEvents) {
        let state = Arc::new(Mutex::new(ImeState {
            editor: ImeEditor::new(),
            scale: ScaleFactor::new(scale_factor),
            modifiers: ModifiersState::empty(),
            ime_enabled: false,
        }));
        let events = WinitImeEvents::new(Arc::clone(&state));
        (
            Self {
                window,
                state,
                settings,
            },
            events,
        )
    }

    pub fn window(&self) -> &Arc<W> {
        &self.window
    }
}

impl<W: ImeWindow> NativeBridge for WinitImeBridge<W> {
    fn attach(&mut self) {
        lock(&self.state).editor.attach();
        self.window.set_ime_allowed(true);
    }

    fn detach(&mut self) {
        {
            let mut state = lock(&self.state);
            state.editor.detach();
            state.ime_enabled = false;
        }
        self.window.set_ime_allowed(false);
    }

    fn set_position(&mut self, position: LogicalPoint) {
        let (client, scale) = {
            let state = lock(&self.state);
            if !state.editor.is_attached() {
                return;
            }
            (state.scale.to_client(position), state.scale.get())
        };
        self.window.set_ime_cursor_area(
            PhysicalPosition::new(client.x, client.y),
            PhysicalSize::new(
                self.settings.frame_width * scale,
                self.settings.frame_height * scale,
            ),
        );
    }

    fn status(&mut self) -> NativeStatus {
        lock(&self.state).editor.status()
    }

    fn set_status(&mut self, status: &NativeStatus) {
        lock(&self.state).editor.set_status(status);
    }

    fn is_attached(&self) -> bool {
        lock(&self.state).editor.is_attached()
    }
}

/// Event loop side of a [`WinitImeBridge`].
pub struct WinitImeEvents {
    state: SharedState,
    /// Kept alive for the whole session; X11 drops clipboard contents with
    /// their owner.
    #[cfg(all(
        feature = "clipboard",
        not(target_arch = "wasm32"),
        not(target_os = "android")
    ))]
    clipboard: Option<arboard::Clipboard>,
}

impl WinitImeEvents {
    fn new(state: SharedState) -> Self {
        Self {
            state,
            #[cfg(all(
                feature = "clipboard",
                not(target_arch = "wasm32"),
                not(target_os = "android")
            ))]
            clipboard: arboard::Clipboard::new()
                .map_err(|err| log::warn!("clipboard unavailable: {err}"))
                .ok(),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        lock(&self.state).scale.get()
    }

    /// Text and selection in storage form, for tests and debugging overlays.
    pub fn snapshot(&self) -> ImeEditor {
        lock(&self.state).editor.clone()
    }

    /// Feeds a window event to the editor. Returns true when the event was
    /// consumed as text input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                lock(&self.state).modifiers = modifiers.state();
                false
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                lock(&self.state).scale.set(*scale_factor);
                false
            }
            WindowEvent::Ime(ime) => self.handle_ime(ime),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return false;
                }
                self.handle_key(&event.logical_key, event.text.as_deref())
            }
            _ => false,
        }
    }

    fn handle_ime(&mut self, ime: &Ime) -> bool {
        let mut state = lock(&self.state);
        match ime {
            Ime::Enabled => {
                log::debug!("IME enabled");
                state.ime_enabled = true;
                false
            }
            Ime::Preedit(text, cursor) => {
                state.editor.set_preedit(text, *cursor);
                state.editor.is_attached()
            }
            Ime::Commit(text) => {
                state.editor.commit(text);
                state.editor.is_attached()
            }
            Ime::Disabled => {
                log::debug!("IME disabled");
                state.ime_enabled = false;
                state.editor.set_preedit("", None);
                false
            }
        }
    }

    fn handle_key(&mut self, key: &winit::keyboard::Key, text: Option<&str>) -> bool {
        let (modifiers, ime_enabled) = {
            let state = lock(&self.state);
            if !state.editor.is_attached() || state.editor.is_composing() {
                return false;
            }
            (state.modifiers, state.ime_enabled)
        };
        if let Some(shortcut) = clipboard_shortcut(key, modifiers) {
            return self.handle_clipboard(shortcut);
        }
        if let Some(command) = edit_command(key, modifiers) {
            lock(&self.state).editor.apply(command);
            return true;
        }
        match text {
            Some(text) if !ime_enabled && inserts_text(text, modifiers) => {
                lock(&self.state).editor.insert(text);
                true
            }
            _ => false,
        }
    }

    #[cfg(all(
        feature = "clipboard",
        not(target_arch = "wasm32"),
        not(target_os = "android")
    ))]
    fn handle_clipboard(&mut self, shortcut: ClipboardShortcut) -> bool {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return false;
        };
        let mut state = lock(&self.state);
        match shortcut {
            ClipboardShortcut::Copy | ClipboardShortcut::Cut => {
                let selected = state.editor.selected_text().to_owned();
                if selected.is_empty() {
                    return true;
                }
                if let Err(err) = clipboard.set_text(selected) {
                    log::warn!("clipboard write failed: {err}");
                    return true;
                }
                if shortcut == ClipboardShortcut::Cut {
                    state.editor.insert("");
                }
            }
            ClipboardShortcut::Paste => match clipboard.get_text() {
                Ok(text) => state.editor.insert(&text),
                Err(err) => log::debug!("nothing to paste: {err}"),
            },
        }
        true
    }

    #[cfg(not(all(
        feature = "clipboard",
        not(target_arch = "wasm32"),
        not(target_os = "android")
    )))]
    fn handle_clipboard(&mut self, _shortcut: ClipboardShortcut) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;
