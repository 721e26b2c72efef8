use std::sync::Arc;

use desktop_demo::{DemoFields, SCREEN_HEIGHT, SCREEN_WIDTH, TITLE};
use textinput::desktop::{WinitImeBridge, WinitImeEvents};
use textinput::ActivationCoordinator;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorIcon, Window, WindowId};

struct Session {
    window: Arc<Window>,
    events: WinitImeEvents,
    fields: DemoFields<WinitImeBridge>,
    cursor: LogicalPosition<f32>,
    title: String,
}

impl Session {
    fn new(window: Arc<Window>) -> Self {
        let (bridge, events) = WinitImeBridge::new(Arc::clone(&window), window.scale_factor());
        let coordinator = ActivationCoordinator::new(bridge);
        Self {
            fields: DemoFields::new(&coordinator),
            window,
            events,
            cursor: LogicalPosition::new(0.0, 0.0),
            title: TITLE.to_owned(),
        }
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = position.to_logical(self.window.scale_factor());
        let icon = match self.fields.field_at(self.cursor.x, self.cursor.y) {
            Some(_) => CursorIcon::Text,
            None => CursorIcon::Default,
        };
        self.window.set_cursor(icon);
    }

    fn frame(&mut self) {
        self.fields.frame();
        let title = self.fields.summary();
        if title != self.title {
            log::info!("{title}");
            self.window.set_title(&title);
            self.title = title;
        }
    }
}

#[derive(Default)]
struct App {
    session: Option<Session>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        match event_loop.create_window(attributes) {
            Ok(window) => self.session = Some(Session::new(Arc::new(window))),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let consumed = session.events.handle_window_event(&event);
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::CursorMoved { position, .. } => session.cursor_moved(position),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                session.fields.click(session.cursor.x, session.cursor.y);
                session.window.request_redraw();
            }
            WindowEvent::RedrawRequested => session.frame(),
            _ if consumed => session.window.request_redraw(),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== {TITLE} ===");
    println!("Click a field and type. IME composition is shown inline.");
    println!();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}
