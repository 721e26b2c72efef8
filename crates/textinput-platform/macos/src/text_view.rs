use std::cell::RefCell;

use objc2::rc::Retained;
use objc2::runtime::{AnyObject, Bool};
use objc2::{class, msg_send};
use objc2_app_kit::{NSApplication, NSTextView, NSView, NSWindow};
use objc2_foundation::{CGFloat, MainThreadMarker, NSPoint, NSRange, NSRect, NSSize, NSString};
use textinput_core::{
    ControlSettings, IdentityMapper, LogicalPoint, NativeBridge, NativeStatus, PositionMapper,
    UiDispatcher,
};

use crate::frame::{control_frame, range_to_selection, selection_to_range};

thread_local! {
    // Lives on the main thread only; created on first use.
    static TEXT_VIEW: RefCell<Option<Retained<NSTextView>>> = const { RefCell::new(None) };
}

fn with_text_view<R>(
    mtm: MainThreadMarker,
    settings: &ControlSettings,
    f: impl FnOnce(&NSTextView) -> R,
) -> R {
    TEXT_VIEW.with(|cell| {
        let mut slot = cell.borrow_mut();
        let view = slot.get_or_insert_with(|| create_text_view(mtm, settings));
        f(view)
    })
}

fn create_text_view(mtm: MainThreadMarker, settings: &ControlSettings) -> Retained<NSTextView> {
    let frame = NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(settings.frame_width, settings.frame_height),
    );
    let view: Retained<NSTextView> =
        unsafe { msg_send![mtm.alloc::<NSTextView>(), initWithFrame: frame] };
    unsafe {
        // a tiny font keeps the hidden view's own glyphs invisible
        let font: Option<Retained<AnyObject>> =
            msg_send![class!(NSFont), userFontOfSize: 0.01 as CGFloat];
        let _: () = msg_send![&*view, setFont: font.as_deref()];
        let _: () = msg_send![&*view, setRichText: Bool::NO];
        let _: () = msg_send![&*view, setUsesFontPanel: Bool::NO];
        let _: () = msg_send![&*view, setUsesFindPanel: Bool::NO];
        let _: () = msg_send![&*view, setDisplaysLinkToolTips: Bool::NO];
        let _: () = msg_send![&*view, setHorizontallyResizable: Bool::NO];
        let _: () = msg_send![&*view, setVerticallyResizable: Bool::NO];
    }
    log::debug!("created hidden NSTextView");
    view
}

fn main_window(mtm: MainThreadMarker) -> Option<(Retained<NSWindow>, Retained<NSView>)> {
    let app = NSApplication::sharedApplication(mtm);
    let window: Option<Retained<NSWindow>> = unsafe { msg_send![&*app, mainWindow] };
    let window = window?;
    let content: Option<Retained<NSView>> = unsafe { msg_send![&*window, contentView] };
    Some((window, content?))
}

fn in_superview(view: &NSTextView) -> bool {
    let superview: Option<Retained<NSView>> = unsafe { msg_send![view, superview] };
    superview.is_some()
}

/// Hidden `NSTextView` bridge.
///
/// Construct it anywhere with a dispatcher whose UI thread is the main
/// thread. Calls made on the main thread run inline.
pub struct CocoaTextViewBridge {
    dispatcher: UiDispatcher,
    settings: ControlSettings,
    mapper: Box<dyn PositionMapper>,
    attached: bool,
}

impl CocoaTextViewBridge {
    pub fn new(dispatcher: UiDispatcher) -> Self {
        Self::with_settings(dispatcher, ControlSettings::default(), IdentityMapper)
    }

    /// `mapper` converts field coordinates to points in the content view,
    /// measured from its top-left corner.
    pub fn with_settings(
        dispatcher: UiDispatcher,
        settings: ControlSettings,
        mapper: impl PositionMapper + 'static,
    ) -> Self {
        Self {
            dispatcher,
            settings,
            mapper: Box::new(mapper),
            attached: false,
        }
    }

    fn on_main<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(MainThreadMarker, &ControlSettings) -> R + Send + 'static,
    ) -> Option<R>
    where
        R: Send + 'static,
    {
        let settings = self.settings.clone();
        let result = self.dispatcher.run_blocking(move || {
            let Some(mtm) = MainThreadMarker::new() else {
                log::warn!("native {op} dispatched to a thread other than main; skipped");
                return None;
            };
            Some(f(mtm, &settings))
        });
        match result {
            Ok(value) => value,
            Err(err) => {
                log::warn!("native {op} skipped: {err}");
                None
            }
        }
    }
}

impl NativeBridge for CocoaTextViewBridge {
    fn attach(&mut self) {
        let attached = self.on_main("attach", |mtm, settings| {
            let Some((window, content)) = main_window(mtm) else {
                log::warn!("no main window to host text input");
                return false;
            };
            with_text_view(mtm, settings, |view| unsafe {
                if !in_superview(view) {
                    let _: () = msg_send![&*content, addSubview: view];
                }
                let _: Bool = msg_send![&*window, makeFirstResponder: view];
            });
            true
        });
        self.attached = attached.unwrap_or(false);
    }

    fn detach(&mut self) {
        self.on_main("detach", |mtm, settings| {
            with_text_view(mtm, settings, |view| unsafe {
                let _: () = msg_send![view, removeFromSuperview];
            });
        });
        self.attached = false;
    }

    fn set_position(&mut self, position: LogicalPoint) {
        if !self.attached {
            return;
        }
        let client = self.mapper.to_client(position);
        self.on_main("set_position", move |mtm, settings| {
            let Some((_, content)) = main_window(mtm) else {
                return;
            };
            let bounds: NSRect = unsafe { msg_send![&*content, frame] };
            let frame = control_frame(settings, bounds.size.height, client);
            let rect = NSRect::new(
                NSPoint::new(frame.x, frame.y),
                NSSize::new(frame.width, frame.height),
            );
            with_text_view(mtm, settings, |view| unsafe {
                let _: () = msg_send![view, setFrame: rect];
            });
        });
    }

    fn status(&mut self) -> NativeStatus {
        if !self.attached {
            return NativeStatus::empty();
        }
        self.on_main("status", |mtm, settings| {
            with_text_view(mtm, settings, |view| {
                let string: Retained<NSString> = unsafe { msg_send![view, string] };
                let range: NSRange = unsafe { msg_send![view, selectedRange] };
                NativeStatus {
                    text: string.to_string(),
                    selection: range_to_selection(range.location, range.length),
                }
            })
        })
        .unwrap_or_default()
    }

    fn set_status(&mut self, status: &NativeStatus) {
        if !self.attached {
            return;
        }
        let text = status.text.clone();
        let (location, length) = selection_to_range(status.selection);
        self.on_main("set_status", move |mtm, settings| {
            with_text_view(mtm, settings, |view| unsafe {
                let string = NSString::from_str(&text);
                let _: () = msg_send![view, setString: &*string];
                let _: () = msg_send![view, setSelectedRange: NSRange::new(location, length)];
            });
        });
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
