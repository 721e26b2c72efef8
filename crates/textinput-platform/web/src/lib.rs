//! Web bridge: a hidden `<textarea>` receives keyboard and IME input.
//!
//! The element is 1px, transparent and ignores pointer events, so the
//! application keeps drawing the visible field on its canvas. wasm32 runs a
//! single thread, so every call touches the DOM inline.

use textinput_core::{
    ControlSettings, IdentityMapper, LogicalPoint, NativeBridge, NativeRange, NativeStatus,
    PositionMapper,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, FocusEvent, HtmlElement, HtmlTextAreaElement, KeyboardEvent, Node};

pub struct WebTextareaBridge {
    control: Option<Textarea>,
    mapper: Box<dyn PositionMapper>,
}

struct Textarea {
    document: Document,
    element: HtmlTextAreaElement,
}

impl WebTextareaBridge {
    pub fn new() -> Self {
        Self::with_settings(ControlSettings::default(), IdentityMapper)
    }

    /// Creates the bridge; `mapper` converts field coordinates to CSS pixels
    /// relative to the page.
    pub fn with_settings(settings: ControlSettings, mapper: impl PositionMapper + 'static) -> Self {
        let control = match Textarea::create(&settings) {
            Ok(control) => Some(control),
            Err(err) => {
                log::warn!("native text input unavailable: {err:?}");
                None
            }
        };
        Self {
            control,
            mapper: Box::new(mapper),
        }
    }

    fn attached_control(&self) -> Option<&Textarea> {
        self.control.as_ref().filter(|control| control.in_body())
    }
}

impl Default for WebTextareaBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Textarea {
    fn create(settings: &ControlSettings) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window exists")?;
        let document = window.document().ok_or("should have a document on window")?;
        let element = document
            .create_element("textarea")?
            .dyn_into::<HtmlTextAreaElement>()?;

        element.set_attribute("autocapitalize", "off")?;
        element.set_attribute("spellcheck", "false")?;
        element.set_attribute("translate", "no")?;
        element.set_attribute("wrap", "off")?;
        element.set_attribute("tabindex", "-1")?;

        let style = element.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", "0")?;
        style.set_property("top", "0")?;
        style.set_property("opacity", "0")?;
        style.set_property("resize", "none")?;
        style.set_property("cursor", "default")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("overflow", "hidden")?;
        style.set_property("width", "1px")?;
        style.set_property("height", "1px")?;

        // A click on the canvas blurs the textarea; take focus back while attached.
        {
            let document = document.clone();
            let closure = Closure::wrap(Box::new(move |event: FocusEvent| {
                let Some(target) = event.target() else {
                    return;
                };
                let Ok(target) = target.dyn_into::<HtmlElement>() else {
                    return;
                };
                let node: &Node = target.as_ref();
                let in_body = document
                    .body()
                    .map(|body| body.contains(Some(node)))
                    .unwrap_or(false);
                if in_body {
                    if let Err(err) = target.focus() {
                        log::warn!("failed to refocus text input: {err:?}");
                    }
                }
            }) as Box<dyn FnMut(_)>);
            element.add_event_listener_with_callback("focusout", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if settings.trap_tab {
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if event.code() == "Tab" {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
            element.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(Self { document, element })
    }

    fn in_body(&self) -> bool {
        let node: &Node = self.element.as_ref();
        self.document
            .body()
            .map(|body| body.contains(Some(node)))
            .unwrap_or(false)
    }

    fn attach(&self) -> Result<(), JsValue> {
        if self.in_body() {
            return Ok(());
        }
        let body = self.document.body().ok_or("document has no body")?;
        body.append_child(&self.element)?;
        self.element.focus()
    }

    fn detach(&self) -> Result<(), JsValue> {
        if !self.in_body() {
            return Ok(());
        }
        self.element.set_value("");
        let body = self.document.body().ok_or("document has no body")?;
        body.remove_child(&self.element)?;
        Ok(())
    }

    fn set_position(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let style = self.element.style();
        style.set_property("left", &css_px(x))?;
        style.set_property("top", &css_px(y))?;
        Ok(())
    }

    fn status(&self) -> Result<NativeStatus, JsValue> {
        let text = self.element.value();
        let start = self.element.selection_start()?.unwrap_or(0);
        let end = self.element.selection_end()?.unwrap_or(start);
        let direction = self.element.selection_direction()?;
        Ok(NativeStatus {
            text,
            selection: from_dom_selection(start, end, direction.as_deref()),
        })
    }

    fn set_status(&self, status: &NativeStatus) -> Result<(), JsValue> {
        self.element.set_value(&status.text);
        let (start, end, direction) = to_dom_selection(status.selection);
        self.element
            .set_selection_range_with_direction(start, end, direction)
    }
}

impl NativeBridge for WebTextareaBridge {
    fn attach(&mut self) {
        if let Some(control) = &self.control {
            if let Err(err) = control.attach() {
                log::warn!("failed to attach text input: {err:?}");
            }
        }
    }

    fn detach(&mut self) {
        if let Some(control) = &self.control {
            if let Err(err) = control.detach() {
                log::warn!("failed to detach text input: {err:?}");
            }
        }
    }

    fn set_position(&mut self, position: LogicalPoint) {
        let client = self.mapper.to_client(position);
        if let Some(control) = self.attached_control() {
            if let Err(err) = control.set_position(client.x, client.y) {
                log::warn!("failed to move text input: {err:?}");
            }
        }
    }

    fn status(&mut self) -> NativeStatus {
        let Some(control) = self.attached_control() else {
            return NativeStatus::empty();
        };
        control.status().unwrap_or_else(|err| {
            log::warn!("failed to read text input: {err:?}");
            NativeStatus::empty()
        })
    }

    fn set_status(&mut self, status: &NativeStatus) {
        if let Some(control) = self.attached_control() {
            if let Err(err) = control.set_status(status) {
                log::warn!("failed to write text input: {err:?}");
            }
        }
    }

    fn is_attached(&self) -> bool {
        self.attached_control().is_some()
    }
}

fn css_px(value: f64) -> String {
    format!("{value:.2}px")
}

fn from_dom_selection(start: u32, end: u32, direction: Option<&str>) -> NativeRange {
    let (start, end) = (start as usize, end as usize);
    if direction == Some("backward") {
        NativeRange::new(end, start)
    } else {
        NativeRange::new(start, end)
    }
}

fn to_dom_selection(selection: NativeRange) -> (u32, u32, &'static str) {
    let direction = if selection.start > selection.end {
        "backward"
    } else {
        "forward"
    };
    (selection.min() as u32, selection.max() as u32, direction)
}
