//! Browser entry point: the same three fields over a hidden `<textarea>`.
//!
//! Fields are not drawn; the focused field's state is mirrored into an
//! element so the sync can be watched while typing.

use std::cell::RefCell;
use std::rc::Rc;

use textinput::web::WebTextareaBridge;
use textinput::ActivationCoordinator;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::DemoFields;

/// Starts the demo, writing the focused field's state into the element with
/// id `status_id`.
#[wasm_bindgen]
pub fn start_web_demo(status_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or("no global window exists")?;
    let document = window.document().ok_or("should have a document on window")?;
    let status = document
        .get_element_by_id(status_id)
        .ok_or_else(|| format!("status element with id '{status_id}' not found"))?
        .dyn_into::<HtmlElement>()?;

    let coordinator = ActivationCoordinator::new(WebTextareaBridge::new());
    let fields = Rc::new(RefCell::new(DemoFields::new(&coordinator)));

    {
        let fields = fields.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            fields
                .borrow_mut()
                .click(event.client_x() as f32, event.client_y() as f32);
        }) as Box<dyn FnMut(_)>);
        document.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let frame_loop: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let frame_loop_clone = frame_loop.clone();
    let mut shown = String::new();

    *frame_loop.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let summary = {
            let mut fields = fields.borrow_mut();
            fields.frame();
            fields.summary()
        };
        if summary != shown {
            status.set_inner_text(&summary);
            shown = summary;
        }

        if let Some(callback) = frame_loop_clone.borrow().as_ref() {
            request_animation_frame(callback);
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = frame_loop.borrow().as_ref() {
        request_animation_frame(callback);
    }
    Ok(())
}

fn request_animation_frame(f: &Closure<dyn FnMut()>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.request_animation_frame(f.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {err:?}");
    }
}
