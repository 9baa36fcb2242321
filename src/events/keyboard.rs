use crate::core::modal::{command_for_key, ModalCommand};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Route keyboard shortcuts that apply to an open modal.
#[inline]
pub fn on_modal_command(
    document: &web::Document,
    handler: impl Fn(ModalCommand) + 'static,
) -> EventListener {
    EventListener::new(document, "keydown", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() {
            return;
        }
        if let Some(cmd) = command_for_key(&ev.key()) {
            log::debug!("[keyboard] {} -> {:?}", ev.key(), cmd);
            handler(cmd);
        }
    })
}
