use crate::core::pointer::{MotionCapability, MotionPermission};
use gloo::events::EventListener;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Shared motion-permission state, created once per page and handed to every
/// consumer of orientation input.
#[derive(Clone)]
pub struct MotionGate(Rc<Cell<MotionPermission>>);

impl MotionGate {
    pub fn new(initial: MotionPermission) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn state(&self) -> MotionPermission {
        self.0.get()
    }

    pub fn capability(&self) -> Option<MotionCapability> {
        self.0.get().capability()
    }

    fn resolve(&self, answer: Option<&str>) {
        let mut state = self.0.get();
        state.resolve(answer);
        self.0.set(state);
    }
}

/// Pending gesture hook that asks for orientation access on the first tap.
pub struct MotionPermissionRequest {
    listeners: Rc<RefCell<Vec<EventListener>>>,
}

impl MotionPermissionRequest {
    pub fn is_waiting(&self) -> bool {
        !self.listeners.borrow().is_empty()
    }
}

/// `DeviceOrientationEvent.requestPermission`, when the platform has it.
fn permission_request_fn() -> Option<(JsValue, js_sys::Function)> {
    let ctor = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("DeviceOrientationEvent")).ok()?;
    if ctor.is_undefined() || ctor.is_null() {
        return None;
    }
    let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")).ok()?;
    let request = request.dyn_into::<js_sys::Function>().ok()?;
    Some((ctor, request))
}

/// Work out whether orientation input needs an explicit grant and, if it
/// does, arm a one-shot request on the first click or touch.
pub fn install(document: &web::Document) -> (MotionGate, Option<MotionPermissionRequest>) {
    let Some((ctor, request)) = permission_request_fn() else {
        log::debug!("[motion] orientation permission not required");
        return (MotionGate::new(MotionPermission::NotRequired), None);
    };

    let gate = MotionGate::new(MotionPermission::Pending);
    let listeners: Rc<RefCell<Vec<EventListener>>> = Rc::new(RefCell::new(Vec::new()));
    let asked = Rc::new(Cell::new(false));

    for event in ["click", "touchend"] {
        let gate = gate.clone();
        let asked = asked.clone();
        let ctor = ctor.clone();
        let request = request.clone();
        let slot = Rc::downgrade(&listeners);
        let listener = EventListener::new(document, event, move |_ev| {
            if asked.replace(true) {
                return;
            }
            // Must be called synchronously inside the gesture.
            let promise = request
                .call0(&ctor)
                .ok()
                .and_then(|v| v.dyn_into::<js_sys::Promise>().ok());
            let gate = gate.clone();
            let slot = slot.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // Both gesture hooks are spent; drop them outside their own callbacks.
                if let Some(listeners) = slot.upgrade() {
                    listeners.borrow_mut().clear();
                }
                let answer = match promise {
                    Some(p) => match JsFuture::from(p).await {
                        Ok(v) => v.as_string(),
                        Err(e) => {
                            log::debug!("[motion] permission request rejected: {:?}", e);
                            None
                        }
                    },
                    None => None,
                };
                gate.resolve(answer.as_deref());
                match gate.state() {
                    MotionPermission::Granted => log::info!("[motion] orientation access granted"),
                    other => log::debug!("[motion] orientation access: {:?}", other),
                }
            });
        });
        listeners.borrow_mut().push(listener);
    }

    (gate, Some(MotionPermissionRequest { listeners }))
}
