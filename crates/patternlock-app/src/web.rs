//! WebAssembly entry point and browser glue.
//!
//! On start the module scans the page for `<unlockpattern>` placeholders and
//! mounts one independent widget per element. Each widget lives in an
//! `Rc<RefCell<_>>` shared only by its own event listeners.

use crate::canvas2d::CanvasSurface;
use crate::coords::client_to_canvas;
use crate::widget::PatternWidget;
use kurbo::{Point, Rect, Size};
use patternlock_core::{GridConfig, PatternCode, PointerEvent};
use patternlock_render::SurfaceError;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, Window};

/// Tag name of the placeholder elements scanned at startup.
pub const PLACEHOLDER_TAG: &str = "unlockpattern";
/// Placeholder attribute naming the global completion callback.
pub const SUBMIT_ATTRIBUTE: &str = "submit";
/// Callback name used when the placeholder has no `submit` attribute.
pub const DEFAULT_SUBMIT: &str = "submit";

/// Errors while mounting a widget into the page.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("No global window")]
    NoWindow,
    #[error("No document")]
    NoDocument,
    #[error("Placeholder is not attached to the document")]
    Detached,
    #[error("Drawing surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Dom(format!("{:?}", value))
    }
}

impl From<MountError> for JsValue {
    fn from(error: MountError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

type MountResult<T> = Result<T, MountError>;

type SharedWidget = Rc<RefCell<PatternWidget<CanvasSurface>>>;

/// Initialize logging and mount every placeholder once the page has loaded.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Starting pattern lock (WASM)");

    let Some(window) = web_sys::window() else {
        log::error!("{}", MountError::NoWindow);
        return;
    };
    let Some(document) = window.document() else {
        log::error!("{}", MountError::NoDocument);
        return;
    };

    if document.ready_state() == "complete" {
        mount_all();
        return;
    }

    let onload = Closure::once(Box::new(move |_event: web_sys::Event| {
        mount_all();
    }) as Box<dyn FnOnce(_)>);
    if let Err(e) = window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref()) {
        log::error!("Failed to listen for page load: {:?}", e);
    }
    onload.forget(); // Prevent closure from being dropped
}

/// Mount a widget on every placeholder in the document.
///
/// Returns the number of widgets mounted. A placeholder that fails to mount
/// is logged and skipped.
#[wasm_bindgen]
pub fn mount_all() -> usize {
    let Some(window) = web_sys::window() else {
        log::error!("{}", MountError::NoWindow);
        return 0;
    };
    let Some(document) = window.document() else {
        log::error!("{}", MountError::NoDocument);
        return 0;
    };

    // Snapshot the live collection before inserting canvases next to it.
    let collection = document.get_elements_by_tag_name(PLACEHOLDER_TAG);
    let placeholders: Vec<Element> = (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect();

    let mut mounted = 0;
    for placeholder in &placeholders {
        let name = placeholder
            .get_attribute(SUBMIT_ATTRIBUTE)
            .unwrap_or_else(|| DEFAULT_SUBMIT.to_string());
        let callback = resolve_callback(&window, &name);
        match mount(&window, &document, placeholder, callback) {
            Ok(_) => mounted += 1,
            Err(e) => log::error!("Failed to mount pattern widget: {}", e),
        }
    }

    if !placeholders.is_empty() {
        log::info!("Mounted {} of {} pattern widget(s)", mounted, placeholders.len());
    }
    mounted
}

/// Mount a single widget on `element` with an explicit completion callback.
///
/// The callback receives the pattern code as its only argument.
#[wasm_bindgen]
pub fn mount_pattern(element: Element, callback: js_sys::Function) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    mount(&window, &document, &element, Some(callback))?;
    Ok(())
}

/// Look up a global function by name.
fn resolve_callback(window: &Window, name: &str) -> Option<js_sys::Function> {
    let callback = js_sys::Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok());
    if callback.is_none() {
        log::warn!("No global function named {:?}; pattern codes will only be logged", name);
    }
    callback
}

fn mount(
    window: &Window,
    document: &Document,
    placeholder: &Element,
    callback: Option<js_sys::Function>,
) -> MountResult<SharedWidget> {
    let parent = placeholder.parent_node().ok_or(MountError::Detached)?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::Dom("created element is not a canvas".to_string()))?;
    if let Some(style) = placeholder.get_attribute("style") {
        canvas.set_attribute("style", &style)?;
    }

    let config = GridConfig::from_attributes(|name| placeholder.get_attribute(name));
    let surface = CanvasSurface::new(canvas.clone())?;
    let on_complete = move |code: &PatternCode| {
        let code = code.to_string();
        match &callback {
            Some(function) => {
                if let Err(e) = function.call1(&JsValue::NULL, &JsValue::from_str(&code)) {
                    log::error!("Pattern callback failed: {:?}", e);
                }
            }
            None => log::info!("Pattern entered: {}", code),
        }
    };

    let widget = Rc::new(RefCell::new(PatternWidget::new(
        config,
        viewport_size(window),
        surface,
        on_complete,
    )));
    attach_listeners(window, &canvas, &widget)?;

    // The page only changes once the widget is fully wired.
    let placeholder_node: &web_sys::Node = placeholder;
    parent.insert_before(&canvas, Some(placeholder_node))?;
    if let Some(element) = placeholder.dyn_ref::<HtmlElement>() {
        element.style().set_property("display", "none")?;
    }

    Ok(widget)
}

/// Inner size of the browser window, zero if unavailable.
fn viewport_size(window: &Window) -> Size {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}

/// Convert client coordinates into canvas backing-store coordinates.
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas(
        Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom()),
        Size::new(f64::from(canvas.width()), f64::from(canvas.height())),
        Point::new(f64::from(client_x), f64::from(client_y)),
    )
}

/// Position of the first active touch, if any.
fn touch_point(canvas: &HtmlCanvasElement, event: &web_sys::TouchEvent) -> Option<Point> {
    let touch = event.target_touches().get(0)?;
    Some(canvas_point(canvas, touch.client_x(), touch.client_y()))
}

fn mouse_point(canvas: &HtmlCanvasElement, event: &web_sys::Event) -> Option<Point> {
    let mouse = event.dyn_ref::<web_sys::MouseEvent>()?;
    Some(canvas_point(canvas, mouse.client_x(), mouse.client_y()))
}

/// Forward an event to the widget unless it is already being updated.
fn dispatch(widget: &SharedWidget, event: PointerEvent) {
    match widget.try_borrow_mut() {
        Ok(mut widget) => widget.handle_event(event),
        Err(_) => log::warn!("Dropping re-entrant {:?}", event),
    }
}

/// Register `handler` for `kind` on `target` for the lifetime of the page.
fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> MountResult<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Prevent closure from being dropped
    Ok(())
}

fn attach_listeners(window: &Window, canvas: &HtmlCanvasElement, widget: &SharedWidget) -> MountResult<()> {
    // Mouse
    let (w, c) = (widget.clone(), canvas.clone());
    listen(canvas, "mousedown", move |event| {
        if let Some(position) = mouse_point(&c, &event) {
            dispatch(&w, PointerEvent::Down { position });
        }
    })?;

    let (w, c) = (widget.clone(), canvas.clone());
    listen(canvas, "mousemove", move |event| {
        if let Some(position) = mouse_point(&c, &event) {
            dispatch(&w, PointerEvent::Move { position });
        }
    })?;

    // Released anywhere on the page, so a drag leaving the canvas still ends.
    let w = widget.clone();
    listen(window, "mouseup", move |_event| {
        if let Ok(widget) = w.try_borrow() {
            if !widget.tracker().state().is_active() {
                return;
            }
        }
        dispatch(&w, PointerEvent::Up);
    })?;

    // Touch: only the first active touch point is tracked
    let (w, c) = (widget.clone(), canvas.clone());
    listen(canvas, "touchstart", move |event| {
        event.prevent_default();
        let position = event
            .dyn_ref::<web_sys::TouchEvent>()
            .and_then(|touch| touch_point(&c, touch));
        if let Some(position) = position {
            dispatch(&w, PointerEvent::Down { position });
        }
    })?;

    let (w, c) = (widget.clone(), canvas.clone());
    listen(canvas, "touchmove", move |event| {
        event.prevent_default();
        let position = event
            .dyn_ref::<web_sys::TouchEvent>()
            .and_then(|touch| touch_point(&c, touch));
        if let Some(position) = position {
            dispatch(&w, PointerEvent::Move { position });
        }
    })?;

    let w = widget.clone();
    listen(canvas, "touchend", move |_event| {
        dispatch(&w, PointerEvent::Up);
    })?;

    let w = widget.clone();
    listen(canvas, "touchcancel", move |_event| {
        dispatch(&w, PointerEvent::Cancel);
    })?;

    // Viewport
    let (w, win) = (widget.clone(), window.clone());
    listen(window, "resize", move |_event| match w.try_borrow_mut() {
        Ok(mut widget) => widget.resize(viewport_size(&win)),
        Err(_) => log::warn!("Dropping re-entrant resize"),
    })?;

    Ok(())
}
