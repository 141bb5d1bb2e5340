use anyhow::anyhow;
use serpent_core::effective_dpr;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    effective_dpr(web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0))
}

/// Resolve a custom property on `:root`, trimmed. Empty values count as unset.
pub fn css_var(name: &str) -> Option<String> {
    let window = web::window()?;
    let root = window.document()?.document_element()?;
    let style = window.get_computed_style(&root).ok()??;
    let value = style.get_property_value(name).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[inline]
pub fn data_attr(el: &web::HtmlElement, key: &str) -> Option<String> {
    el.dataset().get(key)
}

pub fn element_by_id(id: &str) -> anyhow::Result<web::HtmlElement> {
    window_document()
        .ok_or_else(|| anyhow!("no document"))?
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("#{id} is not an HTML element: {:?}", e))
}

/// First `<canvas>` inside `container`.
pub fn child_canvas(container: &web::HtmlElement) -> anyhow::Result<web::HtmlCanvasElement> {
    container
        .query_selector("canvas")
        .map_err(|e| anyhow!("query_selector: {:?}", e))?
        .ok_or_else(|| anyhow!("container has no <canvas>"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{:?}", e))
}

pub fn set_css_size(el: &web::HtmlElement, width: f64, height: f64) {
    let style = el.style();
    _ = style.set_property("width", &format!("{width}px"));
    _ = style.set_property("height", &format!("{height}px"));
}

/// Event listener that detaches itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("add {kind} listener: {:?}", e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// `ResizeObserver` on one element, disconnected on drop.
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    _closure: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
    /// Calls `on_resize` once immediately and again on every size change.
    pub fn new(el: &web::Element, mut on_resize: impl FnMut() + 'static) -> anyhow::Result<Self> {
        on_resize();
        let closure = Closure::wrap(
            Box::new(move |_entries: js_sys::Array| on_resize()) as Box<dyn FnMut(js_sys::Array)>
        );
        let observer = web::ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("ResizeObserver: {:?}", e))?;
        observer.observe(el);
        Ok(Self {
            observer,
            _closure: closure,
        })
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
