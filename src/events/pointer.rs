use crate::dom::{self, Listener};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Receiver of pointer positions in backing-store pixels.
pub trait PointerSink {
    fn pointer_moved(&mut self, p: DVec2);
    fn pointer_left(&mut self);
}

/// Client coordinates to canvas device pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    let dpr = dom::device_pixel_ratio();
    DVec2::new(
        (ev.client_x() as f64 - rect.left()) * dpr,
        (ev.client_y() as f64 - rect.top()) * dpr,
    )
}

/// Track the pointer over `canvas`, forwarding to `sink`. Listeners detach
/// when the returned values are dropped.
pub fn wire_pointer<S: PointerSink + 'static>(
    canvas: &web::HtmlCanvasElement,
    sink: Rc<RefCell<S>>,
) -> anyhow::Result<Vec<Listener>> {
    let canvas_move = canvas.clone();
    let sink_move = sink.clone();
    let on_move = move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            let p = pointer_canvas_px(ev, &canvas_move);
            if p.is_finite() {
                sink_move.borrow_mut().pointer_moved(p);
            }
        }
    };
    let on_leave = move |_: web::Event| sink.borrow_mut().pointer_left();

    Ok(vec![
        Listener::new(canvas, "pointermove", on_move)?,
        Listener::new(canvas, "pointerleave", on_leave)?,
    ])
}
