use crate::canvas::Canvas2d;
use crate::constants::*;
use crate::dom::{self, Listener, ResizeWatch};
use crate::events::{wire_pointer, PointerSink};
use crate::frame::{start_loop, RafLoop};
use anyhow::anyhow;
use glam::DVec2;
use serpent_core::{
    square_fit, DispersionParams, FieldParams, FieldVariant, Palette, SerpentField, Surface,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

struct FieldState {
    field: SerpentField,
    surface: Canvas2d,
}

impl PointerSink for FieldState {
    fn pointer_moved(&mut self, p: DVec2) {
        self.field.pointer_moved(p);
    }

    fn pointer_left(&mut self) {
        self.field.pointer_left();
    }
}

// Field order is drop order: stop frames before detaching anything else.
struct Mounted {
    frames: RafLoop,
    _resize: ResizeWatch,
    _pointer: Vec<Listener>,
    state: Rc<RefCell<FieldState>>,
}

/// Dot field mounted on a container holding a `<canvas>`.
#[wasm_bindgen]
pub struct FieldView {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl FieldView {
    /// Mount on `container`. Returns `undefined` (and logs why) when the
    /// container has no usable canvas.
    pub fn mount(container: web::HtmlElement) -> Option<FieldView> {
        match mount(&container) {
            Ok(m) => Some(FieldView { mounted: Some(m) }),
            Err(e) => {
                log::warn!("[field] not mounted: {:?}", e);
                None
            }
        }
    }

    /// Stop the frame loop and detach every listener. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(m) = self.mounted.take() {
            log::info!("[field] unmounted after {} frames", m.frames.frames());
        }
    }

    #[wasm_bindgen(getter, js_name = activeParticles)]
    pub fn active_particles(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|m| m.state.borrow().field.active().len())
            .unwrap_or(0)
    }
}

fn read_config(
    container: &web::HtmlElement,
) -> anyhow::Result<(FieldParams, Option<DispersionParams>)> {
    let mut params = FieldParams::default();
    if let Some(v) = dom::data_attr(container, DATA_VARIANT) {
        params.variant = v.parse::<FieldVariant>()?;
    }
    if let Some(n) = dom::data_attr(container, DATA_POINTS) {
        params.num_points = n
            .trim()
            .parse()
            .map_err(|e| anyhow!("data-points={n:?}: {e}"))?;
    }
    let interactive = dom::data_attr(container, DATA_INTERACTIVE)
        .map(|v| v.trim() != "false")
        .unwrap_or(true);
    Ok((params, interactive.then(DispersionParams::default)))
}

fn read_palette(container: &web::HtmlElement) -> Palette {
    let dots_var =
        dom::data_attr(container, DATA_DOTS_VAR).unwrap_or_else(|| DOTS_COLOR_VAR.to_string());
    Palette {
        background: dom::css_var(BG_COLOR_VAR).unwrap_or_else(|| FALLBACK_BG.to_string()),
        foreground: dom::css_var(&dots_var).unwrap_or_else(|| FALLBACK_FG.to_string()),
    }
}

fn mount(container: &web::HtmlElement) -> anyhow::Result<Mounted> {
    let canvas = dom::child_canvas(container)?;
    let surface = Canvas2d::new(canvas.clone())?;
    let (params, dispersion) = read_config(container)?;
    let interactive = dispersion.is_some();
    let field = SerpentField::new(params, dispersion, read_palette(container))?;
    log::info!(
        "[field] mount: points={} variant={:?} interactive={}",
        field.params().num_points,
        field.params().variant,
        interactive
    );
    let state = Rc::new(RefCell::new(FieldState { field, surface }));

    let resize = {
        let container_rs = container.clone();
        let canvas_rs = canvas.clone();
        let state_rs = state.clone();
        ResizeWatch::new(container, move || {
            let rect = container_rs.get_bounding_client_rect();
            let size = square_fit(rect.width(), rect.height(), dom::device_pixel_ratio());
            dom::set_css_size(&canvas_rs, size.css_width, size.css_height);
            state_rs
                .borrow_mut()
                .surface
                .set_size(size.width_px, size.height_px);
            log::debug!(
                "[field] resize: {}px css -> {}x{} backing",
                size.css_width,
                size.width_px,
                size.height_px
            );
        })?
    };

    let pointer = if interactive {
        wire_pointer(&canvas, state.clone())?
    } else {
        Vec::new()
    };

    let state_tick = state.clone();
    let frames = start_loop(move |_ts| {
        let mut st = state_tick.borrow_mut();
        let FieldState { field, surface } = &mut *st;
        field.tick(surface);
    })?;

    Ok(Mounted {
        frames,
        _resize: resize,
        _pointer: pointer,
        state,
    })
}
