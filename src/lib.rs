#![cfg(target_arch = "wasm32")]
use crate::constants::{FIELD_CONTAINER_ID, WAVEFORM_CONTAINER_ID};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod audio;
mod canvas;
mod constants;
mod dom;
mod events;
mod field_view;
mod frame;
mod waveform_view;

pub use field_view::FieldView;
pub use waveform_view::WaveformView;

// Views mounted by `start`; kept alive until `unmount_all`.
thread_local! {
    static AUTO_FIELD: RefCell<Option<FieldView>> = const { RefCell::new(None) };
    static AUTO_WAVEFORM: RefCell<Option<WaveformView>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("serpent-web starting");

    if let Err(e) = init() {
        log::warn!("init: {:?}", e);
    }
    Ok(())
}

// Missing containers are fine: a page may carry either view, both or none.
fn init() -> anyhow::Result<()> {
    dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    if let Ok(container) = dom::element_by_id(FIELD_CONTAINER_ID) {
        let view = FieldView::mount(container);
        AUTO_FIELD.with(|slot| *slot.borrow_mut() = view);
    } else {
        log::info!("[field] no #{} on this page", FIELD_CONTAINER_ID);
    }
    if let Ok(container) = dom::element_by_id(WAVEFORM_CONTAINER_ID) {
        let view = WaveformView::mount(container);
        AUTO_WAVEFORM.with(|slot| *slot.borrow_mut() = view);
    } else {
        log::info!("[waveform] no #{} on this page", WAVEFORM_CONTAINER_ID);
    }
    Ok(())
}

/// Tear down the views mounted at start-up.
#[wasm_bindgen(js_name = unmountAll)]
pub fn unmount_all() {
    AUTO_FIELD.with(|slot| {
        if let Some(mut v) = slot.borrow_mut().take() {
            v.destroy();
        }
    });
    AUTO_WAVEFORM.with(|slot| {
        if let Some(mut v) = slot.borrow_mut().take() {
            v.destroy();
        }
    });
}
