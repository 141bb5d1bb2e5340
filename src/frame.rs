use anyhow::anyhow;
use serpent_core::{FrameLoop, Schedule};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` as a [`Schedule`].
struct RafSchedule {
    window: web::Window,
    callback: FrameCallback,
}

impl Schedule for RafSchedule {
    type Handle = i32;

    fn request(&mut self) -> Option<i32> {
        let callback = self.callback.borrow();
        let f = callback.as_ref()?;
        match self.window.request_animation_frame(f.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

struct LoopState {
    frame_loop: FrameLoop<i32>,
    sched: RafSchedule,
}

/// Running frame loop. Stops and releases its callback when dropped.
pub struct RafLoop {
    state: Rc<RefCell<LoopState>>,
    callback: FrameCallback,
}

/// Run `tick(timestamp_ms)` once per display refresh until the returned
/// handle is dropped.
pub fn start_loop(mut tick: impl FnMut(f64) + 'static) -> anyhow::Result<RafLoop> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let state = Rc::new(RefCell::new(LoopState {
        frame_loop: FrameLoop::new(),
        sched: RafSchedule {
            window,
            callback: callback.clone(),
        },
    }));

    let state_tick = state.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let mut st = state_tick.borrow_mut();
        let LoopState { frame_loop, sched } = &mut *st;
        if let Some(h) = frame_loop.pending() {
            frame_loop.fire(sched, h, || tick(ts));
        }
    }) as Box<dyn FnMut(f64)>));

    let started = {
        let mut st = state.borrow_mut();
        let LoopState { frame_loop, sched } = &mut *st;
        frame_loop.start(sched);
        frame_loop.is_running()
    };
    if !started {
        callback.borrow_mut().take();
        return Err(anyhow!("could not schedule the first frame"));
    }
    Ok(RafLoop { state, callback })
}

impl RafLoop {
    pub fn frames(&self) -> u64 {
        self.state.borrow().frame_loop.frames()
    }

    pub fn stop(&self) {
        let mut st = self.state.borrow_mut();
        let LoopState { frame_loop, sched } = &mut *st;
        frame_loop.stop(sched);
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // breaks the closure <-> state cycle
        self.callback.borrow_mut().take();
    }
}
