use crate::audio::AudioTrack;
use crate::canvas::Canvas2d;
use crate::constants::*;
use crate::dom::{self, Listener};
use crate::frame::{start_loop, RafLoop};
use anyhow::anyhow;
use serpent_core::{FrameInput, SpectrumParams, VisualizerMode, WaveformVisualizer, WobbleParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct WaveformState {
    viz: WaveformVisualizer,
    surface: Canvas2d,
    spectrum: Vec<u8>,
    mode: Option<VisualizerMode>,
}

struct Mounted {
    frames: RafLoop,
    _click: Listener,
    track: Rc<AudioTrack>,
}

/// Waveform strip plus the background track it visualizes. Clicking the
/// container toggles playback.
#[wasm_bindgen]
pub struct WaveformView {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl WaveformView {
    pub fn mount(container: web::HtmlElement) -> Option<WaveformView> {
        match mount(&container) {
            Ok(m) => Some(WaveformView { mounted: Some(m) }),
            Err(e) => {
                log::warn!("[waveform] not mounted: {:?}", e);
                None
            }
        }
    }

    pub fn destroy(&mut self) {
        if let Some(m) = self.mounted.take() {
            log::info!("[waveform] unmounted after {} frames", m.frames.frames());
        }
    }

    #[wasm_bindgen(getter, js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.mounted
            .as_ref()
            .map(|m| m.track.state().is_playing())
            .unwrap_or(false)
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        // release audio even while other handles to the track remain
        self.track.shutdown();
    }
}

fn spawn_toggle(track: &Rc<AudioTrack>) {
    let track = Rc::downgrade(track);
    spawn_local(async move {
        if let Err(e) = AudioTrack::toggle(track).await {
            log::warn!("[audio] toggle failed: {:?}", e);
        }
    });
}

fn mount(container: &web::HtmlElement) -> anyhow::Result<Mounted> {
    let canvas = dom::child_canvas(container)?;
    let surface = Canvas2d::new(canvas.clone())?;
    let baseline = match dom::data_attr(container, DATA_BASELINE) {
        Some(v) => v
            .trim()
            .parse::<f64>()
            .map_err(|e| anyhow!("data-baseline={v:?}: {e}"))?,
        None => DEFAULT_BASELINE_OFFSET,
    };
    let color = dom::css_var(WAVEFORM_COLOR_VAR).unwrap_or_else(|| FALLBACK_FG.to_string());
    let viz = WaveformVisualizer::new(
        WobbleParams::default(),
        SpectrumParams::default(),
        baseline,
        color,
    )?;
    let src = dom::data_attr(container, DATA_SRC).unwrap_or_else(|| DEFAULT_TRACK_SRC.to_string());
    let track = Rc::new(AudioTrack::new(&src)?);
    log::info!("[waveform] mount: src={} baseline={}", src, baseline);

    let state = Rc::new(RefCell::new(WaveformState {
        viz,
        surface,
        spectrum: Vec::new(),
        mode: None,
    }));

    let track_click = track.clone();
    let click = Listener::new(container, "click", move |_| spawn_toggle(&track_click))?;

    let track_tick = track.clone();
    let frames = start_loop(move |ts| {
        let rect = canvas.get_bounding_client_rect();
        let playback = track_tick.state();
        let mut st = state.borrow_mut();
        let WaveformState {
            viz,
            surface,
            spectrum,
            mode,
        } = &mut *st;
        let sampled = playback.is_playing() && track_tick.snapshot(spectrum);
        let now = viz.frame(
            surface,
            FrameInput {
                timestamp_ms: ts,
                playing: playback.is_playing(),
                interacted: playback.has_interacted(),
                magnitudes: sampled.then_some(spectrum.as_slice()),
                css_width: rect.width(),
                css_height: rect.height(),
                dpr: dom::device_pixel_ratio(),
            },
        );
        if *mode != Some(now) {
            log::info!("[waveform] mode {:?} -> {:?}", mode, now);
            *mode = Some(now);
        }
    })?;

    Ok(Mounted {
        frames,
        _click: click,
        track,
    })
}
