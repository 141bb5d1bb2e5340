use crate::dom::Listener;
use anyhow::anyhow;
use serpent_core::constants::{ANALYSER_SMOOTHING, FFT_SIZE, TRACK_VOLUME};
use serpent_core::{PlaybackEvent, PlaybackState};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Context + analyser, built on the first user gesture (browsers refuse to
/// start an `AudioContext` before one).
struct AnalyserGraph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
}

fn build_graph(element: &web::HtmlAudioElement) -> anyhow::Result<AnalyserGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow!("AudioContext: {:?}", e))?;
    let analyser = web::AnalyserNode::new(&ctx).map_err(|e| anyhow!("AnalyserNode: {:?}", e))?;
    analyser.set_fft_size(FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
    let source = ctx
        .create_media_element_source(element)
        .map_err(|e| anyhow!("MediaElementSource: {:?}", e))?;
    // source -> analyser -> speakers
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| anyhow!("connect source: {:?}", e))?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow!("connect analyser: {:?}", e))?;
    log::info!(
        "[audio] graph ready: fft={} bins={}",
        analyser.fft_size(),
        analyser.frequency_bin_count()
    );
    Ok(AnalyserGraph {
        ctx,
        analyser,
        _source: source,
    })
}

/// Looping background track with a lazily attached analyser.
pub struct AudioTrack {
    element: web::HtmlAudioElement,
    graph: RefCell<Option<AnalyserGraph>>,
    state: Rc<Cell<PlaybackState>>,
    listeners: RefCell<Vec<Listener>>,
    shut_down: Cell<bool>,
}

impl AudioTrack {
    pub fn new(src: &str) -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new_with_src(src).map_err(|e| anyhow!("Audio({src}): {:?}", e))?;
        Self::from_element(element)
    }

    pub fn from_element(element: web::HtmlAudioElement) -> anyhow::Result<Self> {
        element.set_loop(true);
        element.set_volume(TRACK_VOLUME);

        let state = Rc::new(Cell::new(PlaybackState::default()));
        let mut listeners = Vec::with_capacity(3);
        for (kind, event) in [
            ("play", PlaybackEvent::Play),
            ("pause", PlaybackEvent::Pause),
            ("ended", PlaybackEvent::Ended),
        ] {
            let state = state.clone();
            listeners.push(Listener::new(&element, kind, move |_| {
                let mut s = state.get();
                s.apply(event);
                state.set(s);
                log::info!("[audio] {kind}");
            })?);
        }

        Ok(Self {
            element,
            graph: RefCell::new(None),
            state,
            listeners: RefCell::new(listeners),
            shut_down: Cell::new(false),
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.get()
    }

    /// Start or pause. `playing` is only updated by the element's own
    /// notifications, so a rejected `play()` leaves it false.
    ///
    /// Holds the track weakly across every await: once the track is shut
    /// down or dropped the toggle stops at its next step.
    pub async fn toggle(track: Weak<AudioTrack>) -> anyhow::Result<()> {
        let (resume, was_playing) = {
            let Some(t) = live(&track) else {
                return Ok(());
            };
            let mut s = t.state.get();
            s.mark_interacted();
            t.state.set(s);
            (t.resume_if_suspended()?, s.is_playing())
        };
        if let Some(resume) = resume {
            let resumed = JsFuture::from(resume).await;
            if live(&track).is_none() {
                return Ok(());
            }
            resumed.map_err(|e| anyhow!("resume rejected: {:?}", e))?;
        }

        let play = {
            let Some(t) = live(&track) else {
                return Ok(());
            };
            if was_playing {
                t.element.pause().map_err(|e| anyhow!("pause: {:?}", e))?;
                return Ok(());
            }
            t.element.play().map_err(|e| anyhow!("play: {:?}", e))?
        };
        let played = JsFuture::from(play).await;
        if live(&track).is_none() {
            return Ok(());
        }
        played.map_err(|e| anyhow!("play rejected: {:?}", e))?;
        Ok(())
    }

    fn resume_if_suspended(&self) -> anyhow::Result<Option<js_sys::Promise>> {
        let mut graph = self.graph.borrow_mut();
        if graph.is_none() {
            *graph = Some(build_graph(&self.element)?);
        }
        match graph.as_ref() {
            Some(g) if g.ctx.state() == web::AudioContextState::Suspended => g
                .ctx
                .resume()
                .map(Some)
                .map_err(|e| anyhow!("resume: {:?}", e)),
            _ => Ok(None),
        }
    }

    /// Fill `out` with the current byte spectrum. Returns `false` before the
    /// analyser exists.
    pub fn snapshot(&self, out: &mut Vec<u8>) -> bool {
        let graph = self.graph.borrow();
        let Some(g) = graph.as_ref() else {
            return false;
        };
        let bins = g.analyser.frequency_bin_count() as usize;
        if out.len() != bins {
            out.resize(bins, 0);
        }
        g.analyser.get_byte_frequency_data(out);
        true
    }

    /// Stop playback, detach the state listeners and close the context.
    /// Idempotent; later toggles do nothing.
    pub fn shutdown(&self) {
        if self.shut_down.replace(true) {
            return;
        }
        self.listeners.borrow_mut().clear();
        _ = self.element.pause();
        self.element.set_src("");
        if let Some(g) = self.graph.borrow_mut().take() {
            _ = g.ctx.close();
        }
        log::info!("[audio] shut down");
    }
}

fn live(track: &Weak<AudioTrack>) -> Option<Rc<AudioTrack>> {
    track.upgrade().filter(|t| !t.is_shut_down())
}

impl Drop for AudioTrack {
    fn drop(&mut self) {
        self.shutdown();
    }
}
