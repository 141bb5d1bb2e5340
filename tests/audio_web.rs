// Browser tests for the background track teardown.
#![cfg(target_arch = "wasm32")]

use serpent_web::audio::AudioTrack;
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fire(el: &web_sys::HtmlAudioElement, kind: &str) {
    let ev = web_sys::Event::new(kind).unwrap();
    el.dispatch_event(&ev).unwrap();
}

#[wasm_bindgen_test]
fn shutdown_detaches_state_listeners() {
    let el = web_sys::HtmlAudioElement::new().unwrap();
    let track = AudioTrack::from_element(el.clone()).unwrap();
    fire(&el, "play");
    assert!(track.state().is_playing());
    fire(&el, "pause");
    assert!(!track.state().is_playing());

    track.shutdown();
    assert!(track.is_shut_down());
    fire(&el, "play");
    assert!(!track.state().is_playing());
}

#[wasm_bindgen_test]
fn shutdown_is_idempotent() {
    let track = AudioTrack::new("/music.mp3").unwrap();
    track.shutdown();
    track.shutdown();
    assert!(track.is_shut_down());
}

#[wasm_bindgen_test(async)]
async fn toggle_after_shutdown_does_nothing() {
    let track = Rc::new(AudioTrack::new("/music.mp3").unwrap());
    track.shutdown();
    AudioTrack::toggle(Rc::downgrade(&track)).await.unwrap();
    assert!(!track.state().has_interacted());
    let mut bins = Vec::new();
    assert!(!track.snapshot(&mut bins));
}

#[wasm_bindgen_test(async)]
async fn toggle_on_dropped_track_returns() {
    let track = Rc::new(AudioTrack::new("/music.mp3").unwrap());
    let weak = Rc::downgrade(&track);
    drop(track);
    AudioTrack::toggle(weak).await.unwrap();
}

#[wasm_bindgen_test]
fn no_strong_handle_outlives_the_owner() {
    let track = Rc::new(AudioTrack::new("/music.mp3").unwrap());
    let weak = Rc::downgrade(&track);
    // a pending toggle future only holds `weak`
    let _pending = AudioTrack::toggle(weak.clone());
    assert_eq!(Rc::strong_count(&track), 1);
    drop(track);
    assert!(weak.upgrade().is_none());
}
