// Host-side tests for frame scheduling and canvas sizing.

use serpent_core::*;

#[test]
fn loop_drives_field_until_stopped() {
    let params = FieldParams {
        num_points: 5,
        ..FieldParams::default()
    };
    let mut field = SerpentField::new(params, None, Palette::default()).unwrap();
    let mut surface = Recording::new(400, 400);
    let mut sched = ManualSchedule::new();
    let mut lp = FrameLoop::new();

    lp.start(&mut sched);
    for _ in 0..10 {
        let h = sched.pop().unwrap();
        lp.fire(&mut sched, h, || {
            field.tick(&mut surface);
        });
    }
    assert_eq!(lp.frames(), 10);
    assert_eq!(surface.dots().len(), 50);

    lp.stop(&mut sched);
    assert!(sched.queued().is_empty());
    assert_eq!(sched.cancelled().len(), 1);
}

#[test]
fn stale_handle_is_ignored() {
    let mut sched = ManualSchedule::new();
    let mut lp = FrameLoop::new();
    lp.start(&mut sched);
    let first = sched.pop().unwrap();
    assert!(lp.fire(&mut sched, first, || {}));
    // the same callback delivered twice must not double-tick
    assert!(!lp.fire(&mut sched, first, || panic!("stale tick")));
    assert_eq!(lp.frames(), 1);
}

#[test]
fn start_is_idempotent() {
    let mut sched = ManualSchedule::new();
    let mut lp = FrameLoop::new();
    lp.start(&mut sched);
    lp.start(&mut sched);
    assert_eq!(sched.queued().len(), 1);
}

#[test]
fn one_tick_per_callback_regardless_of_delay() {
    let params = FieldParams {
        num_points: 1,
        ..FieldParams::default()
    };
    let step = params.time_step;
    let mut field = SerpentField::new(params, None, Palette::default()).unwrap();
    let mut surface = Recording::new(400, 400);
    let mut sched = ManualSchedule::new();
    let mut lp = FrameLoop::new();
    lp.start(&mut sched);
    // the host sat on the callback for a long time; still a single step
    let h = sched.pop().unwrap();
    lp.fire(&mut sched, h, || {
        field.tick(&mut surface);
    });
    assert_eq!(field.phase(), step);
}

#[test]
fn backing_matches_display_times_dpr_after_resizes() {
    for (w, h, dpr) in [(640.0, 480.0, 1.0), (300.0, 900.0, 2.0), (512.0, 512.0, 1.5)] {
        let s = square_fit(w, h, dpr);
        assert_eq!(s.width_px, (s.css_width * dpr) as u32);
        assert_eq!(s.height_px, s.width_px);
        let d = display_fit(w, h, dpr);
        assert_eq!(d.width_px, (w * dpr) as u32);
        assert_eq!(d.height_px, (h * dpr) as u32);
    }
}

#[test]
fn resize_changes_field_scale() {
    let params = FieldParams {
        num_points: 1,
        ..FieldParams::default()
    };
    let mut field = SerpentField::new(params, None, Palette::default()).unwrap();
    let mut surface = Recording::new(400, 400);
    let size = square_fit(300.0, 500.0, 2.0);
    surface.set_size(size.width_px, size.height_px);
    field.tick(&mut surface);
    assert_eq!(surface.dots()[0], sample(0, 0.0, 600.0 / 400.0));
}
