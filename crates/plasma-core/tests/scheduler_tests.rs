// Scheduler properties driven by a simulated display clock.

use plasma_core::{
    AdaptiveScheduler, DeviceProfile, Environment, FrameRequester, RunState, Tick, Transition,
};

const REFRESH_MS: f64 = 1000.0 / 60.0;

#[derive(Default)]
struct FakeRaf {
    next: i32,
    live: Vec<i32>,
    cancelled: Vec<i32>,
}

impl FrameRequester for FakeRaf {
    fn request(&mut self) -> Option<i32> {
        self.next += 1;
        self.live.push(self.next);
        Some(self.next)
    }

    fn cancel(&mut self, id: i32) {
        self.live.retain(|&x| x != id);
        self.cancelled.push(id);
    }
}

impl FakeRaf {
    /// Deliver the pending callback the way a browser would.
    fn fire(&mut self, id: i32) -> bool {
        let before = self.live.len();
        self.live.retain(|&x| x != id);
        self.live.len() != before
    }
}

fn profile(width: f64, touch: bool) -> DeviceProfile {
    DeviceProfile::from_environment(&Environment {
        viewport_width: width,
        device_pixel_ratio: 2.0,
        max_touch_points: if touch { 5 } else { 0 },
        has_touch_events: touch,
    })
}

fn run_for(
    sched: &mut AdaptiveScheduler,
    raf: &mut FakeRaf,
    start_ms: f64,
    seconds: f64,
    refresh_ms: f64,
) -> (usize, Vec<f32>) {
    let mut renders = 0;
    let mut times = Vec::new();
    let steps = (seconds * 1000.0 / refresh_ms) as usize;
    for i in 1..=steps {
        let now = start_ms + i as f64 * refresh_ms;
        let Some(id) = sched.pending() else { break };
        assert!(raf.fire(id));
        if let Tick::Render { time_sec } = sched.on_frame(now, raf) {
            renders += 1;
            times.push(time_sec);
        }
    }
    (renders, times)
}

#[test]
fn render_count_never_exceeds_target_rate() {
    for (width, touch) in [(1440.0, false), (375.0, true)] {
        for refresh in [REFRESH_MS, 1000.0 / 144.0, 1000.0 / 30.0] {
            let p = profile(width, touch);
            let mut raf = FakeRaf::default();
            let mut sched = AdaptiveScheduler::new(&p, true, 0.0);
            sched.start(0.0, &mut raf);
            let seconds = 10.0;
            let (renders, _) = run_for(&mut sched, &mut raf, 0.0, seconds, refresh);
            let bound = (seconds * p.target_fps as f64) as usize + 1;
            assert!(
                renders <= bound,
                "{renders} renders exceeds {bound} at {refresh:.2}ms refresh"
            );
            // and the loop is not starved either
            assert!(renders as f64 >= seconds * p.target_fps as f64 * 0.5);
        }
    }
}

#[test]
fn animation_time_tracks_wall_time_while_running() {
    let p = profile(1440.0, false);
    let mut raf = FakeRaf::default();
    let mut sched = AdaptiveScheduler::new(&p, true, 0.0);
    sched.start(0.0, &mut raf);
    let (_, times) = run_for(&mut sched, &mut raf, 0.0, 5.0, REFRESH_MS);
    let last = *times.last().expect("rendered");
    assert!((last - 5.0).abs() < 0.1, "time uniform {last} drifted");
    assert!(times.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn hidden_suspends_in_same_call_and_resume_has_no_time_jump() {
    let p = profile(1440.0, false);
    let mut raf = FakeRaf::default();
    let mut sched = AdaptiveScheduler::new(&p, true, 0.0);
    sched.start(0.0, &mut raf);
    let (_, times) = run_for(&mut sched, &mut raf, 0.0, 2.0, REFRESH_MS);
    let before = *times.last().expect("rendered");
    let pending = sched.pending().expect("armed while running");

    let t_hide = 2000.0 + 1.0;
    assert_eq!(
        sched.set_document_visible(false, t_hide, &mut raf),
        Transition::Suspended
    );
    assert_eq!(sched.state(), RunState::Suspended);
    assert!(raf.cancelled.contains(&pending));
    assert!(raf.live.is_empty());
    assert!(sched.pending().is_none());

    // a minute in the background
    let t_show = t_hide + 60_000.0;
    assert_eq!(
        sched.set_document_visible(true, t_show, &mut raf),
        Transition::Resumed
    );
    assert_eq!(raf.live.len(), 1);

    let (renders, times) = run_for(&mut sched, &mut raf, t_show, 1.0, REFRESH_MS);
    assert!(renders > 0);
    let jump = (times[0] - before) as f64 * 1000.0;
    assert!(
        jump <= sched.frame_interval_ms() + 0.01,
        "time uniform jumped {jump:.2}ms after resume"
    );
}

#[test]
fn both_signals_must_allow_running() {
    let p = profile(1440.0, false);
    let mut raf = FakeRaf::default();
    let mut sched = AdaptiveScheduler::new(&p, true, 0.0);
    sched.start(0.0, &mut raf);

    sched.set_anchor_intersecting(false, 10.0, &mut raf);
    sched.set_document_visible(false, 20.0, &mut raf);
    assert_eq!(sched.state(), RunState::Suspended);

    assert_eq!(
        sched.set_anchor_intersecting(true, 30.0, &mut raf),
        Transition::Unchanged
    );
    assert!(raf.live.is_empty());
    assert_eq!(
        sched.set_document_visible(true, 40.0, &mut raf),
        Transition::Resumed
    );
    assert_eq!(raf.live.len(), 1);
}

#[test]
fn repeated_visibility_events_do_not_double_request() {
    let p = profile(1440.0, false);
    let mut raf = FakeRaf::default();
    let mut sched = AdaptiveScheduler::new(&p, true, 0.0);
    sched.start(0.0, &mut raf);
    sched.start(0.0, &mut raf);
    assert_eq!(raf.live.len(), 1);
    assert_eq!(
        sched.set_document_visible(true, 5.0, &mut raf),
        Transition::Unchanged
    );
    assert_eq!(raf.live.len(), 1);
}
