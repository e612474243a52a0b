//! Frame pacing for the plasma background.
//!
//! The host drives [`AdaptiveScheduler::on_frame`] from its per-refresh
//! callback. The scheduler decides whether a tick renders or is skipped,
//! owns the id of the pending callback so suspension can cancel it, and
//! tunes resolution and frame rate from a rolling window of render costs.
//!
//! Quality control is additive: a slow window drops resolution by
//! [`RESOLUTION_STEP`] and frame rate by [`FPS_STEP_DOWN`]; a healthy window
//! raises frame rate by [`FPS_STEP_UP`] until the device target is reached.
//! Resolution is never raised again, which keeps the controller from
//! oscillating on noisy costs.

use crate::constants::*;
use crate::device::DeviceProfile;
use smallvec::SmallVec;

/// Host hook for scheduling per-refresh callbacks (`requestAnimationFrame`
/// in the browser).
pub trait FrameRequester {
    fn request(&mut self) -> Option<i32>;
    fn cancel(&mut self, id: i32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Suspended,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Suspended,
    Resumed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Not running; nothing was re-requested.
    Idle,
    /// Under the frame budget; the next callback is already requested.
    Skip,
    Render { time_sec: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adjustment {
    pub resolution_scale: f32,
    pub resolution_changed: bool,
    pub target_fps: u32,
}

pub struct AdaptiveScheduler {
    state: RunState,
    document_visible: bool,
    anchor_intersecting: bool,
    pending: Option<i32>,
    // phase-stable timestamp of the last rendered slot
    phase_base_ms: f64,
    anim_ms: f64,
    rearmed: bool,
    target_fps: u32,
    device_target_fps: u32,
    resolution_scale: f32,
    resolution_cap: f32,
    samples: SmallVec<[f64; FRAME_SAMPLE_WINDOW]>,
}

impl AdaptiveScheduler {
    pub fn new(profile: &DeviceProfile, document_visible: bool, now_ms: f64) -> Self {
        Self {
            state: if document_visible {
                RunState::Running
            } else {
                RunState::Suspended
            },
            document_visible,
            anchor_intersecting: true,
            pending: None,
            phase_base_ms: now_ms,
            anim_ms: 0.0,
            rearmed: true,
            target_fps: profile.target_fps,
            device_target_fps: profile.target_fps,
            resolution_scale: profile.initial_resolution_scale,
            resolution_cap: profile.initial_resolution_scale,
            samples: SmallVec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    #[inline]
    pub fn frame_interval_ms(&self) -> f64 {
        frame_interval_ms(self.target_fps)
    }

    #[inline]
    pub fn resolution_scale(&self) -> f32 {
        self.resolution_scale
    }

    /// Scale the controller degrades from; follows the device profile.
    #[inline]
    pub fn resolution_cap(&self) -> f32 {
        self.resolution_cap
    }

    #[inline]
    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Arm the first callback after mount.
    pub fn start(&mut self, now_ms: f64, host: &mut impl FrameRequester) {
        if self.state != RunState::Running {
            return;
        }
        self.rearm_clock(now_ms);
        if self.pending.is_none() {
            self.pending = host.request();
        }
    }

    pub fn on_frame(&mut self, now_ms: f64, host: &mut impl FrameRequester) -> Tick {
        self.pending = None;
        if self.state != RunState::Running {
            return Tick::Idle;
        }
        self.pending = host.request();

        let interval = self.frame_interval_ms();
        let elapsed = now_ms - self.phase_base_ms;
        if elapsed < interval {
            return Tick::Skip;
        }
        let next_base = now_ms - (elapsed % interval);
        let mut advance = next_base - self.phase_base_ms;
        if self.rearmed {
            advance = advance.min(interval);
            self.rearmed = false;
        }
        self.phase_base_ms = next_base;
        self.anim_ms += advance.max(0.0);
        Tick::Render {
            time_sec: (self.anim_ms / 1000.0) as f32,
        }
    }

    /// Feed the wall-clock cost of one render.
    pub fn record_frame(&mut self, cost_ms: f64) -> Option<Adjustment> {
        if self.state == RunState::Stopped || !cost_ms.is_finite() {
            return None;
        }
        self.samples.push(cost_ms.max(0.0));
        if self.samples.len() < FRAME_SAMPLE_WINDOW {
            return None;
        }
        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        self.samples.clear();

        let prev_scale = self.resolution_scale;
        let prev_fps = self.target_fps;
        if mean > SLOW_FRAME_MS {
            let stepped = ((self.resolution_scale - RESOLUTION_STEP) * 100.0).round() / 100.0;
            let next = stepped.max(RESOLUTION_FLOOR);
            if next < self.resolution_scale {
                self.resolution_scale = next;
            }
            self.target_fps = self
                .target_fps
                .saturating_sub(FPS_STEP_DOWN)
                .max(FPS_FLOOR);
        } else if self.target_fps < self.device_target_fps {
            self.target_fps = (self.target_fps + FPS_STEP_UP).min(self.device_target_fps);
        }

        let resolution_changed = self.resolution_scale != prev_scale;
        if !resolution_changed && self.target_fps == prev_fps {
            return None;
        }
        log::debug!(
            "[sched] window mean={:.1}ms scale {:.2}->{:.2} fps {}->{}",
            mean,
            prev_scale,
            self.resolution_scale,
            prev_fps,
            self.target_fps
        );
        Some(Adjustment {
            resolution_scale: self.resolution_scale,
            resolution_changed,
            target_fps: self.target_fps,
        })
    }

    pub fn set_document_visible(
        &mut self,
        visible: bool,
        now_ms: f64,
        host: &mut impl FrameRequester,
    ) -> Transition {
        self.document_visible = visible;
        self.reconcile(now_ms, host)
    }

    pub fn set_anchor_intersecting(
        &mut self,
        intersecting: bool,
        now_ms: f64,
        host: &mut impl FrameRequester,
    ) -> Transition {
        self.anchor_intersecting = intersecting;
        self.reconcile(now_ms, host)
    }

    /// Apply a re-derived device profile. Frame rate follows the new target
    /// (down immediately, up through the recovery path); resolution adopts
    /// the new cap unless the controller has already degraded it.
    pub fn retarget(&mut self, profile: &DeviceProfile) -> Option<Adjustment> {
        if self.state == RunState::Stopped {
            return None;
        }
        let prev_scale = self.resolution_scale;
        let prev_fps = self.target_fps;
        let degraded = self.resolution_scale < self.resolution_cap;
        self.resolution_cap = profile.initial_resolution_scale;
        self.resolution_scale = if degraded {
            self.resolution_scale.min(self.resolution_cap)
        } else {
            self.resolution_cap
        };
        self.device_target_fps = profile.target_fps;
        self.target_fps = self.target_fps.min(self.device_target_fps);

        let resolution_changed = self.resolution_scale != prev_scale;
        if !resolution_changed && self.target_fps == prev_fps {
            return None;
        }
        Some(Adjustment {
            resolution_scale: self.resolution_scale,
            resolution_changed,
            target_fps: self.target_fps,
        })
    }

    /// Cancel any pending callback and stop for good.
    pub fn stop(&mut self, host: &mut impl FrameRequester) {
        if let Some(id) = self.pending.take() {
            host.cancel(id);
        }
        self.samples.clear();
        self.state = RunState::Stopped;
    }

    fn reconcile(&mut self, now_ms: f64, host: &mut impl FrameRequester) -> Transition {
        let should_run = self.document_visible && self.anchor_intersecting;
        match (self.state, should_run) {
            (RunState::Running, false) => {
                if let Some(id) = self.pending.take() {
                    host.cancel(id);
                }
                self.state = RunState::Suspended;
                log::debug!("[sched] suspended");
                Transition::Suspended
            }
            (RunState::Suspended, true) => {
                self.state = RunState::Running;
                self.rearm_clock(now_ms);
                if self.pending.is_none() {
                    self.pending = host.request();
                }
                log::debug!("[sched] resumed");
                Transition::Resumed
            }
            _ => Transition::Unchanged,
        }
    }

    fn rearm_clock(&mut self, now_ms: f64) {
        self.phase_base_ms = now_ms;
        self.rearmed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceProfile, Environment};

    #[derive(Default)]
    struct Host {
        next: i32,
        live: Vec<i32>,
        cancelled: Vec<i32>,
    }

    impl FrameRequester for Host {
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

    fn desktop() -> DeviceProfile {
        DeviceProfile::from_environment(&Environment {
            viewport_width: 1440.0,
            device_pixel_ratio: 2.0,
            max_touch_points: 0,
            has_touch_events: false,
        })
    }

    fn phone() -> DeviceProfile {
        DeviceProfile::from_environment(&Environment {
            viewport_width: 375.0,
            device_pixel_ratio: 3.0,
            max_touch_points: 5,
            has_touch_events: true,
        })
    }

    #[test]
    fn hidden_at_mount_starts_suspended() {
        let mut host = Host::default();
        let mut s = AdaptiveScheduler::new(&desktop(), false, 0.0);
        s.start(0.0, &mut host);
        assert_eq!(s.state(), RunState::Suspended);
        assert!(s.pending().is_none());
        assert!(host.live.is_empty());
    }

    #[test]
    fn skips_ticks_under_budget() {
        let mut host = Host::default();
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        s.start(0.0, &mut host);
        assert_eq!(s.on_frame(16.0, &mut host), Tick::Skip);
        assert!(s.pending().is_some());
        assert!(matches!(s.on_frame(42.0, &mut host), Tick::Render { .. }));
    }

    #[test]
    fn late_tick_renders_once_and_keeps_phase() {
        let mut host = Host::default();
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        s.start(0.0, &mut host);
        let interval = s.frame_interval_ms();
        assert!(matches!(s.on_frame(interval + 5.0, &mut host), Tick::Render { .. }));
        // the phase base landed on `interval`, not on the late timestamp
        assert!(matches!(
            s.on_frame(2.0 * interval + 0.5, &mut host),
            Tick::Render { .. }
        ));
    }

    #[test]
    fn slow_window_degrades_resolution_and_fps() {
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        for _ in 0..29 {
            assert!(s.record_frame(35.0).is_none());
        }
        let adj = s.record_frame(35.0).expect("adjustment");
        assert!(adj.resolution_changed);
        assert_eq!(adj.resolution_scale, 1.0);
        assert_eq!(adj.target_fps, 21);
        assert_eq!(s.sample_count(), 0);
    }

    #[test]
    fn resolution_and_fps_have_floors() {
        let mut s = AdaptiveScheduler::new(&phone(), true, 0.0);
        for _ in 0..20 {
            for _ in 0..FRAME_SAMPLE_WINDOW {
                s.record_frame(100.0);
            }
        }
        assert_eq!(s.resolution_scale(), RESOLUTION_FLOOR);
        assert_eq!(s.target_fps(), FPS_FLOOR);
    }

    #[test]
    fn healthy_windows_recover_fps_one_step_at_a_time() {
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        for _ in 0..FRAME_SAMPLE_WINDOW {
            s.record_frame(40.0);
        }
        assert_eq!(s.target_fps(), 21);
        for expected in [22, 23, 24] {
            for _ in 0..FRAME_SAMPLE_WINDOW {
                s.record_frame(5.0);
            }
            assert_eq!(s.target_fps(), expected);
        }
        for _ in 0..FRAME_SAMPLE_WINDOW {
            assert!(s.record_frame(5.0).is_none() || s.target_fps() == 24);
        }
        assert_eq!(s.target_fps(), 24);
        // resolution does not come back
        assert_eq!(s.resolution_scale(), 1.0);
    }

    #[test]
    fn suspend_cancels_pending_and_resume_requests() {
        let mut host = Host::default();
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        s.start(0.0, &mut host);
        let id = s.pending().expect("armed");

        assert_eq!(
            s.set_anchor_intersecting(false, 10.0, &mut host),
            Transition::Suspended
        );
        assert_eq!(host.cancelled, vec![id]);
        assert!(host.live.is_empty());

        // visible again but anchor still off-screen: stays suspended
        assert_eq!(
            s.set_document_visible(true, 20.0, &mut host),
            Transition::Unchanged
        );
        assert_eq!(
            s.set_anchor_intersecting(true, 30.0, &mut host),
            Transition::Resumed
        );
        assert_eq!(host.live.len(), 1);
    }

    #[test]
    fn stray_callback_while_suspended_is_idle() {
        let mut host = Host::default();
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        s.start(0.0, &mut host);
        s.set_document_visible(false, 5.0, &mut host);
        assert_eq!(s.on_frame(50.0, &mut host), Tick::Idle);
        assert!(s.pending().is_none());
    }

    #[test]
    fn stop_is_terminal() {
        let mut host = Host::default();
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        s.start(0.0, &mut host);
        s.stop(&mut host);
        s.stop(&mut host);
        assert_eq!(host.cancelled.len(), 1);
        assert_eq!(s.state(), RunState::Stopped);
        assert_eq!(
            s.set_document_visible(true, 1.0, &mut host),
            Transition::Unchanged
        );
        assert_eq!(s.on_frame(100.0, &mut host), Tick::Idle);
        assert!(host.live.is_empty());
    }

    #[test]
    fn retarget_to_constrained_lowers_caps() {
        let mut s = AdaptiveScheduler::new(&desktop(), true, 0.0);
        let adj = s.retarget(&phone()).expect("changed");
        assert_eq!(adj.resolution_scale, 1.0);
        assert_eq!(adj.target_fps, 18);

        // back to desktop: resolution returns to the new cap, fps recovers gradually
        let adj = s.retarget(&desktop()).expect("changed");
        assert_eq!(adj.resolution_scale, 1.5);
        assert_eq!(s.target_fps(), 18);
        for _ in 0..FRAME_SAMPLE_WINDOW {
            s.record_frame(1.0);
        }
        assert_eq!(s.target_fps(), 19);
    }
}
