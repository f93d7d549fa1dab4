use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::button::{ButtonIdentifier, ButtonPanel, ButtonResponder, ButtonTemplate};
use crate::config::{Catalog, ConfigError, RaceConfig, Selection};
use crate::geom::{Size, Vec2};
use crate::input::ControlDirection;
use crate::overlay::{Overlay, OverlayTemplate};

/// The session's phase. Exactly one is current at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Paused,
    Failure,
    Success,
}

impl SessionState {
    /// The allowed transitions. Everything else is a wiring bug, not a
    /// runtime condition, and requesting it aborts.
    pub fn may_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Active, Paused)
                | (Active, Failure)
                | (Active, Success)
                | (Paused, Active)
                | (Failure, Active)
                | (Success, Active)
        )
    }
}

/// Which modal panel an overlay state presents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    Pause,
    Failure,
    Success,
}

/// Countdown clock fed by per-frame deltas. Decrements at most once per
/// `tick` call when a whole second has accumulated, then zeroes the
/// accumulator, remainder included. A dropped frame therefore stretches
/// that countdown second instead of double-charging the next one.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    seconds_remaining: i32,
    accumulated: f32,
}

impl SessionClock {
    pub fn new(time_limit_seconds: i32) -> SessionClock {
        SessionClock {
            seconds_remaining: time_limit_seconds,
            accumulated: 0.0,
        }
    }

    pub fn seconds_remaining(&self) -> i32 {
        self.seconds_remaining
    }

    /// Discards the partial second on a paused frame so the pause does not
    /// eat countdown time.
    pub fn hold(&mut self) {
        self.accumulated = 0.0;
    }

    /// Returns true when this call crossed the one-second boundary.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        self.accumulated += delta_seconds;
        if self.accumulated >= 1.0 {
            self.accumulated = 0.0;
            self.seconds_remaining -= 1;
            true
        } else {
            false
        }
    }
}

/// Tracks lap progress by the car's angular position around the track
/// center. The progress angle is offset by π so the boundary sequence
/// starts at π; each quadrant boundary crossed advances the next boundary
/// by π/2, and the boundary arriving back at π completes a lap.
#[derive(Clone, Copy, Debug)]
pub struct LapTracker {
    track_center: Vec2,
    next_progress_angle: f32,
    laps_remaining: i32,
}

impl LapTracker {
    pub fn new(track_center: Vec2, laps: i32) -> LapTracker {
        LapTracker {
            track_center,
            next_progress_angle: PI,
            laps_remaining: laps,
        }
    }

    pub fn laps_remaining(&self) -> i32 {
        self.laps_remaining
    }

    pub fn next_progress_angle(&self) -> f32 {
        self.next_progress_angle
    }

    /// Feeds one car position; returns true when it completes a lap.
    pub fn observe(&mut self, car_position: Vec2) -> bool {
        let vector = car_position - self.track_center;
        let progress_angle = vector.angle() + PI;

        // A small overshoot past the boundary is forward progress; a large
        // one is the angle wrapping around, not a crossing.
        if progress_angle > self.next_progress_angle
            && progress_angle - self.next_progress_angle < FRAC_PI_4
        {
            self.next_progress_angle += FRAC_PI_2;

            if self.next_progress_angle >= TAU {
                self.next_progress_angle = 0.0;
            }

            if (self.next_progress_angle - PI).abs() < f32::EPSILON {
                self.laps_remaining -= 1;
                return true;
            }
        }
        false
    }
}

/// Scene geometry the session needs, injected once at construction in
/// place of runtime scene-graph lookups.
#[derive(Clone, Debug)]
pub struct SessionLayout {
    pub track_center: Vec2,
    pub car_start: Vec2,
    pub obstacle_starts: Vec<Vec2>,
    pub viewport: Size,
}

/// Current values for the time/laps labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudState {
    pub seconds_remaining: i32,
    pub laps_remaining: i32,
}

/// The host engine surface: read/write access to the car's physics body,
/// obstacle resets for replays, and fire-and-forget UI notifications.
pub trait SessionHost {
    fn car_position(&self) -> Vec2;
    fn set_car_velocity(&mut self, velocity: Vec2);
    fn set_car_heading(&mut self, radians: f32);
    /// Reposition the car and clear its accumulated forces and velocity.
    fn reset_car(&mut self, position: Vec2);
    fn reset_obstacle(&mut self, index: usize, position: Vec2);

    fn overlay_shown(&mut self, kind: OverlayKind);
    fn overlay_dismissed(&mut self);
    /// The player asked to leave the session entirely; routing back to the
    /// root screen is the host's business.
    fn cancel_requested(&mut self);
    fn lap_completed(&mut self);
    fn hud_changed(&mut self, hud: HudState);
}

#[derive(Clone, Debug)]
struct SessionOverlays {
    pause: Overlay,
    failure: Overlay,
    success: Overlay,
}

/// One race: a car circling the track against the clock, driven by stick
/// input, moving through Active/Paused/Failure/Success. Created when a
/// level and car are selected; the host ticks [`RaceSession::update`] once
/// per frame and forwards pointer events.
pub struct RaceSession {
    selection: Selection,
    config: RaceConfig,
    layout: SessionLayout,
    clock: SessionClock,
    laps: LapTracker,
    state: SessionState,
    paused: bool,
    hud_panel: ButtonPanel,
    overlays: SessionOverlays,
}

#[derive(Default)]
struct PressCapture(Option<ButtonIdentifier>);

impl ButtonResponder for PressCapture {
    fn button_pressed(&mut self, button: ButtonIdentifier) {
        self.0 = Some(button);
    }
}

impl RaceSession {
    pub fn new(
        catalog: &Catalog,
        selection: Selection,
        layout: SessionLayout,
        hud_buttons: &[ButtonTemplate],
        pause_overlay: &OverlayTemplate,
        failure_overlay: &OverlayTemplate,
        success_overlay: &OverlayTemplate,
    ) -> Result<RaceSession, ConfigError> {
        let config = RaceConfig::resolve(catalog, selection)?;
        Ok(RaceSession {
            selection,
            config,
            clock: SessionClock::new(config.time_limit_seconds),
            laps: LapTracker::new(layout.track_center, config.laps_required),
            layout,
            state: SessionState::Active,
            paused: false,
            hud_panel: ButtonPanel::parse(hud_buttons),
            overlays: SessionOverlays {
                pause: Overlay::from_template(pause_overlay),
                failure: Overlay::from_template(failure_overlay),
                success: Overlay::from_template(success_overlay),
            },
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn hud(&self) -> HudState {
        HudState {
            seconds_remaining: self.clock.seconds_remaining(),
            laps_remaining: self.laps.laps_remaining(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// External pause flag, for hosts that halt the scene outside the
    /// state machine (e.g. the app losing foreground).
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn track_texture(&self) -> String {
        format!("track_{}", self.selection.level.0 + 1)
    }

    pub fn car_texture(&self) -> String {
        format!("car_{}", self.selection.car.0 + 1)
    }

    pub fn current_overlay(&self) -> Option<&Overlay> {
        match self.state {
            SessionState::Active => None,
            SessionState::Paused => Some(&self.overlays.pause),
            SessionState::Failure => Some(&self.overlays.failure),
            SessionState::Success => Some(&self.overlays.success),
        }
    }

    /// Per-frame tick with wall-clock `delta_seconds` (>= 0, not assumed
    /// uniform). Only the Active state has frame behavior.
    pub fn update(&mut self, delta_seconds: f32, host: &mut dyn SessionHost) {
        if self.state == SessionState::Active {
            self.update_active(delta_seconds, host);
        }
    }

    fn update_active(&mut self, delta_seconds: f32, host: &mut dyn SessionHost) {
        if self.paused {
            self.clock.hold();
            return;
        }

        if self.clock.tick(delta_seconds) && self.clock.seconds_remaining() >= 0 {
            host.hud_changed(self.hud());
        }

        if self.laps.observe(host.car_position()) {
            host.hud_changed(self.hud());
            host.lap_completed();
        }

        if self.clock.seconds_remaining() < 0 || self.laps.laps_remaining() == 0 {
            // Success wins the exact tie: finishing on the final second
            // still counts.
            if self.laps.laps_remaining() == 0 {
                self.transition_to(SessionState::Success, host);
            } else {
                self.transition_to(SessionState::Failure, host);
            }
        }
    }

    /// Applies a stick sample to the car: velocity is the sample scaled by
    /// the configured top speed, heading follows the sample direction. A
    /// centered stick zeroes the velocity but keeps the last heading.
    pub fn drive(&mut self, relative: Vec2, host: &mut dyn SessionHost) {
        if self.paused {
            return;
        }
        host.set_car_velocity(relative * self.config.max_speed);
        if relative != Vec2::ZERO {
            host.set_car_heading(relative.angle());
        }
    }

    /// Moves between states, running exit/entry behavior. Panics on a
    /// transition outside the table.
    pub fn transition_to(&mut self, next: SessionState, host: &mut dyn SessionHost) {
        assert!(
            self.state.may_transition_to(next),
            "invalid session transition: {:?} -> {:?}",
            self.state,
            next
        );
        let previous = self.state;
        self.exit_state(previous, host);
        self.state = next;
        self.enter_state(previous, host);
    }

    fn exit_state(&mut self, state: SessionState, host: &mut dyn SessionHost) {
        match state {
            SessionState::Active => {}
            SessionState::Paused | SessionState::Failure | SessionState::Success => {
                self.paused = false;
                host.overlay_dismissed();
            }
        }
    }

    fn enter_state(&mut self, previous: SessionState, host: &mut dyn SessionHost) {
        match self.state {
            SessionState::Active => {
                if previous == SessionState::Success {
                    self.restart_level(host);
                }
            }
            SessionState::Paused => self.present_overlay(OverlayKind::Pause, host),
            SessionState::Failure => self.present_overlay(OverlayKind::Failure, host),
            SessionState::Success => self.present_overlay(OverlayKind::Success, host),
        }
    }

    fn present_overlay(&mut self, kind: OverlayKind, host: &mut dyn SessionHost) {
        self.paused = true;
        let viewport = self.layout.viewport;
        let overlay = self.overlay_mut(kind);
        overlay.update_scale(viewport);
        overlay.panel_mut().reset_focus();
        host.overlay_shown(kind);
    }

    fn overlay_mut(&mut self, kind: OverlayKind) -> &mut Overlay {
        match kind {
            OverlayKind::Pause => &mut self.overlays.pause,
            OverlayKind::Failure => &mut self.overlays.failure,
            OverlayKind::Success => &mut self.overlays.success,
        }
    }

    fn restart_level(&mut self, host: &mut dyn SessionHost) {
        self.clock = SessionClock::new(self.config.time_limit_seconds);
        self.laps = LapTracker::new(self.layout.track_center, self.config.laps_required);
        host.hud_changed(self.hud());

        host.reset_car(self.layout.car_start);
        for (index, position) in self.layout.obstacle_starts.iter().enumerate() {
            host.reset_obstacle(index, *position);
        }
    }

    fn active_panel_mut(&mut self) -> &mut ButtonPanel {
        match self.state {
            SessionState::Active => &mut self.hud_panel,
            SessionState::Paused => self.overlays.pause.panel_mut(),
            SessionState::Failure => self.overlays.failure.panel_mut(),
            SessionState::Success => self.overlays.success.panel_mut(),
        }
    }

    /// Pointer events route to whatever surface is in front: the HUD while
    /// racing, the current overlay's panel otherwise.
    pub fn pointer_began(&mut self, position: Vec2) {
        self.active_panel_mut().pointer_began(position);
    }

    pub fn pointer_ended(&mut self, position: Vec2, host: &mut dyn SessionHost) {
        let mut press = PressCapture::default();
        self.active_panel_mut().pointer_ended(position, &mut press);
        if let Some(identifier) = press.0 {
            self.button_pressed(identifier, host);
        }
    }

    pub fn pointer_cancelled(&mut self) {
        self.active_panel_mut().pointer_cancelled();
    }

    /// Routes a button press to its action. A press that reaches a state
    /// with nothing wired for it is a bug in the surface definitions.
    pub fn button_pressed(&mut self, identifier: ButtonIdentifier, host: &mut dyn SessionHost) {
        match (self.state, identifier) {
            (SessionState::Active, ButtonIdentifier::Pause) => {
                self.transition_to(SessionState::Paused, host);
            }
            (SessionState::Paused, ButtonIdentifier::Resume) => {
                self.transition_to(SessionState::Active, host);
            }
            (SessionState::Paused, ButtonIdentifier::Cancel) => {
                host.cancel_requested();
            }
            (SessionState::Failure | SessionState::Success, ButtonIdentifier::Replay) => {
                self.transition_to(SessionState::Active, host);
            }
            (state, identifier) => {
                panic!("button {:?} has no action in state {:?}", identifier, state)
            }
        }
    }

    /// Directional focus navigation on the current overlay; no-op while
    /// racing, where there is no focusable surface.
    pub fn move_focus(&mut self, direction: ControlDirection) -> bool {
        match self.state {
            SessionState::Active => false,
            _ => self.active_panel_mut().move_focus(direction),
        }
    }

    pub fn trigger_focused(&mut self, host: &mut dyn SessionHost) {
        let mut press = PressCapture::default();
        self.active_panel_mut().trigger_focused(&mut press);
        if let Some(identifier) = press.0 {
            self.button_pressed(identifier, host);
        }
    }
}
