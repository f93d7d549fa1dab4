//! Deterministic race simulation harness.
//!
//! Replays a recorded stick script through the full pipeline (stick
//! sampling, session state machine, countdown and lap tracking) over a
//! minimal kinematic stand-in for the engine's rigid bodies, and reports
//! how the race went.

use race_core::{
    AnalogStick, ButtonTemplate, CarId, Catalog, HudState, LevelId, OverlayKind, OverlayTemplate,
    RaceConfig, RaceSession, Rect, Selection, SessionHost, SessionLayout, SessionState, Size, Vec2,
};
use serde::{Deserialize, Serialize};

/// Current script format version.
pub const SCRIPT_VERSION: u32 = 1;

/// Track geometry used by the simulation scene.
pub const TRACK_RADIUS: f32 = 600.0;

const DEFAULT_CATALOG_JSON: &str = include_str!("../levels.json");

/// A recorded run: level/car selection plus one entry per frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceScript {
    pub v: u32,
    pub level: usize,
    pub car: usize,
    pub frames: Vec<ScriptFrame>,
}

/// One frame of input: the elapsed wall-clock delta and, when the stick
/// was touched, the raw pointer position. A missing stick entry is a
/// release, recentering the knob.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScriptFrame {
    pub dt: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stick: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceOutcome {
    Success,
    Failure,
    /// The script ran out before the race decided either way.
    Incomplete,
}

/// What a simulated race produced, ready to serialize.
#[derive(Debug, Serialize, Deserialize)]
pub struct RaceReport {
    pub outcome: RaceOutcome,
    pub seconds_remaining: i32,
    pub laps_remaining: i32,
    pub frames_run: usize,
    /// UI notifications in the order the session emitted them.
    pub events: Vec<String>,
}

/// The bundled level/car catalog.
pub fn default_catalog() -> Catalog {
    serde_json::from_str(DEFAULT_CATALOG_JSON).expect("bundled levels.json is valid")
}

/// Scene geometry for the simulation: a circular track centered on the
/// origin, the car starting on the right edge just short of the first
/// progress boundary, two obstacle crates on the infield.
pub fn default_layout() -> SessionLayout {
    SessionLayout {
        track_center: Vec2::ZERO,
        car_start: Vec2::new(TRACK_RADIUS, -24.0),
        obstacle_starts: vec![Vec2::new(420.0, 180.0), Vec2::new(-390.0, -210.0)],
        viewport: Size::new(1920.0, 1080.0),
    }
}

/// The on-screen stick: lower-left corner, 300 points across.
pub fn stick_frame() -> Rect {
    Rect::new(Vec2::new(200.0, 880.0), Size::new(300.0, 300.0))
}

fn button(name: &str, x: f32, y: f32, width: f32, height: f32) -> ButtonTemplate {
    ButtonTemplate {
        name: name.to_owned(),
        position: Vec2::new(x, y),
        size: Size::new(width, height),
        texture: Some(format!("button_{}", name)),
    }
}

/// In-game HUD controls: just the pause button in the top-right corner.
pub fn hud_templates() -> Vec<ButtonTemplate> {
    vec![button("pause", 1830.0, 66.0, 96.0, 96.0)]
}

/// The three modal panels and their controls.
pub fn overlay_templates() -> (OverlayTemplate, OverlayTemplate, OverlayTemplate) {
    let content_size = Size::new(800.0, 600.0);
    let pause = OverlayTemplate {
        name: "pause".to_owned(),
        content_size,
        buttons: vec![
            button("resume", 0.0, 60.0, 240.0, 80.0),
            button("cancel", 0.0, -60.0, 240.0, 80.0),
        ],
    };
    let failure = OverlayTemplate {
        name: "failure".to_owned(),
        content_size,
        buttons: vec![button("replay", 0.0, 0.0, 240.0, 80.0)],
    };
    let success = OverlayTemplate {
        name: "success".to_owned(),
        content_size,
        buttons: vec![button("replay", 0.0, 0.0, 240.0, 80.0)],
    };
    (pause, failure, success)
}

/// Kinematic stand-in for the engine's physics: bodies take the commanded
/// velocity verbatim and integrate position; collision response is the
/// real engine's job and does not exist here.
pub struct SimWorld {
    car_position: Vec2,
    car_velocity: Vec2,
    car_heading: f32,
    obstacle_positions: Vec<Vec2>,
    events: Vec<String>,
    last_hud: Option<HudState>,
}

impl SimWorld {
    pub fn new(car_start: Vec2, obstacle_starts: Vec<Vec2>) -> SimWorld {
        SimWorld {
            car_position: car_start,
            car_velocity: Vec2::ZERO,
            car_heading: 0.0,
            obstacle_positions: obstacle_starts,
            events: Vec::new(),
            last_hud: None,
        }
    }

    /// Advances the bodies by one frame.
    pub fn step(&mut self, dt: f32) {
        self.car_position = self.car_position + self.car_velocity * dt;
    }

    pub fn car_heading(&self) -> f32 {
        self.car_heading
    }

    pub fn obstacle_positions(&self) -> &[Vec2] {
        &self.obstacle_positions
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn last_hud(&self) -> Option<HudState> {
        self.last_hud
    }

    fn into_events(self) -> Vec<String> {
        self.events
    }
}

impl SessionHost for SimWorld {
    fn car_position(&self) -> Vec2 {
        self.car_position
    }

    fn set_car_velocity(&mut self, velocity: Vec2) {
        self.car_velocity = velocity;
    }

    fn set_car_heading(&mut self, radians: f32) {
        self.car_heading = radians;
    }

    fn reset_car(&mut self, position: Vec2) {
        self.car_position = position;
        self.car_velocity = Vec2::ZERO;
        self.events.push("car_reset".to_owned());
    }

    fn reset_obstacle(&mut self, index: usize, position: Vec2) {
        if let Some(slot) = self.obstacle_positions.get_mut(index) {
            *slot = position;
        }
    }

    fn overlay_shown(&mut self, kind: OverlayKind) {
        tracing::debug!(?kind, "overlay shown");
        self.events.push(format!("overlay_shown:{:?}", kind));
    }

    fn overlay_dismissed(&mut self) {
        tracing::debug!("overlay dismissed");
        self.events.push("overlay_dismissed".to_owned());
    }

    fn cancel_requested(&mut self) {
        tracing::debug!("cancel requested");
        self.events.push("cancel_requested".to_owned());
    }

    fn lap_completed(&mut self) {
        tracing::debug!("lap completed");
        self.events.push("lap_completed".to_owned());
    }

    fn hud_changed(&mut self, hud: HudState) {
        self.last_hud = Some(hud);
    }
}

/// Runs a script through the session core and reports the outcome.
///
/// The race stops at the first Success/Failure transition; a script that
/// ends while still racing reports `Incomplete`.
///
/// # Errors
/// Unsupported script versions and unknown/malformed catalog entries.
pub fn run_race(
    script: &RaceScript,
    catalog: &Catalog,
) -> Result<RaceReport, Box<dyn std::error::Error>> {
    if script.v != SCRIPT_VERSION {
        return Err(format!("Unsupported script version: {}", script.v).into());
    }

    let selection = Selection {
        level: LevelId(script.level),
        car: CarId(script.car),
    };
    let layout = default_layout();
    let (pause, failure, success) = overlay_templates();

    let mut session = RaceSession::new(
        catalog,
        selection,
        layout.clone(),
        &hud_templates(),
        &pause,
        &failure,
        &success,
    )?;
    let mut world = SimWorld::new(layout.car_start, layout.obstacle_starts.clone());
    let mut stick = AnalogStick::new(stick_frame());

    tracing::info!(
        level = script.level,
        car = script.car,
        frames = script.frames.len(),
        max_speed = session.config().max_speed,
        "starting race"
    );

    let mut frames_run = 0;
    for frame in &script.frames {
        let relative = match frame.stick {
            Some([x, y]) => stick.touch_moved(Vec2::new(x, y)),
            None => stick.touch_ended(),
        };
        session.drive(relative, &mut world);
        world.step(frame.dt);
        session.update(frame.dt, &mut world);
        frames_run += 1;

        if matches!(
            session.state(),
            SessionState::Failure | SessionState::Success
        ) {
            break;
        }
    }

    let outcome = match session.state() {
        SessionState::Success => RaceOutcome::Success,
        SessionState::Failure => RaceOutcome::Failure,
        SessionState::Active | SessionState::Paused => RaceOutcome::Incomplete,
    };
    let hud = session.hud();
    tracing::info!(?outcome, frames_run, seconds_remaining = hud.seconds_remaining, "race finished");

    Ok(RaceReport {
        outcome,
        seconds_remaining: hud.seconds_remaining,
        laps_remaining: hud.laps_remaining,
        frames_run,
        events: world.into_events(),
    })
}

/// Builds a script that holds the stick on the rim, steering the car
/// tangentially around the track center at full throttle.
///
/// The generator integrates the same kinematics the simulation uses, so
/// the recorded pointer positions keep tracking the car as it goes.
pub fn circle_script(
    level: usize,
    car: usize,
    catalog: &Catalog,
    duration_seconds: f32,
    fps: f32,
) -> Result<RaceScript, Box<dyn std::error::Error>> {
    let selection = Selection {
        level: LevelId(level),
        car: CarId(car),
    };
    let config = RaceConfig::resolve(catalog, selection)?;
    let layout = default_layout();
    let stick = stick_frame();
    let stick_radius = stick.size.width / 2.0;

    let frame_dt = 1.0 / fps;
    let steps = (duration_seconds * fps) as usize;

    let mut position = layout.car_start;
    let mut frames = Vec::with_capacity(steps);
    for _ in 0..steps {
        let radial = position - layout.track_center;
        let tangent = Vec2::new(-radial.y, radial.x).normalized();
        // The stick inverts y on the way out, so the pointer aims at the
        // mirrored target to command `tangent`.
        let pointer = stick.center + Vec2::new(tangent.x, -tangent.y) * stick_radius;
        frames.push(ScriptFrame {
            dt: frame_dt,
            stick: Some([pointer.x, pointer.y]),
        });
        position = position + tangent * (config.max_speed * frame_dt);
    }

    Ok(RaceScript {
        v: SCRIPT_VERSION,
        level,
        car,
        frames,
    })
}
