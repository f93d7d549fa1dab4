//! Race-session core: a time-limited lap race around a track center,
//! driven by an on-screen analog stick.
//!
//! Everything here is deterministic, single-threaded and host-agnostic.
//! The host engine owns rendering, assets, audio and real physics; it
//! ticks [`RaceSession::update`] once per frame, forwards pointer events,
//! and implements [`SessionHost`] for the session's reads, writes and UI
//! notifications.

pub mod button;
pub mod config;
pub mod geom;
pub mod input;
pub mod overlay;
pub mod session;

pub use button::{Button, ButtonIdentifier, ButtonPanel, ButtonResponder, ButtonTemplate};
pub use config::{CarEntry, CarId, Catalog, ConfigError, LevelEntry, LevelId, RaceConfig, Selection};
pub use geom::{Rect, Size, Vec2};
pub use input::{AnalogStick, ControlDirection};
pub use overlay::{Overlay, OverlayTemplate};
pub use session::{
    HudState, OverlayKind, RaceSession, SessionHost, SessionLayout, SessionState,
};
