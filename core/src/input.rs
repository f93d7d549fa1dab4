use crate::geom::{Rect, Vec2};

/// On-screen analog stick. Pointer positions inside its frame map to a
/// direction vector with components in [-1, 1] and magnitude at most 1;
/// displacement beyond the stick radius is clamped to the rim.
///
/// The y component is inverted on the way out: "up" on screen becomes
/// positive forward magnitude for the physics convention.
#[derive(Clone, Copy, Debug)]
pub struct AnalogStick {
    base_center: Vec2,
    radius: f32,
    knob_offset: Vec2,
}

impl AnalogStick {
    pub fn new(frame: Rect) -> AnalogStick {
        AnalogStick {
            base_center: frame.center,
            radius: frame.size.width / 2.0,
            knob_offset: Vec2::ZERO,
        }
    }

    pub fn base_center(&self) -> Vec2 {
        self.base_center
    }

    /// Clamped knob displacement from the base center, for rendering.
    pub fn knob_offset(&self) -> Vec2 {
        self.knob_offset
    }

    pub fn touch_began(&mut self, position: Vec2) -> Vec2 {
        self.sample(position)
    }

    pub fn touch_moved(&mut self, position: Vec2) -> Vec2 {
        self.sample(position)
    }

    /// Recenters the knob and reports a zero vector, so a released stick
    /// zeroes the commanded velocity immediately.
    pub fn touch_ended(&mut self) -> Vec2 {
        self.sample(self.base_center)
    }

    pub fn touch_cancelled(&mut self) -> Vec2 {
        self.sample(self.base_center)
    }

    fn sample(&mut self, position: Vec2) -> Vec2 {
        let mut to_center = position - self.base_center;
        let direction = to_center.normalized();

        let mut length = to_center.length();
        if length > self.radius {
            length = self.radius;
            to_center = direction * self.radius;
        }

        self.knob_offset = to_center;
        Vec2::new(
            direction.x * (length / self.radius),
            direction.y * (length / self.radius) * -1.0,
        )
    }
}

/// Discrete direction derived from a displacement vector, for focus
/// navigation between buttons on pointerless platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ControlDirection {
    pub const ALL: [ControlDirection; 4] = [
        ControlDirection::Up,
        ControlDirection::Down,
        ControlDirection::Left,
        ControlDirection::Right,
    ];

    /// Requires sufficient displacement to specify a direction; the axis
    /// with the larger absolute component wins, ties going vertical.
    pub fn from_vector(vector: Vec2) -> Option<ControlDirection> {
        if vector.length() < 0.5 {
            return None;
        }

        Some(if vector.x.abs() > vector.y.abs() {
            if vector.x > 0.0 {
                ControlDirection::Right
            } else {
                ControlDirection::Left
            }
        } else if vector.y > 0.0 {
            ControlDirection::Up
        } else {
            ControlDirection::Down
        })
    }
}
