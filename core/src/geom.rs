use std::ops;

/// 2D vector, also used for points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction; the zero vector normalizes to
    /// itself rather than dividing by zero.
    pub fn normalized(self) -> Vec2 {
        let length = self.length();
        if length > 0.0 {
            Vec2::new(self.x / length, self.y / length)
        } else {
            Vec2::ZERO
        }
    }

    /// Angle in radians, `atan2(y, x)`.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Size {
        Size { width, height }
    }
}

/// Axis-aligned rectangle given by its center point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Size,
}

impl Rect {
    pub const fn new(center: Vec2, size: Size) -> Rect {
        Rect { center, size }
    }

    pub fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.size.width / 2.0
            && (point.y - self.center.y).abs() <= self.size.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_vector_normalizes_to_itself() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn normalized_has_unit_length() {
        for v in [
            Vec2::new(3.0, 4.0),
            Vec2::new(-0.2, 0.01),
            Vec2::new(1000.0, -2500.0),
        ] {
            let length = v.normalized().length();
            assert!((length - 1.0).abs() < 1e-6, "|normalize({:?})| = {}", v, length);
        }
    }

    #[test]
    fn angle_follows_atan2() {
        assert_eq!(Vec2::new(1.0, 0.0).angle(), 0.0);
        assert_eq!(Vec2::new(0.0, 1.0).angle(), FRAC_PI_2);
        assert_eq!(Vec2::new(-1.0, 0.0).angle(), PI);
        assert_eq!(Vec2::new(0.0, -1.0).angle(), -FRAC_PI_2);
    }

    #[test]
    fn rect_contains_its_edge() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Size::new(4.0, 2.0));
        assert!(rect.contains(Vec2::new(12.0, 11.0)));
        assert!(rect.contains(Vec2::new(8.0, 9.0)));
        assert!(!rect.contains(Vec2::new(12.1, 10.0)));
        assert!(!rect.contains(Vec2::new(10.0, 11.1)));
    }
}
