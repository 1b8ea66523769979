#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned box in pixel space, anchored at its top-left corner. Every
/// box is at least one pixel on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aabb {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Aabb {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    pub fn coord(&self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn extent(&self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    // Wraps on overflow; levels are expected to stay well inside u16 space.
    pub fn translate(&mut self, axis: Axis, delta: i16) {
        match axis {
            Axis::X => self.x = self.x.wrapping_add_signed(delta),
            Axis::Y => self.y = self.y.wrapping_add_signed(delta),
        }
    }

    pub fn right(&self) -> u32 {
        u32::from(self.x) + u32::from(self.width)
    }

    pub fn bottom(&self) -> u32 {
        u32::from(self.y) + u32::from(self.height)
    }
}

/// Open-interval overlap on both axes. Boxes that only share an edge do not overlap.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    (a.right() > u32::from(b.x) && u32::from(a.x) < b.right())
        && (a.bottom() > u32::from(b.y) && u32::from(a.y) < b.bottom())
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

/// Returns -1.0 for negative input and 1.0 otherwise, including for zero.
pub fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
