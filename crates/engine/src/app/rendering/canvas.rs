use crate::physics::{Aabb, SceneWorld};

pub const CLEAR_COLOR: [u8; 4] = [245, 245, 245, 255];
pub const SOLID_COLOR: [u8; 4] = [80, 80, 80, 255];
pub const ACTOR_COLOR: [u8; 4] = [230, 41, 55, 255];

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

pub(crate) fn draw_world(frame: &mut [u8], viewport: Viewport, world: &SceneWorld) {
    clear(frame, CLEAR_COLOR);
    for solid in world.solids() {
        fill_rect(frame, viewport, solid.bounds, SOLID_COLOR);
    }
    for actor in world.actors() {
        fill_rect(frame, viewport, actor.bounds, ACTOR_COLOR);
    }
}

pub(crate) fn clear(frame: &mut [u8], color: [u8; 4]) {
    for pixel in frame.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.copy_from_slice(&color);
    }
}

// Clipped to the viewport; a frame shorter than the viewport draws nothing.
pub(crate) fn fill_rect(frame: &mut [u8], viewport: Viewport, rect: Aabb, color: [u8; 4]) {
    if frame.len() < viewport.byte_len() {
        return;
    }

    let x_start = u32::from(rect.x).min(viewport.width) as usize;
    let x_end = rect.right().min(viewport.width) as usize;
    let y_start = u32::from(rect.y).min(viewport.height) as usize;
    let y_end = rect.bottom().min(viewport.height) as usize;
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let stride = viewport.width as usize * BYTES_PER_PIXEL;
    for row in y_start..y_end {
        let row_start = row * stride;
        let span = &mut frame
            [row_start + x_start * BYTES_PER_PIXEL..row_start + x_end * BYTES_PER_PIXEL];
        for pixel in span.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&color);
        }
    }
}
