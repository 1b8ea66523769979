use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::physics::SceneWorld;

use super::canvas::{draw_world, Viewport};

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    canvas: Viewport,
}

impl Renderer {
    /// The canvas is the fixed logical resolution the level is authored in;
    /// `pixels` scales it to whatever size the window surface has.
    pub fn new(window: Arc<Window>, canvas: Viewport) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), canvas, size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            canvas,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), self.canvas, width, height)?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        canvas: Viewport,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(canvas.width, canvas.height, surface)
    }

    pub(crate) fn render_world(&mut self, world: &SceneWorld) -> Result<(), Error> {
        draw_world(self.pixels.frame_mut(), self.canvas, world);
        self.pixels.render()
    }
}
