use crate::vector::Vector2;

/// Mapping between world coordinates and framebuffer pixels.
///
/// World origin sits at the viewport center; one pixel spans `scale`
/// world units. Screen y grows downwards, same as world y (no flip).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(scale: f64, width: usize, height: usize) -> Self {
        Self { scale, width, height }
    }

    pub fn world_to_screen(&self, pos: Vector2) -> Vector2 {
        Vector2::new(
            pos.x / self.scale + self.width as f64 / 2.0,
            pos.y / self.scale + self.height as f64 / 2.0,
        )
    }

    pub fn screen_to_world(&self, pos: Vector2) -> Vector2 {
        Vector2::new(
            (pos.x - self.width as f64 / 2.0) * self.scale,
            (pos.y - self.height as f64 / 2.0) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Viewport {
        Viewport::new(1.0 / 100.0, 500, 500)
    }

    #[test]
    fn test_origin_maps_to_center() {
        assert_eq!(reference().world_to_screen(Vector2::ZERO), Vector2::new(250.0, 250.0));
    }

    #[test]
    fn test_world_to_screen_reference_scale() {
        let s = reference().world_to_screen(Vector2::new(-1.0, 2.0));
        assert!((s.x - 150.0).abs() < 1e-9);
        assert!((s.y - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_to_world_inverts() {
        let vp = Viewport::new(0.02, 640, 320);
        let w = Vector2::new(1.25, -2.5);
        let back = vp.screen_to_world(vp.world_to_screen(w));
        assert!((back.x - w.x).abs() < 1e-12);
        assert!((back.y - w.y).abs() < 1e-12);
    }
}
