use glam::Vec2;

/// Side-scrolling camera over a world with Y down.
/// Tracks a target horizontally and keeps the view inside the level.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Camera center position in world space.
    pub center: Vec2,
    /// Horizontal world extent the view may show, (min_x, max_x).
    pub bounds: Option<(f32, f32)>,
    /// Smoothing factor for camera follow (0.0 = instant, 0.99 = very slow).
    pub smoothing: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
            bounds: None,
            smoothing: 0.0,
        }
    }

    /// Keep the view within `[min_x, max_x]`.
    pub fn set_bounds(&mut self, min_x: f32, max_x: f32) {
        self.bounds = Some((min_x, max_x));
        self.clamp_to_bounds();
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Center horizontally on `x` immediately.
    pub fn look_at(&mut self, x: f32) {
        self.center.x = x;
        self.clamp_to_bounds();
    }

    /// Move toward `target` horizontally. Call once per step.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        if self.smoothing <= 0.0 {
            self.look_at(target.x);
        } else {
            let lerp_factor = 1.0 - self.smoothing.powf(dt * 60.0);
            self.center.x += (target.x - self.center.x) * lerp_factor;
            self.clamp_to_bounds();
        }
    }

    fn clamp_to_bounds(&mut self) {
        if let Some((min_x, max_x)) = self.bounds {
            let half_w = self.width / 2.0;
            if self.width >= max_x - min_x {
                self.center.x = (min_x + max_x) / 2.0;
            } else {
                self.center.x = self.center.x.clamp(min_x + half_w, max_x - half_w);
            }
        }
    }

    /// World position of the view's top-left corner.
    pub fn view_origin(&self) -> Vec2 {
        self.center - Vec2::new(self.width, self.height) / 2.0
    }
}
