use geode_macro_tools::Fields;

use crate::{
    math::{point::Point, FloatNum},
    shape::Rect,
};

/// Frame timing handed to every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[r]
pub struct GameTime {
    /// seconds since the previous tick
    delta: FloatNum,
    elapsed: FloatNum,
    #[r(copy)]
    frame: u64,
}

impl GameTime {
    pub fn new(delta: FloatNum) -> Self {
        Self {
            delta,
            elapsed: delta,
            frame: 0,
        }
    }

    /// start the next frame
    pub fn advance(&mut self, delta: FloatNum) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame += 1;
    }
}

/// Viewport state, only read for bound tests and parallax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[r(copy)]
pub struct ScreenInfo {
    area: Rect,
    cursor: Point,
    camera_center: Point,
}

impl ScreenInfo {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            cursor: Point::ORIGIN,
            camera_center: area.center(),
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<Point>) -> Self {
        self.cursor = cursor.into();
        self
    }

    pub fn with_camera_center(mut self, camera_center: impl Into<Point>) -> Self {
        self.camera_center = camera_center.into();
        self
    }
}
