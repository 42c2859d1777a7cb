/// Frame counter of the animation driver.
pub type Frame = u64;

/// Maps animation frames to membrane time. The model never sees this; the
/// driver converts a frame to `t` and passes `t` in.
#[derive(Clone, Copy, Debug)]
pub struct Timebase {
    pub fps: f64,
}

impl Timebase {
    pub fn frame_to_sec(&self, frame: Frame) -> f64 {
        frame as f64 / self.fps
    }

    pub fn sec_to_frame(&self, s: f64) -> Frame {
        if s <= 0.0 {
            return 0;
        }
        (s * self.fps).round() as Frame
    }

    /// Frames needed to cover `duration_s`, starting at t = 0. Never zero.
    pub fn frame_count(&self, duration_s: f64) -> Frame {
        self.sec_to_frame(duration_s).max(1)
    }

    /// Time step between consecutive frames (the `dt` of a frame update).
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.fps
    }
}
