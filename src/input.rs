use macroquad::prelude::{is_key_down, KeyCode};

/// Which movement keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// up arrow or W
    pub up: bool,
    /// down arrow or S
    pub down: bool,
    /// left arrow or A
    pub left: bool,
    /// right arrow or D
    pub right: bool,
}

impl HeldKeys {
    /// Samples arrow keys and WASD from macroquad.
    pub fn poll() -> Self {
        Self {
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        }
    }

    /// Raw direction in `{-1, 0, 1}` per axis; opposite keys cancel.
    pub fn direction(self) -> (f64, f64) {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f64;
        (axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Frame time in seconds to frame units (1.0 = 1/60 s).
#[inline]
pub fn frame_units(seconds: f32) -> f64 {
    seconds as f64 * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_to_direction() {
        assert_eq!(HeldKeys::default().direction(), (0.0, 0.0));
        let up_right = HeldKeys {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(up_right.direction(), (1.0, -1.0));
        let all = HeldKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(all.direction(), (0.0, 0.0));
    }

    #[test]
    fn one_sixtieth_is_one_frame() {
        assert!((frame_units(1.0 / 60.0) - 1.0).abs() < 1e-6);
    }
}
