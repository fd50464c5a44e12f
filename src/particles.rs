use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_css(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgb({}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

const AMBIENT_BLUE: Rgb = Rgb::new(0.25, 0.58, 0.96);
const CODE_GREEN: Rgb = Rgb::new(0.06, 0.73, 0.51);
const CODE_BLUE: Rgb = Rgb::new(0.23, 0.51, 0.96);
const CODE_PURPLE: Rgb = Rgb::new(0.55, 0.36, 0.97);
const MATRIX_GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleStyle {
    /// Sparse blue dust behind the main page.
    Ambient,
    /// Denser multi-colored field.
    Code,
    /// Falling green points behind the terminal.
    MatrixRain,
}

impl ParticleStyle {
    fn half_extent(self) -> f64 {
        match self {
            Self::Ambient => 15.0,
            Self::Code => 25.0,
            Self::MatrixRain => 10.0,
        }
    }

    /// Drift amplitudes (x, y) in world units.
    fn drift(self) -> (f64, f64) {
        match self {
            Self::Ambient => (0.018, 0.03),
            Self::Code => (0.03, 0.06),
            Self::MatrixRain => (0.0, 0.0),
        }
    }

    fn spin_rate(self) -> f64 {
        match self {
            Self::Ambient => 0.01,
            Self::Code => 0.02,
            Self::MatrixRain => 0.0,
        }
    }

    pub fn point_size(self) -> f64 {
        match self {
            Self::Ambient => 0.05,
            Self::Code | Self::MatrixRain => 0.1,
        }
    }

    pub fn opacity(self, dark: bool) -> f64 {
        match self {
            Self::Ambient => 0.3,
            Self::Code if dark => 0.6,
            Self::Code => 0.4,
            Self::MatrixRain => 0.6,
        }
    }
}

const MATRIX_FALL_SPEED: f64 = 3.0;

/// A fixed set of points whose positions are a pure function of elapsed time.
/// Base positions and colors come from a seeded generator, so the same seed
/// always yields the same field.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    style: ParticleStyle,
    base: Vec<Vec3>,
    colors: Vec<Rgb>,
}

impl ParticleField {
    pub fn generate(style: ParticleStyle, count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let half = style.half_extent();
        let mut base = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            base.push(Vec3::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ));
            colors.push(match style {
                ParticleStyle::Ambient => AMBIENT_BLUE,
                ParticleStyle::MatrixRain => MATRIX_GREEN,
                ParticleStyle::Code => {
                    let pick: f64 = rng.random();
                    if pick < 0.4 {
                        CODE_GREEN
                    } else if pick < 0.7 {
                        CODE_BLUE
                    } else {
                        CODE_PURPLE
                    }
                }
            });
        }

        Self { style, base, colors }
    }

    pub fn style(&self) -> ParticleStyle {
        self.style
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Rotation of the whole field about Y.
    pub fn rotation_y(&self, elapsed: f64) -> f64 {
        elapsed * self.style.spin_rate()
    }

    /// Local positions at `elapsed` seconds; every coordinate stays within
    /// the field's extent.
    pub fn positions_at(&self, elapsed: f64) -> Vec<Vec3> {
        let half = self.style.half_extent();
        let (drift_x, drift_y) = self.style.drift();

        self.base
            .iter()
            .enumerate()
            .map(|(index, base)| {
                let phase = index as f64;
                match self.style {
                    ParticleStyle::MatrixRain => Vec3::new(
                        base.x,
                        wrap(base.y - MATRIX_FALL_SPEED * elapsed, half),
                        base.z,
                    ),
                    ParticleStyle::Ambient | ParticleStyle::Code => Vec3::new(
                        wrap(
                            base.x + drift_x * ((elapsed + phase).sin() - phase.sin()),
                            half,
                        ),
                        wrap(
                            base.y + drift_y * (phase.cos() - (elapsed + phase).cos()),
                            half,
                        ),
                        base.z,
                    ),
                }
            })
            .collect()
    }
}

fn wrap(value: f64, half: f64) -> f64 {
    (value + half).rem_euclid(2.0 * half) - half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::generate(ParticleStyle::Code, 64, 11);
        let b = ParticleField::generate(ParticleStyle::Code, 64, 11);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn positions_at_zero_are_base_positions() {
        let field = ParticleField::generate(ParticleStyle::Ambient, 20, 3);
        let positions = field.positions_at(0.0);
        for (position, base) in positions.iter().zip(&field.base) {
            assert!((position.x - base.x).abs() < 1e-9);
            assert!((position.y - base.y).abs() < 1e-9);
        }
    }

    #[test]
    fn positions_stay_within_extent() {
        for style in [ParticleStyle::Ambient, ParticleStyle::Code, ParticleStyle::MatrixRain] {
            let field = ParticleField::generate(style, 100, 5);
            let half = style.half_extent();
            for elapsed in [0.0, 1.7, 42.0, 3_600.0] {
                for position in field.positions_at(elapsed) {
                    assert!(position.x >= -half && position.x <= half);
                    assert!(position.y >= -half && position.y <= half);
                }
            }
        }
    }

    #[test]
    fn matrix_rain_falls_and_wraps() {
        let field = ParticleField::generate(ParticleStyle::MatrixRain, 1, 9);
        let start = field.positions_at(0.0)[0].y;
        let later = field.positions_at(0.1)[0].y;
        let expected = wrap(start - 0.3, 10.0);
        assert!((later - expected).abs() < 1e-9);
    }

    #[test]
    fn ambient_colors_are_uniform_and_code_colors_use_palette() {
        let ambient = ParticleField::generate(ParticleStyle::Ambient, 10, 1);
        assert!(ambient.colors().iter().all(|color| *color == AMBIENT_BLUE));

        let code = ParticleField::generate(ParticleStyle::Code, 200, 1);
        assert!(code
            .colors()
            .iter()
            .all(|color| [CODE_GREEN, CODE_BLUE, CODE_PURPLE].contains(color)));
    }

    #[test]
    fn css_color_rounds_channels() {
        assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_css(), "rgb(255, 0, 128)");
    }
}
