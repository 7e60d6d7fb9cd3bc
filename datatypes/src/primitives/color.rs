use crate::error::{self, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use snafu::OptionExt;
use std::str::FromStr;

/// `RgbaColor` defines a color by its red, green, blue and alpha channels.
///
/// Every channel is a fraction in `[0, 1]`. Values outside of this range are
/// stored as given and are considered out of gamut.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct RgbaColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// All named colors, in the order of their declaration
pub static NAMED_COLORS: [(&str, RgbaColor); 19] = [
    ("transparent", RgbaColor::TRANSPARENT),
    ("black", RgbaColor::BLACK),
    ("white", RgbaColor::WHITE),
    ("translucent_white", RgbaColor::TRANSLUCENT_WHITE),
    ("purple", RgbaColor::PURPLE),
    ("light_blue", RgbaColor::LIGHT_BLUE),
    ("blue", RgbaColor::BLUE),
    ("dark_blue", RgbaColor::DARK_BLUE),
    ("green", RgbaColor::GREEN),
    ("dark_green", RgbaColor::DARK_GREEN),
    ("yellow", RgbaColor::YELLOW),
    ("gold", RgbaColor::GOLD),
    ("orange", RgbaColor::ORANGE),
    ("red", RgbaColor::RED),
    ("dark_red", RgbaColor::DARK_RED),
    ("brown", RgbaColor::BROWN),
    ("pink", RgbaColor::PINK),
    ("gray", RgbaColor::GRAY),
    ("dark_gray", RgbaColor::DARK_GRAY),
];

impl RgbaColor {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSLUCENT_WHITE: Self = Self::new(1.0, 1.0, 1.0, 0.7);
    pub const PURPLE: Self = Self::new(0.5, 0.0, 0.5, 1.0);
    pub const LIGHT_BLUE: Self = Self::new(0.529, 0.808, 0.922, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const DARK_BLUE: Self = Self::new(0.0, 0.0, 0.54, 1.0);
    pub const GREEN: Self = Self::new(0.0, 0.5, 0.0, 1.0);
    pub const DARK_GREEN: Self = Self::new(0.0, 0.39, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);
    pub const GOLD: Self = Self::new(1.0, 0.84, 0.0, 1.0);
    pub const ORANGE: Self = Self::new(1.0, 0.647, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const DARK_RED: Self = Self::new(0.54, 0.0, 0.0, 1.0);
    pub const BROWN: Self = Self::new(0.54, 0.27, 0.1, 1.0);
    pub const PINK: Self = Self::new(1.0, 0.75, 0.79, 1.0);
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    pub const DARK_GRAY: Self = Self::new(0.66, 0.66, 0.66, 1.0);

    /// Creates a new color from red, green, blue and alpha values
    ///
    /// # Examples
    ///
    /// ```
    /// use plotkit_datatypes::primitives::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::new(0., 0., 0., 1.), RgbaColor::BLACK);
    /// assert_eq!(RgbaColor::new(1., 1., 1., 1.), RgbaColor::WHITE);
    /// assert_eq!(RgbaColor::new(0., 0., 0., 0.), RgbaColor::TRANSPARENT);
    /// ```
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Looks up a named color, ignoring ASCII case
    ///
    /// # Examples
    ///
    /// ```
    /// use plotkit_datatypes::primitives::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::from_name("Light_Blue"), Some(RgbaColor::LIGHT_BLUE));
    /// assert_eq!(RgbaColor::from_name("ultraviolet"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(color_name, _)| color_name.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
    }

    /// Draws all four channels uniformly from `[0, 1]` using `rng`.
    ///
    /// The channels are drawn in the order red, green, blue, alpha, so two
    /// generators in the same state produce the same color.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r = rng.random_range(0.0..=1.0);
        let g = rng.random_range(0.0..=1.0);
        let b = rng.random_range(0.0..=1.0);
        let a = rng.random_range(0.0..=1.0);

        Self::new(r, g, b, a)
    }

    /// Draws a random color from the thread-local, entropy-seeded generator.
    ///
    /// Use [`RgbaColor::random_with`] if the result must be reproducible.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// Returns this color with its alpha channel replaced by `alpha`
    ///
    /// # Examples
    ///
    /// ```
    /// use plotkit_datatypes::primitives::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::WHITE.with_alpha(0.7), RgbaColor::TRANSLUCENT_WHITE);
    /// ```
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Returns the color at the fractional distance `offset` between this color and `other`.
    ///
    /// An `offset` of 0 returns this color and an `offset` of 1 returns `other`.
    /// Offsets outside of `[0, 1]` extrapolate.
    ///
    /// # Examples
    ///
    /// ```
    /// use plotkit_datatypes::primitives::RgbaColor;
    ///
    /// assert_eq!(
    ///     RgbaColor::BLACK.linear_blend(RgbaColor::WHITE, 0.5),
    ///     RgbaColor::new(0.5, 0.5, 0.5, 1.0)
    /// );
    /// ```
    #[must_use]
    pub fn linear_blend(self, other: Self, offset: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * offset,
            g: self.g + (other.g - self.g) * offset,
            b: self.b + (other.b - self.b) * offset,
            a: self.a + (other.a - self.a) * offset,
        }
    }

    /// Quantizes the channels to bytes for renderers that expect 8 bit colors.
    ///
    /// Out-of-gamut channels are clamped, `NaN` becomes 0.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn quantize(channel: f32) -> u8 {
            if channel.is_nan() {
                return 0;
            }
            f32::round(channel.clamp(0., 1.) * 255.) as u8
        }

        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

impl From<[f32; 4]> for RgbaColor {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<RgbaColor> for [f32; 4] {
    fn from(color: RgbaColor) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

impl FromStr for RgbaColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).context(error::UnknownColorName { name: s })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // dyadic channels keep the blend arithmetic exact
    const A: RgbaColor = RgbaColor::new(0.125, 0.625, 0.875, 0.25);
    const B: RgbaColor = RgbaColor::new(0.75, 0.25, 0.5, 1.0);

    #[test]
    fn blend_bounds_are_exact() {
        assert_eq!(A.linear_blend(B, 0.), A);
        assert_eq!(A.linear_blend(B, 1.), B);
        assert_eq!(RgbaColor::RED.linear_blend(RgbaColor::BLUE, 0.), RgbaColor::RED);
        assert_eq!(RgbaColor::RED.linear_blend(RgbaColor::BLUE, 1.), RgbaColor::BLUE);
    }

    #[test]
    fn blend_is_linear_in_every_channel() {
        for t in [-1.5_f32, 0.25, 0.5, 0.75, 2.] {
            let blended = A.linear_blend(B, t);

            assert_eq!(blended.r, A.r + (B.r - A.r) * t);
            assert_eq!(blended.g, A.g + (B.g - A.g) * t);
            assert_eq!(blended.b, A.b + (B.b - A.b) * t);
            assert_eq!(blended.a, A.a + (B.a - A.a) * t);
        }
    }

    #[test]
    fn blend_extrapolates() {
        let blended = RgbaColor::BLACK.linear_blend(RgbaColor::WHITE, 2.);

        assert_eq!(blended, RgbaColor::new(2., 2., 2., 1.));
    }

    #[test]
    fn blend_propagates_nan() {
        let blended = A.linear_blend(B, f32::NAN);

        assert!(blended.r.is_nan());
        assert!(blended.a.is_nan());
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let original = A;
        let changed = original.with_alpha(0.42);

        assert_eq!(changed.r, A.r);
        assert_eq!(changed.g, A.g);
        assert_eq!(changed.b, A.b);
        assert_eq!(changed.a, 0.42);
        assert_eq!(original, A);
    }

    #[test]
    fn random_is_reproducible_with_seeded_generators() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                RgbaColor::random_with(&mut rng_a),
                RgbaColor::random_with(&mut rng_b)
            );
        }
    }

    #[test]
    fn random_channels_are_fractions() {
        let mut rng = StdRng::seed_from_u64(7);

        for color in std::iter::repeat_with(|| RgbaColor::random_with(&mut rng)).take(100) {
            for channel in <[f32; 4]>::from(color) {
                assert!((0. ..=1.).contains(&channel));
            }
        }

        let color = RgbaColor::random();
        assert!((0. ..=1.).contains(&color.a));
    }

    #[test]
    fn named_colors_round_trip() {
        assert_eq!(NAMED_COLORS.len(), 19);

        for (name, color) in &NAMED_COLORS {
            assert_eq!(RgbaColor::from_name(name), Some(*color), "{name}");
            assert_eq!(name.parse::<RgbaColor>().ok(), Some(*color), "{name}");
            assert_eq!(
                RgbaColor::from_name(&name.to_uppercase()),
                Some(*color),
                "{name}"
            );
        }
    }

    #[test]
    fn named_colors_have_reference_values() {
        assert_eq!(RgbaColor::TRANSPARENT, RgbaColor::new(0., 0., 0., 0.));
        assert_eq!(RgbaColor::RED, RgbaColor::new(1., 0., 0., 1.));
        assert_eq!(RgbaColor::LIGHT_BLUE, RgbaColor::new(0.529, 0.808, 0.922, 1.));
        assert_eq!(RgbaColor::ORANGE, RgbaColor::new(1., 0.647, 0., 1.));
        assert_eq!(RgbaColor::default(), RgbaColor::TRANSPARENT);
    }

    #[test]
    fn unknown_color_name() {
        let error = "ultraviolet".parse::<RgbaColor>().unwrap_err();

        assert!(matches!(error, Error::UnknownColorName { name } if name == "ultraviolet"));
    }

    #[test]
    fn quantize_to_bytes() {
        assert_eq!(RgbaColor::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(RgbaColor::GRAY.to_rgba8(), [128, 128, 128, 255]);
        assert_eq!(
            RgbaColor::new(-0.5, 1.5, f32::NAN, 0.).to_rgba8(),
            [0, 255, 0, 0]
        );
    }

    #[test]
    fn serialization() {
        let serialized = serde_json::to_string(&RgbaColor::new(0.5, 0.25, 1., 0.)).unwrap();
        assert_eq!(serialized, "[0.5,0.25,1.0,0.0]");

        let deserialized: RgbaColor = serde_json::from_str("[1.0,0.0,0.0,1.0]").unwrap();
        assert_eq!(deserialized, RgbaColor::RED);
    }
}
