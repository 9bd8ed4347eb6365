//! This module handles colours.

/// An RGB colour.
pub type RGBArray = [u8; 3];

/// An RGB colour with components in `[0, 1]`.
pub type RGBFloat = [f32; 3];

/// Build an [`RGBArray`] from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> RGBArray {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// Convert an [`RGBArray`] into an [`RGBFloat`].
pub fn to_float([r, g, b]: RGBArray) -> RGBFloat {
    [r as f32 / 255., g as f32 / 255., b as f32 / 255.]
}

/// Convert a colour given as hue, saturation and lightness (all in `[0, 1]`) into RGB.
///
/// The hue wraps around, so `1.1` is the same as `0.1`. Saturation and lightness are clamped.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> RGBFloat {
    let h = hue.rem_euclid(1.);
    let s = saturation.clamp(0., 1.);
    let l = lightness.clamp(0., 1.);

    if s == 0. {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1. + s) } else { l + s - l * s };
    let p = 2. * l - q;

    [
        hue_to_channel(p, q, h + 1. / 3.),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1. / 3.),
    ]
}

/// Compute one RGB channel from the HSL intermediates.
fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0. {
        t += 1.;
    }
    if t > 1. {
        t -= 1.;
    }

    if t < 1. / 6. {
        p + (q - p) * 6. * t
    } else if t < 0.5 {
        q
    } else if t < 2. / 3. {
        p + (q - p) * 6. * (2. / 3. - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn assert_colour_eq(actual: RGBFloat, expected: RGBFloat) {
        for (a, e) in actual.into_iter().zip(expected) {
            assert!(
                approx_eq!(f32, a, e, epsilon = 1e-5),
                "{actual:?} != {expected:?}"
            );
        }
    }

    #[test]
    fn rgb_test() {
        assert_eq!(rgb(0x8B4513), [0x8B, 0x45, 0x13]);
        assert_eq!(rgb(0xFFD700), [255, 215, 0]);
        assert_eq!(to_float(rgb(0xFF0000)), [1., 0., 0.]);
    }

    #[test]
    fn hsl_to_rgb_test() {
        assert_colour_eq(hsl_to_rgb(0., 1., 0.5), [1., 0., 0.]);
        assert_colour_eq(hsl_to_rgb(1. / 3., 1., 0.5), [0., 1., 0.]);
        assert_colour_eq(hsl_to_rgb(2. / 3., 1., 0.5), [0., 0., 1.]);
        assert_colour_eq(hsl_to_rgb(0.25, 0., 0.7), [0.7, 0.7, 0.7]);
        assert_colour_eq(hsl_to_rgb(1., 1., 0.5), hsl_to_rgb(0., 1., 0.5));
        assert_colour_eq(hsl_to_rgb(0.5, 1., 1.), [1., 1., 1.]);
    }
}
