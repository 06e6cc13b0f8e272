use crate::Color;

/// Hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

pub(crate) fn hsl_to_rgb(value: Hsl) -> Color {
    let hue = f64::from(value.hue).rem_euclid(360.0);
    let saturation = f64::from(value.saturation).clamp(0.0, 1.0);
    let lightness = f64::from(value.lightness).clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };
    let offset = lightness - chroma / 2.0;

    Color::new(
        (r + offset) as f32,
        (g + offset) as f32,
        (b + offset) as f32,
        value.alpha,
    )
}

pub(crate) fn rgb_to_hsl(color: Color) -> Hsl {
    let r = f64::from(color.r);
    let g = f64::from(color.g);
    let b = f64::from(color.b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness: lightness as f32,
            alpha: color.a,
        };
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
    let hue = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsl {
        hue: hue as f32,
        saturation: saturation as f32,
        lightness: lightness as f32,
        alpha: color.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn primary_hues_convert_exactly() {
        for (hue, expected) in [
            (0.0, Color::rgb(1.0, 0.0, 0.0)),
            (120.0, Color::rgb(0.0, 1.0, 0.0)),
            (240.0, Color::rgb(0.0, 0.0, 1.0)),
            (360.0, Color::rgb(1.0, 0.0, 0.0)),
        ] {
            let color = hsl_to_rgb(Hsl {
                hue,
                saturation: 1.0,
                lightness: 0.5,
                alpha: 1.0,
            });
            assert_eq!(color, expected, "hue {hue}");
        }
    }

    #[test]
    fn rgb_to_hsl_inverts_conversion() {
        let source = Hsl {
            hue: 210.0,
            saturation: 0.5,
            lightness: 0.4,
            alpha: 0.75,
        };
        let back = rgb_to_hsl(hsl_to_rgb(source));
        assert!(close(back.hue, 210.0));
        assert!(close(back.saturation, 0.5));
        assert!(close(back.lightness, 0.4));
        assert_eq!(back.alpha, 0.75);
    }

    #[test]
    fn greys_have_zero_saturation() {
        let hsl = rgb_to_hsl(Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(hsl.saturation, 0.0);
        assert_eq!(hsl.hue, 0.0);
    }
}
