use crate::hsl::{hsl_to_rgb, Hsl};
use crate::{Color, ColorError};

/// Strictly parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`,
/// `hsl()` and `hsla()` strings.
pub fn parse_color(input: &str) -> Result<Color, ColorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(digits) = trimmed.strip_prefix('#') {
        return parse_hex(digits).ok_or_else(|| ColorError::InvalidHex(trimmed.to_string()));
    }

    let normalized = trimmed.to_ascii_lowercase();
    if let Some(args) = function_args(&normalized, "rgba").or_else(|| function_args(&normalized, "rgb")) {
        return parse_rgb_args(args).ok_or_else(|| ColorError::InvalidFunction {
            function: "rgb",
            input: trimmed.to_string(),
        });
    }

    if let Some(args) = function_args(&normalized, "hsla").or_else(|| function_args(&normalized, "hsl")) {
        return parse_hsl_args(args).ok_or_else(|| ColorError::InvalidFunction {
            function: "hsl",
            input: trimmed.to_string(),
        });
    }

    Err(ColorError::Unrecognised(trimmed.to_string()))
}

fn parse_hex(digits: &str) -> Option<Color> {
    if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|ch| [ch, ch]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let mut bytes = [255u8; 4];
    for (index, slot) in bytes.iter_mut().enumerate().take(expanded.len() / 2) {
        *slot = u8::from_str_radix(&expanded[index * 2..index * 2 + 2], 16).ok()?;
    }
    let [r, g, b, a] = bytes;
    Some(Color::rgba8(r, g, b, a))
}

fn function_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .trim_end()
        .strip_suffix(')')
}

fn split_args(args: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if (3..=4).contains(&parts.len()) && parts.iter().all(|part| !part.is_empty()) {
        Some(parts)
    } else {
        None
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts = split_args(args)?;
    let r = parts[0].parse::<f64>().ok()?;
    let g = parts[1].parse::<f64>().ok()?;
    let b = parts[2].parse::<f64>().ok()?;
    let alpha = parse_alpha(parts.get(3).copied())?;
    Some(Color::new(
        (r / 255.0) as f32,
        (g / 255.0) as f32,
        (b / 255.0) as f32,
        alpha,
    ))
}

fn parse_hsl_args(args: &str) -> Option<Color> {
    let parts = split_args(args)?;
    let hue = parts[0].strip_suffix("deg").unwrap_or(parts[0]).trim();
    let hue = hue.parse::<f64>().ok()?;
    let saturation = parse_percentage(parts[1])?;
    let lightness = parse_percentage(parts[2])?;
    let alpha = parse_alpha(parts.get(3).copied())?;
    Some(hsl_to_rgb(Hsl {
        hue: hue as f32,
        saturation: saturation as f32,
        lightness: lightness as f32,
        alpha,
    }))
}

fn parse_percentage(raw: &str) -> Option<f64> {
    let value = raw.strip_suffix('%').unwrap_or(raw).trim();
    value.parse::<f64>().ok().map(|percent| percent / 100.0)
}

fn parse_alpha(raw: Option<&str>) -> Option<f32> {
    match raw {
        None => Some(1.0),
        Some(value) => value.parse::<f32>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_lengths() {
        assert_eq!(parse_color("#f00").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(parse_color("#ff0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(parse_color("#FF0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        let with_alpha = parse_color("#ff0000cc").unwrap();
        assert!((with_alpha.a - 0.8).abs() < 1e-6);
        let short_alpha = parse_color("#f008").unwrap();
        assert_eq!(short_alpha.a, (f64::from(0x88u8) / 255.0) as f32);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(parse_color("#ff00"), Ok(_)));
        assert!(matches!(parse_color("#ff000"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(parse_color("#gg0000"), Err(ColorError::InvalidHex(_))));
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(
            parse_color("rgb( 255 , 0 , 0 )").unwrap(),
            Color::rgb(1.0, 0.0, 0.0)
        );
        assert_eq!(
            parse_color("RGBA(255, 0, 0, 0.5)").unwrap(),
            Color::new(1.0, 0.0, 0.0, 0.5)
        );
        assert_eq!(
            parse_color("rgb(127, 127, 127)").unwrap(),
            Color::rgb(
                (127.0_f64 / 255.0) as f32,
                (127.0_f64 / 255.0) as f32,
                (127.0_f64 / 255.0) as f32
            )
        );
        assert_eq!(
            parse_color("hsla(0, 100%, 50%, 0.5)").unwrap(),
            Color::new(1.0, 0.0, 0.0, 0.5)
        );
        assert_eq!(
            parse_color("hsl(120deg, 100%, 50%)").unwrap(),
            Color::rgb(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn rejects_malformed_functions() {
        assert!(matches!(
            parse_color("rgb(255, 0)"),
            Err(ColorError::InvalidFunction { function: "rgb", .. })
        ));
        assert!(matches!(
            parse_color("hsl(a, b, c)"),
            Err(ColorError::InvalidFunction { function: "hsl", .. })
        ));
        assert!(matches!(parse_color("   "), Err(ColorError::Empty)));
        assert!(matches!(
            parse_color("tomato"),
            Err(ColorError::Unrecognised(_))
        ));
    }
}
