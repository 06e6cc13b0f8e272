use colors::{normalize_color, parse_color, Color};
use uniforms::{ParamDef, ParamType, ParamValue};

/// Why a single URL value could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot read '{raw}' as {expected}")]
pub struct ValueError {
    pub raw: String,
    pub expected: &'static str,
}

/// Text form of `value` as it appears after `key=`.
pub fn encode_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Bool(flag) => flag.to_string(),
        ParamValue::Number(number) => format_number(*number),
        ParamValue::Numbers(numbers) => join(numbers.iter().map(|n| format_number(*n))),
        ParamValue::Text(text) | ParamValue::Choice(text) => urlencoding::encode(text).into_owned(),
        ParamValue::Color(color) => format_color(*color),
        ParamValue::Colors(colors) => join(colors.iter().map(|c| format_color(*c))),
    }
}

/// Reads the already percent-decoded `raw` according to `def`.
pub fn decode_value(def: &ParamDef, raw: &str) -> Result<ParamValue, ValueError> {
    let fail = || ValueError {
        raw: raw.to_string(),
        expected: def.kind.describe(),
    };
    let trimmed = raw.trim();

    match def.kind {
        ParamType::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(ParamValue::Bool(true)),
            "false" | "0" => Ok(ParamValue::Bool(false)),
            _ => Err(fail()),
        },
        ParamType::Number => parse_number(trimmed).map(ParamValue::Number).ok_or_else(fail),
        ParamType::Numbers => split_list(trimmed)
            .map(parse_number)
            .collect::<Option<Vec<_>>>()
            .filter(|numbers| !numbers.is_empty())
            .map(ParamValue::Numbers)
            .ok_or_else(fail),
        ParamType::Text => Ok(ParamValue::Text(raw.to_string())),
        ParamType::Color => parse_link_color(trimmed).map(ParamValue::Color).ok_or_else(fail),
        ParamType::Colors => split_list(trimmed)
            .map(parse_link_color)
            .collect::<Option<Vec<_>>>()
            .filter(|colors| !colors.is_empty())
            .filter(|colors| def.max_items.map_or(true, |max| colors.len() <= max))
            .map(ParamValue::Colors)
            .ok_or_else(fail),
        ParamType::Choice(options) => options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(trimmed))
            .map(|option| ParamValue::Choice((*option).to_string()))
            .ok_or_else(fail),
    }
}

/// Up to four decimals with trailing zeros removed; whole numbers print
/// without a decimal point.
pub fn format_number(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `rrggbb` or `rrggbbaa` without the leading `#` when 8 bits per channel
/// hold the color exactly, otherwise the percent-encoded `rgba()` form.
fn format_color(color: Color) -> String {
    let hex = color.to_hex();
    if normalize_color(hex.as_str()) == color {
        hex.trim_start_matches('#').to_string()
    } else {
        urlencoding::encode(&color.to_css()).into_owned()
    }
}

fn parse_number(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|n| n.is_finite())
}

/// Hex digits with or without `#`; full CSS forms are accepted too so
/// hand-edited links keep working.
fn parse_link_color(raw: &str) -> Option<Color> {
    let raw = raw.trim();
    if raw.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return parse_color(&format!("#{raw}")).ok();
    }
    parse_color(raw).ok()
}

/// Splits on commas outside parentheses so `rgba(...)` items stay whole.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in raw.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&raw[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&raw[start..]);
    items.into_iter().filter(|item| !item.trim().is_empty())
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ParamDef = ParamDef::number("size", "", 0.0, 10.0);
    const BACK: ParamDef = ParamDef::color("colorBack", "");

    #[test]
    fn numbers_are_compact() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-270.0), "-270");
        assert_eq!(format_number(0.45), "0.45");
        assert_eq!(format_number(1.35), "1.35");
        assert_eq!(format_number(-0.3), "-0.3");
        assert_eq!(format_number(0.123456), "0.1235");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn colors_drop_the_hash() {
        assert_eq!(encode_value(&ParamValue::Color(Color::rgba8(0x12, 0xab, 0xff, 0xff))), "12abff");
        assert_eq!(encode_value(&ParamValue::Color(Color::TRANSPARENT)), "00000000");
        assert_eq!(
            decode_value(&BACK, "12ABFF"),
            Ok(ParamValue::Color(Color::rgba8(0x12, 0xab, 0xff, 0xff)))
        );
        assert_eq!(
            decode_value(&BACK, "#fff"),
            Ok(ParamValue::Color(Color::rgb(1.0, 1.0, 1.0)))
        );
        assert_eq!(
            decode_value(&BACK, "rgba(255, 0, 0, 0.5)"),
            Ok(ParamValue::Color(Color::new(1.0, 0.0, 0.0, 0.5)))
        );
        assert!(decode_value(&BACK, "zzzzzz").is_err());
    }

    #[test]
    fn lists_are_comma_joined() {
        let colors = ParamDef::new("colors", ParamType::Colors, "");
        let value = ParamValue::Colors(vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)]);
        assert_eq!(encode_value(&value), "ff0000,0000ff");
        assert_eq!(decode_value(&colors, "ff0000,0000ff"), Ok(value));
        assert!(decode_value(&colors, "").is_err());
        assert!(decode_value(&colors, "ff0000,nope").is_err());

        let numbers = ParamDef::new("stops", ParamType::Numbers, "");
        let value = ParamValue::Numbers(vec![0.0, 0.5, 1.0]);
        assert_eq!(encode_value(&value), "0,0.5,1");
        assert_eq!(decode_value(&numbers, "0,0.5,1"), Ok(value));
    }

    #[test]
    fn translucent_and_fractional_colors_stay_exact() {
        let half = Color::new(1.0, 0.0, 0.0, 0.5);
        let encoded = encode_value(&ParamValue::Color(half));
        assert!(!encoded.contains(&['(', ',', ' '][..]), "{encoded}");
        let decoded = urlencoding::decode(&encoded).unwrap();
        assert_eq!(decode_value(&BACK, &decoded), Ok(ParamValue::Color(half)));

        let hsl = normalize_color("hsl(200, 37%, 41%)");
        let decoded = urlencoding::decode(&format_color(hsl)).unwrap().into_owned();
        assert_eq!(decode_value(&BACK, &decoded), Ok(ParamValue::Color(hsl)));
    }

    #[test]
    fn css_items_survive_list_splitting() {
        let colors = ParamDef::colors("colors", "", 10);
        let items: Vec<_> = split_list("ff0000,rgba(1, 2, 3, 0.5),,00ff00").collect();
        assert_eq!(items, ["ff0000", "rgba(1, 2, 3, 0.5)", "00ff00"]);
        assert_eq!(
            decode_value(&colors, "ff0000,rgba(0, 0, 255, 0.5)"),
            Ok(ParamValue::Colors(vec![
                Color::rgb(1.0, 0.0, 0.0),
                Color::new(0.0, 0.0, 1.0, 0.5)
            ]))
        );
    }

    #[test]
    fn color_lists_respect_capacity() {
        let colors = ParamDef::colors("colors", "", 2);
        assert!(decode_value(&colors, "ff0000,00ff00").is_ok());
        assert!(decode_value(&colors, "ff0000,00ff00,0000ff").is_err());
        assert!(decode_value(&colors, ",").is_err());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(decode_value(&SIZE, "NaN").is_err());
        assert!(decode_value(&SIZE, "inf").is_err());
        assert!(decode_value(&SIZE, "abc").is_err());
        assert_eq!(decode_value(&SIZE, " 3.5 "), Ok(ParamValue::Number(3.5)));
    }

    #[test]
    fn text_and_choices() {
        let label = ParamDef::new("label", ParamType::Text, "");
        assert_eq!(
            encode_value(&ParamValue::Text("a b&c".into())),
            "a%20b%26c"
        );
        assert_eq!(decode_value(&label, "a b&c"), Ok(ParamValue::Text("a b&c".into())));

        let shape = ParamDef::new("shape", ParamType::Choice(&["checks", "stripes"]), "");
        assert_eq!(decode_value(&shape, "Stripes"), Ok(ParamValue::Choice("stripes".into())));
        assert!(decode_value(&shape, "dots").is_err());
    }
}
