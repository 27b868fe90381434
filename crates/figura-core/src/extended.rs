//! Sentinel-prefixed string encoding for the four extended value types.
//!
//! | Type        | Encoded form              |
//! |-------------|---------------------------|
//! | `Point`     | `$p$x,y`                  |
//! | `PointList` | `$P$x1,y1\|x2,y2\|...`    |
//! | `Color`     | `$C$#aarrggbb`            |
//! | `Thickness` | `$T$left,top,right,bottom`|
//!
//! Any string of the shape `$?$...` is treated as a sentinel on decode, whether or not
//! this encoder produced it. Ordinary strings cannot collide because the JSON escaper
//! rewrites every literal `$` to `{$`.

use crate::error::{CodecError, Result};
use crate::escape::unescape_dollars;
use crate::value::{Color, Point, Thickness, Value};
use std::str::FromStr;

pub const POINT_TAG: char = 'p';
pub const POINT_LIST_TAG: char = 'P';
pub const COLOR_TAG: char = 'C';
pub const THICKNESS_TAG: char = 'T';

/// Sentinel string for an extended variant, or `None` for every other variant.
pub fn encode_extended(value: &Value) -> Option<String> {
    match value {
        Value::Point(p) => Some(encode_point(p)),
        Value::PointList(points) => Some(encode_point_list(points)),
        Value::Color(c) => Some(encode_color(c)),
        Value::Thickness(t) => Some(encode_thickness(t)),
        _ => None,
    }
}

pub fn encode_point(p: &Point) -> String {
    format!("${POINT_TAG}${p}")
}

pub fn encode_point_list(points: &[Point]) -> String {
    let joined = points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join("|");
    format!("${POINT_LIST_TAG}${joined}")
}

pub fn encode_color(c: &Color) -> String {
    format!("${COLOR_TAG}${c}")
}

pub fn encode_thickness(t: &Thickness) -> String {
    format!("${THICKNESS_TAG}${t}")
}

/// Rehydrate a decoded JSON string scalar.
///
/// A string is a sentinel only if it is at least three characters long with `$` at
/// positions 0 and 2. The tag at position 1 selects the type; an unknown tag leaves
/// the string untouched. Non-sentinel strings have their `{$` escapes undone.
pub fn decode_string(s: &str) -> Result<Value> {
    let mut chars = s.chars();
    let (Some('$'), Some(tag), Some('$')) = (chars.next(), chars.next(), chars.next()) else {
        return Ok(Value::String(unescape_dollars(s)));
    };
    let payload = chars.as_str();
    match tag {
        POINT_TAG => Ok(Value::Point(payload.parse()?)),
        POINT_LIST_TAG => Ok(Value::PointList(parse_point_list(payload)?)),
        COLOR_TAG => Ok(Value::Color(payload.parse()?)),
        THICKNESS_TAG => Ok(Value::Thickness(payload.parse()?)),
        _ => Ok(Value::String(s.to_string())),
    }
}

/// Parse a point list payload. `|` separators are read as spaces, so both
/// `1,2|3,4` and `1,2 3,4` are accepted.
pub fn parse_point_list(payload: &str) -> Result<Vec<Point>> {
    payload
        .replace('|', " ")
        .split_whitespace()
        .map(Point::from_str)
        .collect()
}

/// `x,y` with optional surrounding whitespace on each coordinate.
impl FromStr for Point {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').collect();
        let [x, y] = fields.as_slice() else {
            return Err(CodecError::malformed(s, "point"));
        };
        Ok(Point::new(parse_field(x, "point")?, parse_field(y, "point")?))
    }
}

/// Exactly four comma-separated floats.
impl FromStr for Thickness {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').collect();
        let [left, top, right, bottom] = fields.as_slice() else {
            return Err(CodecError::malformed(s, "thickness"));
        };
        Ok(Thickness::new(
            parse_field(left, "thickness")?,
            parse_field(top, "thickness")?,
            parse_field(right, "thickness")?,
            parse_field(bottom, "thickness")?,
        ))
    }
}

fn parse_field<T: FromStr>(field: &str, context: &'static str) -> Result<T> {
    field
        .trim()
        .parse()
        .map_err(|_| CodecError::malformed(field, context))
}

/// Hex forms `#rgb`, `#argb`, `#rrggbb`, `#aarrggbb`, or a known color name
/// (case-insensitive).
impl FromStr for Color {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let invalid = || CodecError::InvalidColor(s.to_string());
        let Some(hex) = token.strip_prefix('#') else {
            return named_color(token).ok_or_else(invalid);
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digits: Vec<u8> = hex
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        let pair = |hi: u8, lo: u8| (hi << 4) | lo;
        let color = match digits.as_slice() {
            &[r, g, b] => Color::from_rgb(pair(r, r), pair(g, g), pair(b, b)),
            &[a, r, g, b] => Color::from_argb(pair(a, a), pair(r, r), pair(g, g), pair(b, b)),
            &[r1, r2, g1, g2, b1, b2] => Color::from_rgb(pair(r1, r2), pair(g1, g2), pair(b1, b2)),
            &[a1, a2, r1, r2, g1, g2, b1, b2] => Color::from_argb(
                pair(a1, a2),
                pair(r1, r2),
                pair(g1, g2),
                pair(b1, b2),
            ),
            _ => return Err(invalid()),
        };
        Ok(color)
    }
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("transparent", 0x00ff_ffff),
    ("black", 0xff00_0000),
    ("white", 0xffff_ffff),
    ("red", 0xffff_0000),
    ("lime", 0xff00_ff00),
    ("green", 0xff00_8000),
    ("blue", 0xff00_00ff),
    ("yellow", 0xffff_ff00),
    ("cyan", 0xff00_ffff),
    ("aqua", 0xff00_ffff),
    ("magenta", 0xffff_00ff),
    ("fuchsia", 0xffff_00ff),
    ("gray", 0xff80_8080),
    ("grey", 0xff80_8080),
    ("silver", 0xffc0_c0c0),
    ("maroon", 0xff80_0000),
    ("olive", 0xff80_8000),
    ("navy", 0xff00_0080),
    ("purple", 0xff80_0080),
    ("teal", 0xff00_8080),
    ("orange", 0xffff_a500),
    ("pink", 0xffff_c0cb),
    ("brown", 0xffa5_2a2a),
    ("gold", 0xffff_d700),
];

fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, argb)| {
            let [a, r, g, b] = argb.to_be_bytes();
            Color::from_argb(a, r, g, b)
        })
}
