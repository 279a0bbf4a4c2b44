use std::time::Duration;

use gpui::{AbsoluteLength, DefiniteLength, Pixels, Rgba, SharedString, px, rems};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

use crate::theme::{ThemeError, ThemeMode, ThemeVariant};

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    match StringOrVec::deserialize(deserializer)? {
        StringOrVec::One(string) => Ok(SmallVec::from_buf([string])),
        StringOrVec::Many(vec) if vec.is_empty() => Err(D::Error::custom("list can't be empty.")),
        StringOrVec::Many(vec) => Ok(vec),
    }
}

/// Both modes must be present exactly once.
pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let variants = SmallVec::<[ThemeVariant; 2]>::deserialize(deserializer)?;

    for mode in ThemeMode::ALL {
        match variants.iter().filter(|variant| variant.kind == mode).count() {
            0 => return Err(D::Error::custom(ThemeError::MissingVariant(mode))),
            1 => {}
            _ => return Err(D::Error::custom(ThemeError::DuplicateVariant(mode))),
        }
    }

    Ok(variants)
}

pub fn de_non_empty_colors<'de, D>(deserializer: D) -> Result<SmallVec<[Rgba; 10]>, D::Error>
where
    D: Deserializer<'de>,
{
    let colors = SmallVec::<[Rgba; 10]>::deserialize(deserializer)?;

    if colors.is_empty() {
        return Err(D::Error::custom("at least one color needs to be provided."));
    }

    Ok(colors)
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    parse_pixels(StringOrFloat::deserialize(deserializer)?).map_err(D::Error::custom)
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: Deserializer<'de>,
{
    parse_abs_length(StringOrFloat::deserialize(deserializer)?).map_err(D::Error::custom)
}

pub fn de_def_length<'de, D>(deserializer: D) -> Result<DefiniteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::String(string) => {
            if let Some(value) = string.strip_suffix('%')
                && let Ok(value) = value.parse::<f32>()
            {
                return Ok(DefiniteLength::Fraction(value / 100.));
            }

            parse_abs_length(StringOrFloat::String(string))
                .map(DefiniteLength::Absolute)
                .map_err(D::Error::custom)
        }
        float => parse_abs_length(float)
            .map(DefiniteLength::Absolute)
            .map_err(D::Error::custom),
    }
}

/// Accepts `"300ms"`, `"0.5s"` or a number of milliseconds. Zero is rejected,
/// animations divide their elapsed time by it.
pub fn de_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let duration = match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(millis) if millis >= 0. => duration_from_secs(millis as f64 / 1000.),
        StringOrFloat::String(string) => parse_duration(&string).ok_or_else(|| {
            D::Error::custom("expected a duration ending with 'ms' or 's'")
        })?,
        StringOrFloat::Float(_) => return Err(D::Error::custom("duration can't be negative")),
    };

    if duration.is_zero() {
        return Err(D::Error::custom("duration must be longer than zero"));
    }

    Ok(duration)
}

pub fn de_pixels_map<'de, D>(deserializer: D) -> Result<IndexMap<SharedString, Pixels>, D::Error>
where
    D: Deserializer<'de>,
{
    IndexMap::<SharedString, StringOrFloat>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, value)| {
            parse_pixels(value)
                .map(|pixels| (name.clone(), pixels))
                .map_err(|err| D::Error::custom(format!("{name}: {err}")))
        })
        .collect()
}

pub fn de_length_map<'de, D>(
    deserializer: D,
) -> Result<IndexMap<SharedString, AbsoluteLength>, D::Error>
where
    D: Deserializer<'de>,
{
    IndexMap::<SharedString, StringOrFloat>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, value)| {
            parse_abs_length(value)
                .map(|length| (name.clone(), length))
                .map_err(|err| D::Error::custom(format!("{name}: {err}")))
        })
        .collect()
}

fn parse_duration(string: &str) -> Option<Duration> {
    let string = string.trim();

    let seconds = if let Some(millis) = string.strip_suffix("ms") {
        millis.trim().parse::<f64>().ok()? / 1000.
    } else {
        string.strip_suffix('s')?.trim().parse::<f64>().ok()?
    };

    (seconds >= 0.).then(|| duration_from_secs(seconds))
}

// Rounded to the nanosecond so "0.3s" is exactly 300ms.
fn duration_from_secs(seconds: f64) -> Duration {
    Duration::from_nanos((seconds * 1_000_000_000.).round() as u64)
}

fn parse_pixels(value: StringOrFloat) -> Result<Pixels, &'static str> {
    match value {
        StringOrFloat::Float(pixels) => Ok(px(pixels)),
        StringOrFloat::String(string) => string
            .strip_suffix("px")
            .ok_or("expected string to end with 'px'")?
            .parse::<f32>()
            .map(px)
            .map_err(|_| "could not convert string into pixels"),
    }
}

fn parse_abs_length(value: StringOrFloat) -> Result<AbsoluteLength, &'static str> {
    const EXPECTED: &str = "expected f32 or string containing a f32 ending with 'rem' or 'px'";

    match value {
        StringOrFloat::Float(num) => Ok(AbsoluteLength::Pixels(px(num))),
        StringOrFloat::String(string) => {
            if let Some(value) = string.strip_suffix("rem")
                && let Ok(value) = value.parse::<f32>()
            {
                Ok(AbsoluteLength::Rems(rems(value)))
            } else if let Some(value) = string.strip_suffix("px")
                && let Ok(value) = value.parse::<f32>()
            {
                Ok(AbsoluteLength::Pixels(px(value)))
            } else if string == "0" {
                Ok(AbsoluteLength::Pixels(px(0.)))
            } else {
                Err(EXPECTED)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}
