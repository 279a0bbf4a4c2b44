use std::{fmt, str::FromStr, time::Duration};

use gpui::{Animation, Pixels, SharedString, px};
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use smallvec::SmallVec;

use super::deserializers::de_duration;

/// A timing function, written the way CSS writes them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        Some(match *self {
            Easing::Linear => return None,
            Easing::Ease => (0.25, 0.1, 0.25, 1.),
            Easing::EaseIn => (0.42, 0., 1., 1.),
            Easing::EaseOut => (0., 0., 0.58, 1.),
            Easing::EaseInOut => (0.42, 0., 0.58, 1.),
            Easing::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        })
    }

    /// Maps linear progress in `0..=1` to eased progress.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0., 1.);

        match self.control_points() {
            None => t,
            Some(_) if t == 0. || t == 1. => t,
            Some((x1, y1, x2, y2)) => bezier(y1, y2, solve_bezier_x(x1, x2, t)),
        }
    }
}

fn bezier(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1. - s;
    3. * inv * inv * s * p1 + 3. * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1. - s;
    3. * inv * inv * p1 + 6. * inv * s * (p2 - p1) + 3. * s * s * (1. - p2)
}

/// Finds the curve parameter whose x coordinate is `x`.
fn solve_bezier_x(x1: f32, x2: f32, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut s = x;
    for _ in 0..8 {
        let error = bezier(x1, x2, s) - x;
        if error.abs() < EPSILON {
            return s;
        }

        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < EPSILON {
            break;
        }

        s -= error / slope;
    }

    // Newton's method stalled, fall back to bisection.
    let (mut low, mut high) = (0f32, 1f32);
    s = x;
    while high - low > EPSILON {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }

        if value < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.;
    }

    s
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Ok(match s {
            "linear" => Easing::Linear,
            "ease" => Easing::Ease,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            _ => {
                let invalid = || format!("\"{s}\" is not a known easing function.");

                let args = s
                    .strip_prefix("cubic-bezier(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(invalid)?
                    .split(',')
                    .map(|arg| arg.trim().parse::<f32>())
                    .collect::<Result<SmallVec<[f32; 4]>, _>>()
                    .map_err(|_| invalid())?;

                let &[x1, y1, x2, y2] = &args[..] else {
                    return Err(invalid());
                };

                if !(0. ..=1.).contains(&x1) || !(0. ..=1.).contains(&x2) {
                    return Err(format!("cubic-bezier x values must be within 0 and 1 in \"{s}\"."));
                }

                Easing::CubicBezier(x1, y1, x2, y2)
            }
        })
    }
}

impl TryFrom<String> for Easing {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(value: Easing) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Ease => f.write_str("ease"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    /// Plays once and holds the final frame.
    #[default]
    Once,
    Infinite,
}

/// A named animation: which keyframes to play, for how long and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationToken {
    pub keyframes: SharedString,
    #[serde(deserialize_with = "de_duration")]
    pub duration: Duration,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub repeat: Repeat,
}

impl AnimationToken {
    pub fn to_animation(&self) -> Animation {
        let easing = self.easing;
        let animation = Animation::new(self.duration).with_easing(move |t| easing.apply(t));

        match self.repeat {
            Repeat::Once => animation,
            Repeat::Infinite => animation.repeat(),
        }
    }
}

/// A translation made of a part relative to the element's own size and a
/// fixed part, like `calc(100% + 4px)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub relative: f32,
    pub pixels: Pixels,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        relative: 0.,
        pixels: Pixels::ZERO,
    };

    /// The offset in pixels for an element of `size`.
    pub fn resolve(&self, size: Pixels) -> Pixels {
        size * self.relative + self.pixels
    }

    fn lerp(self, to: Offset, t: f32) -> Offset {
        Offset {
            relative: lerp(self.relative, to.relative, t),
            pixels: px(lerp(f32::from(self.pixels), f32::from(to.pixels), t)),
        }
    }
}

impl FromStr for Offset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(percent) = s.strip_suffix('%')
            && let Ok(percent) = percent.parse::<f32>()
        {
            Ok(Offset {
                relative: percent / 100.,
                pixels: Pixels::ZERO,
            })
        } else if let Some(pixels) = s.strip_suffix("px")
            && let Ok(pixels) = pixels.parse::<f32>()
        {
            Ok(Offset {
                relative: 0.,
                pixels: px(pixels),
            })
        } else if s == "0" {
            Ok(Offset::ZERO)
        } else {
            Err(format!("expected an offset ending with '%' or 'px', found \"{s}\"."))
        }
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

impl Serialize for Offset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let string = match (self.relative, f32::from(self.pixels)) {
            (relative, pixels) if pixels == 0. && relative != 0. => format!("{}%", relative * 100.),
            (_, pixels) => format!("{pixels}px"),
        };
        serializer.serialize_str(&string)
    }
}

fn de_percent<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let string = String::deserialize(deserializer)?;
    match string.strip_suffix('%').map(str::parse::<f32>) {
        Some(Ok(percent)) if (0. ..=100.).contains(&percent) => Ok(percent / 100.),
        _ => Err(D::Error::custom(format!(
            "expected a percentage between 0% and 100%, found \"{string}\"."
        ))),
    }
}

/// One stop of a keyframe track. Properties left out are interpolated from
/// the neighbouring stops that define them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the track, from 0 to 1.
    #[serde(deserialize_with = "de_percent")]
    pub at: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<Offset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<Offset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
}

/// The state of an animated element at some point of a [`KeyframeTrack`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeSample {
    pub opacity: f32,
    pub translate_x: Offset,
    pub translate_y: Offset,
    pub scale: f32,
    pub rotate: f32,
}

impl Default for KeyframeSample {
    fn default() -> Self {
        Self {
            opacity: 1.,
            translate_x: Offset::ZERO,
            translate_y: Offset::ZERO,
            scale: 1.,
            rotate: 0.,
        }
    }
}

/// Keyframe stops ordered by position. Never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeTrack {
    stops: SmallVec<[Keyframe; 2]>,
}

impl TryFrom<Vec<Keyframe>> for KeyframeTrack {
    type Error = &'static str;

    fn try_from(stops: Vec<Keyframe>) -> Result<Self, Self::Error> {
        if stops.is_empty() {
            return Err("keyframes need at least one stop.");
        }

        if stops.windows(2).any(|pair| pair[0].at >= pair[1].at) {
            return Err("keyframe stops need to be in ascending order.");
        }

        Ok(Self {
            stops: SmallVec::from_vec(stops),
        })
    }
}

impl From<KeyframeTrack> for Vec<Keyframe> {
    fn from(track: KeyframeTrack) -> Self {
        track.stops.into_vec()
    }
}

impl KeyframeTrack {
    pub fn stops(&self) -> &[Keyframe] {
        &self.stops
    }

    /// Interpolates every property at `delta` (0 to 1) through the track.
    pub fn sample(&self, delta: f32) -> KeyframeSample {
        let delta = delta.clamp(0., 1.);
        let defaults = KeyframeSample::default();

        KeyframeSample {
            opacity: self
                .sample_property(delta, |stop| stop.opacity, lerp)
                .unwrap_or(defaults.opacity),
            translate_x: self
                .sample_property(delta, |stop| stop.translate_x, Offset::lerp)
                .unwrap_or(defaults.translate_x),
            translate_y: self
                .sample_property(delta, |stop| stop.translate_y, Offset::lerp)
                .unwrap_or(defaults.translate_y),
            scale: self
                .sample_property(delta, |stop| stop.scale, lerp)
                .unwrap_or(defaults.scale),
            rotate: self
                .sample_property(delta, |stop| stop.rotate, lerp)
                .unwrap_or(defaults.rotate),
        }
    }

    fn sample_property<T: Copy>(
        &self,
        delta: f32,
        get: impl Fn(&Keyframe) -> Option<T>,
        lerp: impl Fn(T, T, f32) -> T,
    ) -> Option<T> {
        let mut before: Option<(f32, T)> = None;

        for stop in &self.stops {
            let Some(value) = get(stop) else { continue };

            if stop.at >= delta {
                return Some(match before {
                    Some((at, previous)) => lerp(previous, value, (delta - at) / (stop.at - at)),
                    None => value,
                });
            }

            before = Some((stop.at, value));
        }

        before.map(|(_, value)| value)
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
