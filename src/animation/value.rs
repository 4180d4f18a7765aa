use std::str::FromStr;

use crate::foundation::number::{fmt_number, parse_number_list, split_number_unit};

/// Straight-alpha RGBA color with channels in `0..=255` (alpha `0..=1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha, `0..=1`.
    pub a: f64,
}

impl Rgba {
    fn parse(raw: &str) -> Option<Self> {
        let c = svgtypes::Color::from_str(raw.trim()).ok()?;
        Some(Self {
            r: f64::from(c.red),
            g: f64::from(c.green),
            b: f64::from(c.blue),
            a: f64::from(c.alpha) / 255.0,
        })
    }

    fn channels(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a * 255.0]
    }

    fn from_channels(c: [f64; 4]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3] / 255.0,
        }
    }
}

/// A typed animation value, as parsed from an attribute or a `values`/`from`/`to` entry.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimValue {
    /// A number with an optional unit (`""`, `"px"`, `"%"`, ...).
    Number {
        /// Magnitude.
        value: f64,
        /// Unit suffix, possibly empty.
        unit: String,
    },
    /// A color.
    Color(Rgba),
    /// A list of numbers (`viewBox`, `points`, `stroke-dasharray`, ...).
    List(Vec<f64>),
    /// Anything else. Only animated discretely.
    Text(String),
}

/// Properties whose values are parsed as colors first.
const COLOR_PROPERTIES: &[&str] = &[
    "fill",
    "stroke",
    "color",
    "stop-color",
    "flood-color",
    "lighting-color",
];

impl AnimValue {
    /// Parse `raw` as a value of attribute `attr`.
    pub fn parse(attr: &str, raw: &str) -> Self {
        let trimmed = raw.trim();
        if COLOR_PROPERTIES.contains(&attr)
            && let Some(c) = Rgba::parse(trimmed)
        {
            return Self::Color(c);
        }
        if let Some((value, unit)) = split_number_unit(trimmed) {
            return Self::Number {
                value,
                unit: unit.to_string(),
            };
        }
        if let Some(list) = parse_number_list(trimmed) {
            return Self::List(list);
        }
        Self::Text(trimmed.to_string())
    }

    /// The additive identity of this value's shape (used by `by` animations).
    pub fn zero_like(&self) -> Self {
        match self {
            Self::Number { unit, .. } => Self::Number {
                value: 0.0,
                unit: unit.clone(),
            },
            Self::Color(_) => Self::Color(Rgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            }),
            Self::List(v) => Self::List(vec![0.0; v.len()]),
            Self::Text(_) => Self::Text(String::new()),
        }
    }

    /// Linear interpolation toward `to`; `None` when the shapes are not interpolable.
    pub fn interpolate(&self, to: &Self, t: f64) -> Option<Self> {
        self.zip(to, |a, b| a + (b - a) * t)
    }

    /// Component-wise sum; `None` when the shapes do not match.
    pub fn add(&self, other: &Self) -> Option<Self> {
        self.zip(other, |a, b| a + b)
    }

    /// Multiply every component by `k`.
    pub fn scale(&self, k: f64) -> Option<Self> {
        self.zip(self, |a, _| a * k)
    }

    /// Euclidean distance used by paced interpolation.
    pub fn distance(&self, other: &Self) -> Option<f64> {
        let diff = self.zip(other, |a, b| b - a)?;
        let sq: f64 = match diff {
            Self::Number { value, .. } => value * value,
            Self::Color(c) => c.channels().iter().map(|v| v * v).sum(),
            Self::List(v) => v.iter().map(|x| x * x).sum(),
            Self::Text(_) => return None,
        };
        Some(sq.sqrt())
    }

    fn zip(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Option<Self> {
        match (self, other) {
            (
                Self::Number { value: a, unit: ua },
                Self::Number { value: b, unit: ub },
            ) => {
                let unit = match (ua.as_str(), ub.as_str()) {
                    (x, y) if x == y => x,
                    ("", y) => y,
                    (x, "") => x,
                    _ => return None,
                };
                Some(Self::Number {
                    value: f(*a, *b),
                    unit: unit.to_string(),
                })
            }
            (Self::Color(a), Self::Color(b)) => {
                let (ca, cb) = (a.channels(), b.channels());
                Some(Self::Color(Rgba::from_channels(std::array::from_fn(|i| {
                    f(ca[i], cb[i])
                }))))
            }
            (Self::List(a), Self::List(b)) if a.len() == b.len() => Some(Self::List(
                a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect(),
            )),
            _ => None,
        }
    }

    /// Serialize back to attribute/style syntax.
    pub fn to_markup(&self) -> String {
        match self {
            Self::Number { value, unit } => format!("{}{unit}", fmt_number(*value)),
            Self::Color(c) => {
                let ch = |v: f64| v.round().clamp(0.0, 255.0) as u8;
                let a = c.a.clamp(0.0, 1.0);
                if a >= 1.0 {
                    format!("rgb({}, {}, {})", ch(c.r), ch(c.g), ch(c.b))
                } else {
                    format!(
                        "rgba({}, {}, {}, {})",
                        ch(c.r),
                        ch(c.g),
                        ch(c.b),
                        fmt_number(a)
                    )
                }
            }
            Self::List(v) => v
                .iter()
                .map(|x| fmt_number(*x))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Text(s) => s.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
