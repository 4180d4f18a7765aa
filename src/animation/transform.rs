//! SVG transform lists: parsing, `animateTransform` parameters and baking.

use kurbo::{Affine, Point};

use crate::foundation::number::{fmt_number, parse_number_list};

/// Transform item kinds, mirroring the SVG DOM `SVGTransform.type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    /// `matrix(a b c d e f)`
    Matrix,
    /// `translate(tx [ty])`
    Translate,
    /// `scale(sx [sy])`
    Scale,
    /// `rotate(angle [cx cy])`
    Rotate,
    /// `skewX(angle)`
    SkewX,
    /// `skewY(angle)`
    SkewY,
}

impl TransformKind {
    /// Interpret the `type` attribute of `<animateTransform>` (defaults to translate).
    pub fn from_type_attr(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("translate") => Some(Self::Translate),
            Some("scale") => Some(Self::Scale),
            Some("rotate") => Some(Self::Rotate),
            Some("skewX") => Some(Self::SkewX),
            Some("skewY") => Some(Self::SkewY),
            Some(_) => None,
        }
    }

    fn from_function(name: &str) -> Option<Self> {
        match name {
            "matrix" => Some(Self::Matrix),
            "translate" => Some(Self::Translate),
            "scale" => Some(Self::Scale),
            "rotate" => Some(Self::Rotate),
            "skewX" => Some(Self::SkewX),
            "skewY" => Some(Self::SkewY),
            _ => None,
        }
    }

    /// Full parameter count after defaults are filled in.
    pub fn arity(self) -> usize {
        match self {
            Self::Matrix => 6,
            Self::Translate | Self::Scale => 2,
            Self::Rotate => 3,
            Self::SkewX | Self::SkewY => 1,
        }
    }

    /// Expand a short parameter list to full arity (`scale(2)` means `scale(2 2)`).
    pub fn normalize_params(self, params: &[f64]) -> Option<Vec<f64>> {
        let full = match (self, params) {
            (Self::Matrix, [_, _, _, _, _, _]) => params.to_vec(),
            (Self::Translate, [tx]) => vec![*tx, 0.0],
            (Self::Translate, [_, _]) => params.to_vec(),
            (Self::Scale, [s]) => vec![*s, *s],
            (Self::Scale, [_, _]) => params.to_vec(),
            (Self::Rotate, [a]) => vec![*a, 0.0, 0.0],
            (Self::Rotate, [_, _, _]) => params.to_vec(),
            (Self::SkewX | Self::SkewY, [_]) => params.to_vec(),
            _ => return None,
        };
        Some(full)
    }

    /// Parameters of the identity transform of this kind.
    pub fn identity_params(self) -> Vec<f64> {
        match self {
            Self::Matrix => vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            Self::Scale => vec![1.0, 1.0],
            _ => vec![0.0; self.arity()],
        }
    }
}

/// One transform list entry: its kind plus the resolved matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformItem {
    /// Item kind.
    pub kind: TransformKind,
    /// Equivalent affine matrix.
    pub matrix: Affine,
    /// Angle in degrees (rotate and skew items, 0 otherwise).
    pub angle: f64,
    /// Rotation centre (origin for everything but rotate).
    pub center: Point,
}

impl TransformItem {
    /// Build an item from full-arity parameters (see [`TransformKind::normalize_params`]).
    pub fn from_params(kind: TransformKind, params: &[f64]) -> Option<Self> {
        let p = kind.normalize_params(params)?;
        let item = match kind {
            TransformKind::Matrix => Self {
                kind,
                matrix: Affine::new([p[0], p[1], p[2], p[3], p[4], p[5]]),
                angle: 0.0,
                center: Point::ORIGIN,
            },
            TransformKind::Translate => Self {
                kind,
                matrix: Affine::translate((p[0], p[1])),
                angle: 0.0,
                center: Point::ORIGIN,
            },
            TransformKind::Scale => Self {
                kind,
                matrix: Affine::scale_non_uniform(p[0], p[1]),
                angle: 0.0,
                center: Point::ORIGIN,
            },
            TransformKind::Rotate => {
                let center = Point::new(p[1], p[2]);
                Self {
                    kind,
                    matrix: Affine::rotate_about(p[0].to_radians(), center),
                    angle: p[0],
                    center,
                }
            }
            TransformKind::SkewX => Self {
                kind,
                matrix: Affine::skew(p[0].to_radians().tan(), 0.0),
                angle: p[0],
                center: Point::ORIGIN,
            },
            TransformKind::SkewY => Self {
                kind,
                matrix: Affine::skew(0.0, p[0].to_radians().tan()),
                angle: p[0],
                center: Point::ORIGIN,
            },
        };
        Some(item)
    }
}

/// Parse a `transform` attribute. A syntax error invalidates the whole list, as in SVG.
pub fn parse_transform_list(raw: &str) -> Vec<TransformItem> {
    match try_parse_transform_list(raw) {
        Some(items) => items,
        None => {
            tracing::debug!(value = raw, "ignoring malformed transform list");
            Vec::new()
        }
    }
}

fn try_parse_transform_list(raw: &str) -> Option<Vec<TransformItem>> {
    let mut items = Vec::new();
    let mut rest = raw.trim_start_matches(is_separator);
    while !rest.is_empty() {
        let name_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let kind = TransformKind::from_function(&rest[..name_len])?;
        let after_name = rest[name_len..].trim_start();
        let args_src = after_name.strip_prefix('(')?;
        let close = args_src.find(')')?;
        let args = parse_args(&args_src[..close])?;
        items.push(TransformItem::from_params(kind, &args)?);
        rest = args_src[close + 1..].trim_start_matches(is_separator);
    }
    Some(items)
}

fn parse_args(s: &str) -> Option<Vec<f64>> {
    if s.trim().is_empty() {
        return Some(Vec::new());
    }
    parse_number_list(s)
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == ','
}

/// Bake an animated transform list into static markup.
///
/// Matrix and translate items become `matrix(a b c d e f)`, rotations become
/// `rotate(angle)` (with the centre when it is not the origin). Scale and skew items are
/// not representable in this form and are omitted.
pub fn bake_transform_list(items: &[TransformItem]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        match item.kind {
            TransformKind::Matrix | TransformKind::Translate => {
                let c = item.matrix.as_coeffs().map(fmt_number);
                out.push(format!(
                    "matrix({} {} {} {} {} {})",
                    c[0], c[1], c[2], c[3], c[4], c[5]
                ));
            }
            TransformKind::Rotate if item.center == Point::ORIGIN => {
                out.push(format!("rotate({})", fmt_number(item.angle)));
            }
            TransformKind::Rotate => {
                out.push(format!(
                    "rotate({} {} {})",
                    fmt_number(item.angle),
                    fmt_number(item.center.x),
                    fmt_number(item.center.y)
                ));
            }
            TransformKind::Scale | TransformKind::SkewX | TransformKind::SkewY => {
                tracing::trace!(kind = ?item.kind, "dropping unsupported transform item");
            }
        }
    }
    out.join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transform.rs"]
mod tests;
