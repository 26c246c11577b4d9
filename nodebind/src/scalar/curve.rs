//! Sample curves described by keyframes.

use std::sync::Arc;

use super::{NumericList, ParseScalar};
use crate::{
    BindError, BindResult, Binder, ConfigNode, LifecycleHooks, ScalarFormatError, Target,
};

/// One curve sample with Hermite tangents.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Keyframe {
    /// Sample position.
    pub time: f32,
    /// Sample value.
    pub value: f32,
    /// Incoming slope.
    pub in_tangent: f32,
    /// Outgoing slope.
    pub out_tangent: f32,
}

impl Keyframe {
    fn from_values(values: &[f32]) -> Option<Self> {
        match *values {
            [time, value] => Some(Self {
                time,
                value,
                ..Self::default()
            }),
            [time, value, in_tangent, out_tangent] => Some(Self {
                time,
                value,
                in_tangent,
                out_tangent,
            }),
            _ => None,
        }
    }
}

/// A curve of keyframes, bound from repeated `key` entries.
///
/// In node form every `key = time value [inTangent outTangent]` entry adds
/// one keyframe. In scalar form the value is a flat list of `time value`
/// pairs.
///
/// # Examples
///
/// ```
/// use nodebind::{ConfigNode, FloatCurve, Target};
///
/// #[derive(Default, Target)]
/// struct Atmosphere {
///     #[bind(key = "pressureCurve")]
///     pressure: FloatCurve,
/// }
///
/// let node = ConfigNode::new("Atmosphere").with_node(
///     ConfigNode::new("pressureCurve")
///         .with_value("key", "0 101.325 0 0")
///         .with_value("key", "70000 0 0 0"),
/// );
/// let atmosphere: Atmosphere = nodebind::create(&node).expect("bind succeeds");
/// assert_eq!(atmosphere.pressure.keys().len(), 2);
/// assert_eq!(atmosphere.pressure.evaluate(0.0), 101.325);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Target)]
#[bind(crate = "crate", hooks, scalar)]
pub struct FloatCurve {
    #[bind(collection(key = "self", significance = "key", element = "key"))]
    samples: Vec<NumericList<f32>>,
    #[bind(skip)]
    keys: Vec<Keyframe>,
}

impl FloatCurve {
    /// Builds a curve from keyframes, ordering them by time.
    #[must_use]
    pub fn from_keys(frames: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keys: Vec<Keyframe> = frames.into_iter().collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        let samples = keys
            .iter()
            .map(|k| NumericList(vec![k.time, k.value, k.in_tangent, k.out_tangent]))
            .collect();
        Self { samples, keys }
    }

    /// Keyframes ordered by time.
    #[must_use]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Samples the curve at `time`.
    ///
    /// Values are clamped to the first and last keyframes outside their
    /// range; an empty curve evaluates to zero.
    #[must_use]
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        self.keys
            .windows(2)
            .find_map(|pair| match pair {
                [a, b] if time >= a.time && time <= b.time => Some(hermite(a, b, time)),
                _ => None,
            })
            .unwrap_or(last.value)
    }

    fn rebuild(&mut self) -> Result<(), ScalarFormatError> {
        let mut keys = self
            .samples
            .iter()
            .map(|sample| {
                Keyframe::from_values(sample).ok_or_else(|| {
                    let raw: Vec<String> = sample.iter().map(f32::to_string).collect();
                    ScalarFormatError::new(
                        raw.join(" "),
                        <Self as ParseScalar>::TYPE_NAME,
                        format!("curve key needs 2 or 4 values, found {}", sample.len()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.keys = keys;
        Ok(())
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "cubic Hermite interpolation is floating point"
)]
fn hermite(a: &Keyframe, b: &Keyframe, time: f32) -> f32 {
    let span = b.time - a.time;
    if span <= 0.0 {
        return a.value;
    }
    let s = (time - a.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    h00 * a.value + h10 * span * a.out_tangent + h01 * b.value + h11 * span * b.in_tangent
}

impl LifecycleHooks for FloatCurve {
    fn on_fully_resolved(&mut self, _node: &ConfigNode, binder: &mut Binder<'_>) -> BindResult<()> {
        self.rebuild().map_err(|source| {
            Arc::new(BindError::ScalarFormat {
                key: "key".to_owned(),
                path: binder.path(),
                source,
            })
        })
    }
}

impl ParseScalar for FloatCurve {
    const TYPE_NAME: &'static str = "FloatCurve";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let flat = NumericList::<f32>::parse_scalar(raw)?;
        let pairs = flat.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(ScalarFormatError::new(
                raw,
                <Self as ParseScalar>::TYPE_NAME,
                format!("expected time/value pairs, found {} values", flat.len()),
            ));
        }
        Ok(Self::from_keys(pairs.filter_map(Keyframe::from_values)))
    }
}
