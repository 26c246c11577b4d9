//! Parsers for the primitive numeric and boolean types.

use super::ParseScalar;
use crate::ScalarFormatError;

macro_rules! from_str_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ParseScalar for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
                    raw.trim()
                        .parse::<$ty>()
                        .map_err(|e| ScalarFormatError::new(raw, Self::TYPE_NAME, e.to_string()))
                }
            }

            crate::scalar_field!($ty);
        )+
    };
}

from_str_scalar!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl ParseScalar for bool {
    const TYPE_NAME: &'static str = "bool";

    /// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off` in any case.
    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let token = raw.trim();
        let truthy = ["true", "1", "yes", "on"];
        let falsy = ["false", "0", "no", "off"];
        if truthy.iter().any(|t| token.eq_ignore_ascii_case(t)) {
            Ok(true)
        } else if falsy.iter().any(|t| token.eq_ignore_ascii_case(t)) {
            Ok(false)
        } else {
            Err(ScalarFormatError::new(
                raw,
                Self::TYPE_NAME,
                "expected true/false, yes/no, on/off or 1/0",
            ))
        }
    }
}

crate::scalar_field!(bool);
