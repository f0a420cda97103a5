//! Forgiving field deserializers for data handed over by fetchers.
//!
//! Used via `#[serde(deserialize_with)]` on [`RawItem`](crate::RawItem) so a
//! stray `null` or a fractional counter degrades one field instead of
//! rejecting the whole item.

use serde::{Deserialize, Deserializer};

/// `null` deserializes to `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// Integer counter that also accepts `null` (0), fractional values (rounded)
/// and magnitudes beyond `i64` (saturated).
pub(crate) fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<Count>::deserialize(deserializer)? {
        None => 0,
        Some(Count::Signed(n)) => n,
        Some(Count::Unsigned(n)) => i64::try_from(n).unwrap_or(i64::MAX),
        Some(Count::Float(x)) => round_saturating(x),
    };
    Ok(count)
}

/// `as` saturates at the `i64` bounds and maps NaN to 0.
#[allow(clippy::cast_possible_truncation)]
fn round_saturating(x: f64) -> i64 {
    x.round() as i64
}
