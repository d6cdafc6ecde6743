//! Field readers that turn shape mismatches into "absent" instead of failing the
//! whole document. Used as `deserialize_with` targets on content sections.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads an optional value; a value of the wrong shape (or `null`) is `None`.
pub(crate) fn opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Reads an optional list, silently dropping items that do not match `T`.
/// Anything other than an array is `None`.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(items.into_iter().filter_map(|item| T::deserialize(item).ok()).collect()))
}

/// Reads a non-negative count written by hand in the CMS.
///
/// Accepts `650`, `650.0` and strings such as `"650"`, `"1,200"` or `"650+"`.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let rounded = f.round() as u64;
                rounded
            })
        }),
        Value::String(s) => {
            let digits: String =
                s.trim().trim_end_matches('+').chars().filter(|c| *c != ',').collect();
            digits.trim().parse().ok()
        },
        _ => None,
    })
}
