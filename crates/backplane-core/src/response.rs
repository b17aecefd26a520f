use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Wire view of an [`ApiResult`], serialized as `{ "data": ..., "error": ... }`.
///
/// Only constructible from an `ApiResult`, so exactly one side is ever
/// populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    data: Option<T>,
    error: Option<ApiError>,
}

impl<T> Envelope<T> {
    /// Create a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed envelope.
    pub fn err(error: ApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Convert back into a `Result`, consuming the envelope.
    pub fn into_result(self) -> ApiResult<T> {
        match (self.data, self.error) {
            (_, Some(err)) => Err(err),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ApiError::new("Envelope carried neither data nor error")),
        }
    }
}

impl<T> From<ApiResult<T>> for Envelope<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::err(err),
        }
    }
}

impl<T> From<Envelope<T>> for ApiResult<T> {
    fn from(envelope: Envelope<T>) -> Self {
        envelope.into_result()
    }
}

/// Deserializes the `{ data, error }` shape. A present `error` marks a
/// failure; otherwise `data` is the value, with `null` standing for unit or
/// empty results. Payloads carrying both are rejected.
impl<'de, T> Deserialize<'de> for Envelope<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<T> {
            data: Option<T>,
            error: Option<ApiError>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        match (raw.data, raw.error) {
            (Some(_), Some(_)) => Err(serde::de::Error::custom(
                "envelope carries both data and error",
            )),
            (None, Some(err)) => Ok(Self::err(err)),
            (Some(data), None) => Ok(Self::ok(data)),
            (None, None) => T::deserialize(serde_json::Value::Null)
                .map(Self::ok)
                .map_err(serde::de::Error::custom),
        }
    }
}
