use crate::error::MarketError;
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error codes carried by a failed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    MissingParam,
    ValidationError,
    NetworkError,
    Timeout,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&MarketError> for ErrorBody {
    fn from(err: &MarketError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<MarketError> for ErrorBody {
    fn from(err: MarketError) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

/// The uniform result of every service call.
///
/// On the wire this is `{"success": true, "data": ...}` or
/// `{"success": false, "error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    Ok(T),
    Err(ErrorBody),
}

impl<T> Response<T> {
    pub fn ok(data: T) -> Self {
        Response::Ok(data)
    }

    pub fn err(code: ErrorCode, message: impl Into<String>) -> Self {
        Response::Err(ErrorBody::new(code, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Ok(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Response::Ok(data) => Some(data),
            Response::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Response::Ok(_) => None,
            Response::Err(body) => Some(body),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        match self {
            Response::Ok(data) => Response::Ok(f(data)),
            Response::Err(body) => Response::Err(body),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorBody> {
        match self {
            Response::Ok(data) => Ok(data),
            Response::Err(body) => Err(body),
        }
    }
}

impl<T> From<Result<T, MarketError>> for Response<T> {
    fn from(result: Result<T, MarketError>) -> Self {
        match result {
            Ok(data) => Response::Ok(data),
            Err(err) => Response::Err(err.into()),
        }
    }
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Response", 2)?;
        match self {
            Response::Ok(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Response::Err(body) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", body)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct Wire<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorBody>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Response<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = Wire::<T>::deserialize(deserializer)?;
        match (wire.success, wire.data, wire.error) {
            (true, Some(data), _) => Ok(Response::Ok(data)),
            (false, _, Some(error)) => Ok(Response::Err(error)),
            (true, None, _) => Err(D::Error::missing_field("data")),
            (false, _, None) => Err(D::Error::missing_field("error")),
        }
    }
}
