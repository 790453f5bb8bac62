use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of a boundary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// The closed set of status codes an envelope may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    Created,
    BadRequest,
    Unauthenticated,
    Forbidden,
    NotFound,
    InvalidToken,
    InternalServerError,
}

impl StatusCode {
    pub const ALL: [StatusCode; 8] = [
        StatusCode::Ok,
        StatusCode::Created,
        StatusCode::BadRequest,
        StatusCode::Unauthenticated,
        StatusCode::Forbidden,
        StatusCode::NotFound,
        StatusCode::InvalidToken,
        StatusCode::InternalServerError,
    ];

    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InvalidToken => 498,
            Self::InternalServerError => 500,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u16() == code)
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Created)
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported status code {code}")))
    }
}

/// Uniform response wrapper returned by every boundary operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub status: Status,
    pub message: String,
    pub status_code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    /// Builds an envelope whose `status` is derived from `status_code`.
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        let status = if status_code.is_success() {
            Status::Success
        } else {
            Status::Fail
        };
        Self {
            status,
            message: message.into(),
            status_code,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Replaces the payload type, dropping any payload.
    pub fn without_payload<U>(self) -> Envelope<U> {
        Envelope {
            status: self.status,
            message: self.message,
            status_code: self.status_code,
            payload: None,
        }
    }
}
