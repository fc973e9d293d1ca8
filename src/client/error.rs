use std::fmt;

/// Brickset 호출 중 발생할 수 있는 에러
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// API 키가 비어 있어 요청을 만들 수 없음
    MissingApiKey,

    InvalidBaseUrl(String),

    /// 네트워크 오류로 요청 자체가 실패함
    RequestFailed(String),

    ResponseTextExtractionFailed(String),

    /// 200 이외의 상태 코드. message는 응답 본문의 첫 줄
    HttpStatus { status: u16, message: String },

    /// 응답 본문이 예상한 XML 형태가 아님
    ResponseParseFailed(String),

    /// 필수 필드가 응답에 없음
    MissingField { record: &'static str, field: &'static str },

    /// 필드 값이 예상한 형식으로 변환 되지 않음
    InvalidField { field: &'static str, value: String },

    InvalidApiKey,

    InvalidLoginCredentials(String),

    /// 해당 ID의 세트가 존재하지 않음
    InvalidSetId(u64),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingApiKey => write!(f, "api key is required"),
            ApiError::InvalidBaseUrl(url) => write!(f, "invalid base url: {}", url),
            ApiError::RequestFailed(message) => write!(f, "request failed, {}", message),
            ApiError::ResponseTextExtractionFailed(message) => {
                write!(f, "cannot read response body, {}", message)
            }
            ApiError::HttpStatus { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::ResponseParseFailed(message) => write!(f, "cannot parse response, {}", message),
            ApiError::MissingField { record, field } => {
                write!(f, "{} is missing required field {}", record, field)
            }
            ApiError::InvalidField { field, value } => {
                write!(f, "invalid value for {}: {:?}", field, value)
            }
            ApiError::InvalidApiKey => write!(f, "api key was rejected"),
            ApiError::InvalidLoginCredentials(message) => {
                write!(f, "invalid login credentials, {}", message)
            }
            ApiError::InvalidSetId(id) => write!(f, "no set with id {}", id),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    InvalidParameter(String),         // 유효하지 않은 매개변수

    /// 정렬 기준 문자열이 Brickset에서 허용하는 값이 아님
    InvalidOrderType(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RequestError {}
