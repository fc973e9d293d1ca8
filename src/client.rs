pub mod error;
pub mod transport;

use crate::configs::ClientConfig;
use crate::item::wire::{ArrayOfReviews, ArrayOfSets};
use crate::item::{Build, Review};
use crate::request::SetQuery;
use error::ApiError;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{debug, enabled};
use transport::{HttpResponse, HttpTransport, Transport};
use xml::reader::{EventReader, XmlEvent};

/// Brickset v2 웹 서비스 엔드포인트 URL
pub const DEFAULT_BASE_URL: &'static str = "https://brickset.com/api/v2.asmx";

/// 응답 종류별 루트 엘리먼트 이름
const SETS_ROOT: &'static str = "ArrayOfSets";
const REVIEWS_ROOT: &'static str = "ArrayOfReviews";
const STRING_ROOT: &'static str = "string";

/// Brickset API 클라이언트
///
/// 생성 후에는 변경 되지 않으며, 모든 요청에 API 키를 쿼리 파라미터로 포함한다.
/// 각 메서드는 블로킹 GET 요청 한 번을 실행하고 재시도 하지 않는다.
#[derive(Clone)]
pub struct Client<T = HttpTransport> {
    /// API 인증 키
    api_key: String,
    base_url: String,
    transport: T,
}

impl Client<HttpTransport> {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(api_key, base_url, HttpTransport::new()?))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = match config.timeout_seconds() {
            Some(seconds) => HttpTransport::with_timeout(Duration::from_secs(seconds))?,
            None => HttpTransport::new()?,
        };
        let base_url = config.base_url().unwrap_or(DEFAULT_BASE_URL);

        Ok(Self::with_transport(config.api_key(), base_url, transport))
    }

    /// `BRICKSET_API_KEY` 환경 변수로 클라이언트를 생성한다.
    /// `BRICKSET_BASE_URL`이 설정 되어 있으면 기본 URL 대신 사용한다.
    pub fn new_with_env() -> Result<Self, ApiError> {
        let key = env::var("BRICKSET_API_KEY").map_err(|_| ApiError::MissingApiKey)?;
        match env::var("BRICKSET_BASE_URL") {
            Ok(base_url) => Self::with_base_url(key, &base_url),
            Err(_) => Self::new(key),
        }
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(api_key: impl Into<String>, base_url: &str, transport: T) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 검색 조건에 맞는 세트 목록을 원격 서비스가 반환한 순서대로 가져온다.
    /// 검색 결과가 없으면 빈 목록을 반환한다.
    pub fn get_sets(&self, query: &SetQuery) -> Result<Vec<Build>, ApiError> {
        let url = self.build_url("getSets", &query.to_pairs())?;
        let body = self.call(&url)?;
        let parsed: ArrayOfSets = parse_xml(&body, SETS_ROOT)?;

        parsed.sets.unwrap_or_default()
            .into_iter()
            .map(Build::try_from)
            .collect()
    }

    /// 세트 ID로 세트 하나를 가져온다.
    pub fn get_set(&self, set_id: u64, user_hash: Option<&str>) -> Result<Build, ApiError> {
        let params = [
            ("userHash", user_hash.unwrap_or_default().to_owned()),
            ("SetID", set_id.to_string()),
        ];
        let url = self.build_url("getSet", &params)?;
        let body = self.call(&url)?;
        let parsed: ArrayOfSets = parse_xml(&body, SETS_ROOT)?;

        parsed.sets.unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ApiError::InvalidSetId(set_id))
            .and_then(Build::try_from)
    }

    pub fn get_reviews(&self, set_id: u64) -> Result<Vec<Review>, ApiError> {
        let url = self.build_url("getReviews", &[("setID", set_id.to_string())])?;
        let body = self.call(&url)?;
        let parsed: ArrayOfReviews = parse_xml(&body, REVIEWS_ROOT)?;

        parsed.reviews.unwrap_or_default()
            .into_iter()
            .map(Review::try_from)
            .collect()
    }

    /// API 키가 유효한지 확인한다.
    pub fn check_key(&self) -> Result<(), ApiError> {
        let url = self.build_url("checkKey", &[])?;
        let body = self.call(&url)?;
        let result: String = parse_xml(&body, STRING_ROOT)?;

        match result.trim() {
            "OK" => Ok(()),
            _ => Err(ApiError::InvalidApiKey),
        }
    }

    /// 로그인 후 사용자 해시를 반환한다. 사용자 해시는 [`SetQuery`]에 전달해
    /// 보유/위시 정보를 함께 조회할 때 사용한다.
    pub fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let params = [
            ("username", username.to_owned()),
            ("password", password.to_owned()),
        ];
        let url = self.build_url("login", &params)?;
        let body = self.call(&url)?;
        let result: String = parse_xml(&body, STRING_ROOT)?;
        let result = result.trim();

        if result == "INVALIDKEY" {
            return Err(ApiError::InvalidApiKey);
        }
        if result.is_empty() || result.starts_with("ERROR") {
            return Err(ApiError::InvalidLoginCredentials(result.to_owned()));
        }
        Ok(result.to_owned())
    }

    /// `<base_url>/<method>?apiKey=...&<params>` 형태의 URL을 만든다.
    pub(crate) fn build_url(&self, method: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let mut url = Url::parse(&format!("{}/{}", self.base_url, method))
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.clone()))?;

        // 쿼리 파라미터 추가
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apiKey", &self.api_key);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn call(&self, url: &Url) -> Result<String, ApiError> {
        let response = self.transport.get(url)?;
        if enabled!(tracing::Level::DEBUG) {
            debug!(endpoint = url.path(), status = response.status, "brickset response");
        }
        check_status(response)
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// 200 이외의 상태 코드는 응답 본문 첫 줄을 메시지로 하는 에러로 변환한다.
fn check_status(response: HttpResponse) -> Result<String, ApiError> {
    if response.status == 200 {
        return Ok(response.body);
    }

    let message = response.body.lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_owned();
    Err(ApiError::HttpStatus { status: response.status, message })
}

/// serde-xml-rs는 루트 엘리먼트 이름을 확인하지 않는다. 루트가 `root`가 아니면 파싱 에러
fn parse_xml<R: DeserializeOwned>(body: &str, root: &str) -> Result<R, ApiError> {
    let found = root_element(body)?;
    if found != root {
        return Err(ApiError::ResponseParseFailed(format!("expected <{}> root element, found <{}>", root, found)));
    }

    serde_xml_rs::from_str(body)
        .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
}

fn root_element(body: &str) -> Result<String, ApiError> {
    for event in EventReader::from_str(body) {
        let event = event.map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;
        if let XmlEvent::StartElement { name, .. } = event {
            return Ok(name.local_name);
        }
    }
    Err(ApiError::ResponseParseFailed("response has no root element".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{OrderBy, SortField};
    use std::cell::RefCell;

    const JABBA_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ArrayOfSets xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns="https://brickset.com/api/">
  <sets>
    <setID>23351</setID>
    <number>75020</number>
    <numberVariant>1</numberVariant>
    <name>Jabba's Palace</name>
    <year>2013</year>
    <theme>Star Wars</theme>
    <themeGroup>Licensed</themeGroup>
    <subtheme>Episode VI</subtheme>
    <pieces>717</pieces>
    <minifigs>5</minifigs>
    <released>true</released>
    <UKRetailPrice>84.99</UKRetailPrice>
    <USRetailPrice>119.99</USRetailPrice>
    <CARetailPrice>139.99</CARetailPrice>
    <EURetailPrice>99.99</EURetailPrice>
    <rating>4.2</rating>
  </sets>
</ArrayOfSets>"#;

    /// 미리 정해둔 응답을 돌려주고 요청 URL을 기록하는 전송 계층
    struct FixtureTransport {
        response: HttpResponse,
        requested: RefCell<Vec<Url>>,
    }

    impl FixtureTransport {
        fn new(status: u16, body: &str) -> Self {
            Self::with_response(HttpResponse { status, body: body.to_string() })
        }

        fn ok(body: &str) -> Self {
            Self::with_response(HttpResponse::ok(body))
        }

        fn with_response(response: HttpResponse) -> Self {
            Self {
                response,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FixtureTransport {
        fn get(&self, url: &Url) -> Result<HttpResponse, ApiError> {
            self.requested.borrow_mut().push(url.clone());
            Ok(self.response.clone())
        }
    }

    fn client(transport: &FixtureTransport) -> Client<&FixtureTransport> {
        Client::with_transport("secret-key", "http://localhost:3000/api/v2.asmx/", transport)
    }

    #[test]
    fn build_url_puts_api_key_first() {
        let transport = FixtureTransport::new(200, "");
        let url = client(&transport)
            .build_url("getSet", &[("SetID", "42".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v2.asmx/getSet?apiKey=secret-key&SetID=42");
    }

    #[test]
    fn empty_api_key_fails_before_request() {
        let transport = FixtureTransport::new(200, JABBA_XML);
        let client = Client::with_transport("  ", "http://localhost:3000", &transport);
        let err = client.get_sets(&SetQuery::default()).unwrap_err();
        assert_eq!(err, ApiError::MissingApiKey);
        assert!(transport.requested.borrow().is_empty());
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let transport = FixtureTransport::new(200, "");
        let client = Client::with_transport("key", "not a url", &transport);
        let err = client.check_key().unwrap_err();
        assert_eq!(err, ApiError::InvalidBaseUrl("not a url".to_string()));
    }

    #[test]
    fn get_sets_sends_every_filter() {
        let transport = FixtureTransport::new(200, JABBA_XML);
        let query = SetQuery::builder()
            .query("jabba")
            .theme("Star Wars")
            .order_by(OrderBy::desc(SortField::Pieces))
            .page_size(5)
            .build()
            .unwrap();
        client(&transport).get_sets(&query).unwrap();

        let requested = transport.requested.borrow();
        let pairs: Vec<(String, String)> = requested[0].query_pairs().into_owned().collect();
        assert_eq!(requested[0].path(), "/api/v2.asmx/getSets");
        assert_eq!(pairs.len(), 13);
        assert_eq!(pairs[0], ("apiKey".to_string(), "secret-key".to_string()));
        assert!(pairs.contains(&("theme".to_string(), "Star Wars".to_string())));
        assert!(pairs.contains(&("orderBy".to_string(), "PiecesDESC".to_string())));
        assert!(pairs.contains(&("pageSize".to_string(), "5".to_string())));
        assert!(pairs.contains(&("subtheme".to_string(), String::new())));
    }

    #[test]
    fn get_sets_maps_fixture() {
        let transport = FixtureTransport::new(200, JABBA_XML);
        let sets = client(&transport).get_sets(&SetQuery::default()).unwrap();

        assert_eq!(sets.len(), 1);
        let jabba = &sets[0];
        assert_eq!(jabba.name(), "Jabba's Palace");
        assert_eq!(jabba.pieces(), Some(717));
        assert_eq!(jabba.price_uk(), Some("84.99"));
        assert_eq!(jabba.price_us(), Some("119.99"));
        assert_eq!(jabba.price_ca(), Some("139.99"));
        assert_eq!(jabba.price_eu(), Some("99.99"));
        assert_eq!(jabba.subtheme(), Some("Episode VI"));
    }

    #[test]
    fn empty_result_is_empty_vec() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<ArrayOfSets xmlns="https://brickset.com/api/"></ArrayOfSets>"#;
        let transport = FixtureTransport::new(200, body);
        let sets = client(&transport).get_sets(&SetQuery::default()).unwrap();
        assert!(sets.is_empty());
    }

    #[test]
    fn malformed_xml_is_parse_error() {
        let transport = FixtureTransport::new(200, "<ArrayOfSets><sets><name>broken");
        let err = client(&transport).get_sets(&SetQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::ResponseParseFailed(_)));
    }

    const HTML_PAGE: &str = "<html><body>Service Unavailable</body></html>";
    const INVALID_KEY_XML: &str = r#"<string xmlns="https://brickset.com/api/">INVALIDKEY</string>"#;
    const REVIEWS_XML: &str = r#"<ArrayOfReviews xmlns="https://brickset.com/api/"></ArrayOfReviews>"#;

    fn assert_parse_failed<T: fmt::Debug>(result: Result<T, ApiError>) {
        assert!(matches!(result, Err(ApiError::ResponseParseFailed(_))), "{:?}", result);
    }

    #[test]
    fn get_sets_rejects_unexpected_root() {
        for body in [HTML_PAGE, INVALID_KEY_XML, REVIEWS_XML] {
            let transport = FixtureTransport::ok(body);
            assert_parse_failed(client(&transport).get_sets(&SetQuery::default()));
        }
    }

    #[test]
    fn get_set_rejects_unexpected_root() {
        for body in [HTML_PAGE, INVALID_KEY_XML, REVIEWS_XML] {
            let transport = FixtureTransport::ok(body);
            assert_parse_failed(client(&transport).get_set(23351, None));
        }
    }

    #[test]
    fn get_reviews_rejects_unexpected_root() {
        for body in [HTML_PAGE, INVALID_KEY_XML, JABBA_XML] {
            let transport = FixtureTransport::ok(body);
            assert_parse_failed(client(&transport).get_reviews(23351));
        }
    }

    #[test]
    fn string_endpoints_reject_unexpected_root() {
        let transport = FixtureTransport::ok(HTML_PAGE);
        assert_parse_failed(client(&transport).check_key());
        assert_parse_failed(client(&transport).login("user", "pass"));
    }

    #[test]
    fn empty_body_is_parse_error() {
        let transport = FixtureTransport::ok("");
        assert_parse_failed(client(&transport).get_sets(&SetQuery::default()));
    }

    #[test]
    fn non_success_status_uses_first_line() {
        let body = "System.InvalidOperationException: Missing parameter: apiKey.\r\n   at System.Web.Services";
        let transport = FixtureTransport::new(500, body);
        let err = client(&transport).get_sets(&SetQuery::default()).unwrap_err();
        assert_eq!(err, ApiError::HttpStatus {
            status: 500,
            message: "System.InvalidOperationException: Missing parameter: apiKey.".to_string(),
        });
    }

    #[test]
    fn get_set_without_match_is_invalid_set_id() {
        let transport = FixtureTransport::new(200, r#"<ArrayOfSets xmlns="https://brickset.com/api/" />"#);
        let err = client(&transport).get_set(99, None).unwrap_err();
        assert_eq!(err, ApiError::InvalidSetId(99));
    }

    #[test]
    fn check_key_accepts_ok() {
        let transport = FixtureTransport::new(200, r#"<string xmlns="https://brickset.com/api/">OK</string>"#);
        assert!(client(&transport).check_key().is_ok());
    }

    #[test]
    fn check_key_rejects_invalid() {
        let transport = FixtureTransport::new(200, r#"<string xmlns="https://brickset.com/api/">INVALIDKEY</string>"#);
        assert_eq!(client(&transport).check_key().unwrap_err(), ApiError::InvalidApiKey);
    }

    #[test]
    fn login_returns_user_hash() {
        let transport = FixtureTransport::new(200, r#"<string xmlns="https://brickset.com/api/">abc123</string>"#);
        assert_eq!(client(&transport).login("user", "pass").unwrap(), "abc123");

        let requested = transport.requested.borrow();
        let pairs: Vec<(String, String)> = requested[0].query_pairs().into_owned().collect();
        assert_eq!(pairs[1], ("username".to_string(), "user".to_string()));
    }

    #[test]
    fn login_error_is_invalid_credentials() {
        let body = r#"<string xmlns="https://brickset.com/api/">ERROR: invalid username and/or password</string>"#;
        let transport = FixtureTransport::new(200, body);
        let err = client(&transport).login("user", "wrong").unwrap_err();
        assert!(matches!(err, ApiError::InvalidLoginCredentials(_)));
    }

    #[test]
    fn debug_does_not_print_api_key() {
        let transport = FixtureTransport::new(200, "");
        let printed = format!("{:?}", client(&transport));
        assert!(!printed.contains("secret-key"));
    }
}
