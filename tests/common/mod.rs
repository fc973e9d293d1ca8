//! Brickset v2 웹 서비스를 흉내 내는 테스트용 서버.
//!
//! 임의의 포트에서 별도 스레드의 tokio 런타임으로 실행된다. 클라이언트는
//! 블로킹 reqwest를 사용하므로 테스트 스레드에서 그대로 호출 할 수 있다.

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;

pub const API_KEY: &str = "valid-key";
pub const USER_HASH: &str = "f3b2c1d0";

pub const SETS_XML: &str = include_str!("../fixtures/sets.xml");
pub const JABBA_XML: &str = include_str!("../fixtures/jabba.xml");
pub const EMPTY_SETS_XML: &str = include_str!("../fixtures/empty_sets.xml");
pub const REVIEWS_XML: &str = include_str!("../fixtures/reviews.xml");

const GET_SETS_PARAMS: [&str; 13] = [
    "apiKey", "userHash", "query", "theme", "subtheme", "setNumber", "year",
    "owned", "wanted", "orderBy", "pageSize", "pageNumber", "userName",
];

type Params = Query<HashMap<String, String>>;

/// 서버를 시작하고 `http://127.0.0.1:<port>/api/v2.asmx` 형태의 기본 URL을 반환한다.
pub fn start() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app()).await
        })
        .unwrap();
    });

    format!("http://{addr}/api/v2.asmx")
}

fn app() -> Router {
    Router::new()
        .route("/api/v2.asmx/getSets", get(get_sets))
        .route("/api/v2.asmx/getSet", get(get_set))
        .route("/api/v2.asmx/getReviews", get(get_reviews))
        .route("/api/v2.asmx/checkKey", get(check_key))
        .route("/api/v2.asmx/login", get(login))
}

fn xml(body: &str) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/xml; charset=utf-8")], body.to_string()).into_response()
}

fn string_xml(value: &str) -> Response {
    xml(&format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<string xmlns=\"https://brickset.com/api/\">{value}</string>"
    ))
}

/// ASMX 서비스가 실패할 때 내려주는 평문 스택 트레이스
fn server_error(message: &str) -> Response {
    let body = format!("{message}\r\n   at System.Web.Services.Protocols.HttpServerProtocol.ReadParameters()\r\n");
    (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

fn check_params(params: &HashMap<String, String>, names: &[&str]) -> Result<(), Response> {
    for name in names {
        if !params.contains_key(*name) {
            return Err(server_error(&format!("System.InvalidOperationException: Missing parameter: {name}.")));
        }
    }
    if params.get("apiKey").map(String::as_str) != Some(API_KEY) {
        return Err(server_error("System.Exception: Invalid API Key."));
    }
    Ok(())
}

async fn get_sets(Query(params): Params) -> Response {
    if let Err(response) = check_params(&params, &GET_SETS_PARAMS) {
        return response;
    }

    match params["query"].as_str() {
        "jabba" => xml(SETS_XML),
        "broken" => xml("<ArrayOfSets><sets><name>Broken"),
        "maintenance" => xml("<html><body>Service Unavailable</body></html>"),
        _ => xml(EMPTY_SETS_XML),
    }
}

async fn get_set(Query(params): Params) -> Response {
    if let Err(response) = check_params(&params, &["apiKey", "userHash", "SetID"]) {
        return response;
    }

    match params["SetID"].as_str() {
        "23351" => xml(JABBA_XML),
        _ => xml(EMPTY_SETS_XML),
    }
}

async fn get_reviews(Query(params): Params) -> Response {
    if let Err(response) = check_params(&params, &["apiKey", "setID"]) {
        return response;
    }

    match params["setID"].as_str() {
        "23351" => xml(REVIEWS_XML),
        _ => xml("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<ArrayOfReviews xmlns=\"https://brickset.com/api/\" />"),
    }
}

async fn check_key(Query(params): Params) -> Response {
    match params.get("apiKey").map(String::as_str) {
        Some(API_KEY) => string_xml("OK"),
        _ => string_xml("INVALIDKEY"),
    }
}

async fn login(Query(params): Params) -> Response {
    if params.get("apiKey").map(String::as_str) != Some(API_KEY) {
        return string_xml("INVALIDKEY");
    }

    let username = params.get("username").map(String::as_str);
    let password = params.get("password").map(String::as_str);
    match (username, password) {
        (Some("brickfan"), Some("hunter2")) => string_xml(USER_HASH),
        _ => string_xml("ERROR: invalid username and/or password"),
    }
}
