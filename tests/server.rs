use chrono::NaiveDate;
use postbox::message::{method_path, Status, CREATE_POST, GET_POSTS};
use postbox::{
    BlogServer, Client, CreatePostRequest, Error, ErrorKind, FixedClock, PostStore, Server,
    UnimplementedBlog,
};
use reqwest::StatusCode;
use std::net::SocketAddr;
use std::time::Duration;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("postbox_test_server_{}.json", name))
}

fn start(path: &std::path::Path) -> SocketAddr {
    let store = PostStore::open(path).unwrap();
    let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
    Server::bind("127.0.0.1:0", BlogServer::with_clock(store, clock))
        .unwrap()
        .spawn()
        .unwrap()
}

fn connect(addr: SocketAddr) -> Client {
    Client::with_timeout(format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

fn post_raw(addr: SocketAddr, method: &str, body: &'static str) -> reqwest::blocking::Response {
    reqwest::blocking::Client::new()
        .post(format!("http://{addr}{}", method_path(method)))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .unwrap()
}

#[test]
fn create_and_list_over_http() {
    let path = temp_path("create_list");
    std::fs::write(&path, "[]").unwrap();
    let addr = start(&path);
    let client = connect(addr);

    let post = client
        .create_post(&CreatePostRequest::new("Remote", "over the wire", "tester"))
        .unwrap();
    assert_eq!(post.view_count, 0);
    assert_eq!(post.created_at, "2024-07-04");

    let listed = client.get_posts().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Remote");
    assert_eq!(listed[0].view_count, 1);

    // a second client sees the same file
    let other = connect(addr);
    assert_eq!(other.get_posts().unwrap()[0].view_count, 2);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn store_errors_reach_the_caller() {
    let path = temp_path("missing");
    let _ = std::fs::remove_file(&path);
    let client = connect(start(&path));

    let err = client.get_posts().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let err = client
        .create_post(&CreatePostRequest::new("t", "c", "a"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(matches!(err.cause(), Some(Error::Io(_))));

    // the server keeps answering after failed calls
    std::fs::write(&path, "[]").unwrap();
    assert!(client.get_posts().unwrap().is_empty());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn store_failure_is_http_500_with_status_body() {
    let path = temp_path("status_500");
    let _ = std::fs::remove_file(&path);
    let addr = start(&path);

    let resp = post_raw(addr, CREATE_POST, r#"{"title":"t"}"#);
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let status: Status = resp.json().unwrap();
    assert_eq!(status.kind, ErrorKind::Internal);
    assert_eq!(status.cause.unwrap().kind, ErrorKind::Io);
}

#[test]
fn unknown_method_is_unimplemented() {
    let path = temp_path("unknown");
    std::fs::write(&path, "[]").unwrap();
    let client = connect(start(&path));
    let res: postbox::Result<serde_json::Value> = client.call("DeletePost", &serde_json::json!({}));
    assert_eq!(
        res.unwrap_err(),
        Error::Unimplemented("method DeletePost not implemented".into())
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn default_service_answers_unimplemented() {
    let addr = Server::bind("127.0.0.1:0", UnimplementedBlog)
        .unwrap()
        .spawn()
        .unwrap();
    let resp = post_raw(addr, GET_POSTS, "{}");
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

    let client = connect(addr);
    assert_eq!(client.get_posts().unwrap_err().kind(), ErrorKind::Unimplemented);
}

#[test]
fn malformed_body_gets_invalid_request() {
    let path = temp_path("malformed");
    std::fs::write(&path, "[]").unwrap();
    let addr = start(&path);

    let resp = post_raw(addr, GET_POSTS, "this is not a request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let status: Status = resp.json().unwrap();
    assert_eq!(status.kind, ErrorKind::InvalidRequest);

    // still serving afterwards
    let resp = post_raw(addr, GET_POSTS, "{}");
    assert_eq!(resp.status(), StatusCode::OK);
    let value: serde_json::Value = resp.json().unwrap();
    assert_eq!(value["posts"], serde_json::json!([]));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn created_at_field_is_accepted_and_overridden() {
    let path = temp_path("created_at");
    std::fs::write(&path, "[]").unwrap();
    let addr = start(&path);

    let resp = post_raw(
        addr,
        CREATE_POST,
        r#"{"title":"dated","content":"","author":"","createdAt":"1999-12-31"}"#,
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let value: serde_json::Value = resp.json().unwrap();
    assert_eq!(value["Title"], "dated");
    assert_eq!(value["CreatedAt"], "2024-07-04");
    assert_eq!(value["ViewCount"], 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn undecodable_reply_is_not_a_format_error() {
    let path = temp_path("bad_reply");
    std::fs::write(&path, "[]").unwrap();
    let client = connect(start(&path));

    // a GetPosts reply does not decode as a bare string
    let res: postbox::Result<String> = client.call(GET_POSTS, &serde_json::json!({}));
    let err = res.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("bad reply"));
    let _ = std::fs::remove_file(&path);
}
