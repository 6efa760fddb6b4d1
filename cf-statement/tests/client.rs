use cf_statement::{Client, Error, ParseError, ProblemId};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBLEM_PATH: &str = "/contest/158/problem/A";
const PROBLEM_HTML: &str = include_str!("fixtures/problems/158A.html");

async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(&server)
        .await;

    server
}

async fn serve_problem() -> MockServer {
    serve(
        PROBLEM_PATH,
        ResponseTemplate::new(200).set_body_raw(PROBLEM_HTML, "text/html; charset=utf-8"),
    )
    .await
}

fn client_for(server: &MockServer) -> Client {
    let base_url = Url::parse(&server.uri()).expect("mock server uri");

    Client::new().with_base_url(base_url)
}

#[tokio::test]
async fn fetch_returns_body_and_charset() {
    let server = serve_problem().await;
    let client = client_for(&server);
    let page = client
        .fetch(&format!("{}{PROBLEM_PATH}", server.uri()))
        .await
        .expect("page");

    assert_eq!(page.url.path(), PROBLEM_PATH);
    assert_eq!(page.bytes, PROBLEM_HTML.as_bytes());
    assert_eq!(page.charset.as_deref(), Some("utf-8"));
}

#[tokio::test]
async fn problem_by_url() {
    let server = serve_problem().await;
    let client = client_for(&server);
    let problem = client
        .problem(&format!("{}{PROBLEM_PATH}", server.uri()))
        .await
        .expect("problem");

    assert_eq!(problem.title, "A. Next Round");
    assert_eq!(problem.time_limit, "3 seconds");
    assert_eq!(problem.memory_limit, "256 megabytes");
    assert!(problem.statement.starts_with("\"Contestant who earns"));
    assert_eq!(problem.samples.len(), 2);
}

#[tokio::test]
async fn problem_by_id() {
    let server = serve_problem().await;
    let client = client_for(&server);
    let id: ProblemId = "158A".parse().unwrap();
    let problem = client.problem_by_id(&id).await.expect("problem");

    assert_eq!(problem.title, "A. Next Round");
}

#[tokio::test]
async fn failure_leaves_no_residual_state() {
    let server = serve_problem().await;
    let client = client_for(&server);

    let refused = client.problem("http://127.0.0.1:1/").await;
    assert!(matches!(refused, Err(Error::Network(_))), "{refused:?}");

    let not_found = client
        .problem(&format!("{}/contest/1/problem/Z", server.uri()))
        .await;
    assert!(matches!(not_found, Err(Error::Network(_))), "{not_found:?}");

    let problem = client
        .problem(&format!("{}{PROBLEM_PATH}", server.uri()))
        .await
        .expect("problem after failures");
    assert_eq!(problem.title, "A. Next Round");
}

#[tokio::test]
async fn invalid_url_is_a_network_error() {
    let client = Client::new();
    let result = client.fetch("not a url").await;

    assert!(matches!(result, Err(Error::Network(_))));
}

#[tokio::test]
async fn empty_body_is_a_parse_error() {
    let server = serve(PROBLEM_PATH, ResponseTemplate::new(200)).await;
    let client = client_for(&server);
    let id: ProblemId = "158A".parse().unwrap();
    let result = client.problem_by_id(&id).await;

    assert!(matches!(result, Err(Error::Parse(ParseError::Empty))));
}

#[tokio::test]
async fn body_is_decoded_with_declared_charset() {
    let body = b"<div class=\"time-limit\">2 \xf1\xe5\xea\xf3\xed\xe4\xfb</div>".to_vec();
    let server = serve(
        PROBLEM_PATH,
        ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=windows-1251"),
    )
    .await;
    let client = client_for(&server);
    let id: ProblemId = "158A".parse().unwrap();
    let problem = client.problem_by_id(&id).await.expect("problem");

    assert_eq!(problem.time_limit, "2 секунды");
}

#[tokio::test]
async fn concurrent_fetches_are_independent() {
    let server = serve_problem().await;
    let client = client_for(&server);
    let url = format!("{}{PROBLEM_PATH}", server.uri());

    let (first, second, failed) = tokio::join!(
        client.problem(&url),
        client.problem(&url),
        client.problem("http://127.0.0.1:1/"),
    );

    assert_eq!(first.expect("first"), second.expect("second"));
    assert!(matches!(failed, Err(Error::Network(_))));
}
