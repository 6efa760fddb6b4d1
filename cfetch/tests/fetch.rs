use cfetch::{Cfetch, Config, Error, Target};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBLEM_HTML: &str = include_str!("../../cf-statement/tests/fixtures/problems/158A.html");

fn page(title: &str) -> String {
    format!(
        "<div class=\"problem-statement\"><div class=\"header\"><div class=\"title\">{title}</div>\
         </div><div><p>Statement of {title}.</p></div></div>"
    )
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn cfetch_for(server: &MockServer, concurrency: usize) -> Cfetch {
    let config = Config {
        base_url: Url::parse(&server.uri()).expect("mock server uri"),
        concurrency,
        ..Config::default()
    };

    Cfetch::new(config).expect("cfetch")
}

#[tokio::test]
async fn fetch_by_id() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/contest/158/problem/A",
        ResponseTemplate::new(200).set_body_raw(PROBLEM_HTML, "text/html; charset=utf-8"),
    )
    .await;

    let cfetch = cfetch_for(&server, 1);
    let problem = cfetch
        .fetch(&"158A".parse().unwrap())
        .await
        .expect("problem");

    assert_eq!(problem.title, "A. Next Round");
    assert_eq!(problem.time_limit_ms(), Some(3000));
    assert_eq!(problem.samples[1].output, "0\n");
    assert_eq!(problem.tags, vec!["*special problem", "implementation"]);
    assert_eq!(problem.difficulty, Some(800));
}

#[tokio::test]
async fn fetch_all_keeps_order_and_isolates_failures() {
    let server = MockServer::start().await;

    // The first page is the slowest so that completion order differs from request order.
    mount(
        &server,
        "/contest/1/problem/A",
        ResponseTemplate::new(200)
            .set_body_raw(page("A. First"), "text/html")
            .set_delay(std::time::Duration::from_millis(200)),
    )
    .await;
    mount(&server, "/contest/1/problem/B", ResponseTemplate::new(500)).await;
    mount(
        &server,
        "/contest/1/problem/C",
        ResponseTemplate::new(200).set_body_raw(page("C. Third"), "text/html"),
    )
    .await;

    let cfetch = cfetch_for(&server, 3);
    let targets: Vec<Target> = ["1A", "1B", format!("{}/contest/1/problem/C", server.uri()).as_str()]
        .iter()
        .map(|target| target.parse().unwrap())
        .collect();
    let results = cfetch.fetch_all(&targets).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().title, "A. First");
    assert_eq!(results[0].as_ref().unwrap().statement, "Statement of A. First.");
    assert!(
        matches!(&results[1], Err(Error::Fetch { target, source: cf_statement::Error::Network(_) }) if target == "1B"),
        "{:?}",
        results[1]
    );
    assert_eq!(results[2].as_ref().unwrap().title, "C. Third");
}

#[tokio::test]
async fn fetch_all_with_zero_concurrency_still_runs() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/contest/2/problem/A",
        ResponseTemplate::new(200).set_body_raw(page("A. Only"), "text/html"),
    )
    .await;

    let cfetch = cfetch_for(&server, 0);
    let results = cfetch.fetch_all(&["2A".parse().unwrap()]).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap().title, "A. Only");
}
