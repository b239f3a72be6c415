//! Integration tests for the extraction pass

use crate::common::{html_page, mount_page, test_config};
use site_harvest::extract::{extract_all, EXTRACTION_ERROR_PREFIX};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_extraction_persists_content_errors_and_placeholders() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), 1);

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            "<nav>Skip me</nav><main><p>Fresh bread daily</p></main>",
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/menu.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let href_dir = dir.path().join("href");
    fs::create_dir_all(&href_dir).unwrap();
    fs::write(
        href_dir.join("127.0.0.1.txt"),
        format!("{base}/\n\n{base}/gone\n{base}/menu.pdf\n", base = base),
    )
    .unwrap();

    let reports = extract_all(&config).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].domain, "127.0.0.1");
    assert_eq!(reports[0].urls, 3);
    assert_eq!(reports[0].processed, 2);
    assert_eq!(reports[0].failed, 1);

    let domain_dir = dir.path().join("data").join("127.0.0.1");

    let home = fs::read_to_string(domain_dir.join("index.txt")).unwrap();
    assert!(home.starts_with(&format!("Title: Home\nURL: {}/\n", base)));
    assert!(home.contains("Fresh bread daily"));
    assert!(!home.contains("Skip me"));

    let gone = fs::read_to_string(domain_dir.join("gone.txt")).unwrap();
    assert!(gone.starts_with(EXTRACTION_ERROR_PREFIX));
    assert!(gone.contains("404"));

    let pdf = fs::read_to_string(domain_dir.join("menu.pdf.txt")).unwrap();
    assert_eq!(pdf, "[Non-HTML content: application/pdf]");
}

#[tokio::test]
async fn test_rerun_makes_no_new_requests() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), 1);

    // Each page may be requested once across both passes
    mount_page(&server, "/", html_page("Home", "<p>Welcome</p>"), 1).await;
    mount_page(&server, "/about", html_page("About", "<p>Since 1990</p>"), 1).await;

    let href_dir = dir.path().join("href");
    fs::create_dir_all(&href_dir).unwrap();
    fs::write(
        href_dir.join("127.0.0.1.txt"),
        format!("{base}/\n{base}/about\n", base = base),
    )
    .unwrap();

    let first = extract_all(&config).await.unwrap();
    assert_eq!(first[0].fetched(), 2);
    assert_eq!(first[0].skipped, 0);

    let second = extract_all(&config).await.unwrap();
    assert_eq!(second[0].fetched(), 0);
    assert_eq!(second[0].skipped, 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}
