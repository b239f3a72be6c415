//! Integration tests for the link crawler

use crate::common::{html_page, mount_page, test_config, test_crawler};
use site_harvest::crawler::crawl_sites;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_depth_zero_records_seed_and_its_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            r#"<a href="/menu">Menu</a>
               <a href="https://other.org/x">Partner</a>
               <a href="mailto:owner@example.com">Mail</a>
               <a href="javascript:void(0)">Nothing</a>"#,
        ),
        1,
    )
    .await;
    mount_page(&server, "/menu", html_page("Menu", ""), 0).await;

    let seed = format!("{}/", base);
    let outcome = test_crawler(0).crawl(&seed).await.unwrap();

    let mut expected = vec![
        format!("{}/", base),
        format!("{}/menu", base),
        "https://other.org/x".to_string(),
    ];
    expected.sort();

    assert_eq!(outcome.links.iter().cloned().collect::<Vec<_>>(), expected);
    assert_eq!(outcome.pages_fetched, 1);
    assert_eq!(outcome.visited.len(), 1);
}

#[tokio::test]
async fn test_image_and_social_links_recorded_but_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            r#"<a href="image.jpg">Photo</a>
               <a href="https://facebook.com/page">Facebook</a>
               <a href="/about">About</a>"#,
        ),
        1,
    )
    .await;
    mount_page(&server, "/about", html_page("About", ""), 1).await;

    Mock::given(method("GET"))
        .and(path("/image.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = test_crawler(1).crawl(&format!("{}/", base)).await.unwrap();

    assert!(outcome.links.contains(&format!("{}/image.jpg", base)));
    assert!(outcome.links.contains("https://facebook.com/page"));
    assert!(outcome.links.contains(&format!("{}/about", base)));
    assert_eq!(outcome.pages_fetched, 2);
}

#[tokio::test]
async fn test_each_page_fetched_at_most_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            r#"<a href="/a">A</a><a href="/b">B</a><a href="/a#top">A again</a>"#,
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/a",
        html_page("A", r#"<a href="/b">B</a><a href="/">Home</a><a href="/a/">Self</a>"#),
        1,
    )
    .await;
    mount_page(
        &server,
        "/b",
        html_page("B", r#"<a href="/a">A</a><a href="/c">C</a>"#),
        1,
    )
    .await;
    mount_page(&server, "/c", html_page("C", r#"<a href="/">Home</a>"#), 1).await;

    let outcome = test_crawler(5).crawl(&format!("{}/", base)).await.unwrap();

    assert_eq!(outcome.pages_fetched, 4);
    assert_eq!(outcome.visited.len(), 4);
}

#[tokio::test]
async fn test_depth_limit_stops_following() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html_page("Home", r#"<a href="/one">1</a>"#), 1).await;
    mount_page(&server, "/one", html_page("One", r#"<a href="/two">2</a>"#), 1).await;
    mount_page(&server, "/two", html_page("Two", ""), 0).await;

    let outcome = test_crawler(1).crawl(&format!("{}/", base)).await.unwrap();

    // Discovered at depth 1, so recorded but never fetched
    assert!(outcome.links.contains(&format!("{}/two", base)));
    assert_eq!(outcome.pages_fetched, 2);
}

#[tokio::test]
async fn test_timeout_and_error_pages_leave_consistent_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            r#"<a href="/slow">Slow</a><a href="/missing">Missing</a><a href="/fast">Fast</a>"#,
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html_page("Slow", r#"<a href="/hidden">Hidden</a>"#), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    mount_page(&server, "/fast", html_page("Fast", r#"<a href="/deep">Deep</a>"#), 1).await;
    mount_page(&server, "/deep", html_page("Deep", ""), 1).await;

    let outcome = test_crawler(2).crawl(&format!("{}/", base)).await.unwrap();

    assert_eq!(outcome.fetch_failures, 2);
    assert!(outcome.links.contains(&format!("{}/slow", base)));
    assert!(outcome.links.contains(&format!("{}/deep", base)));
    assert!(!outcome.links.contains(&format!("{}/hidden", base)));
    assert_eq!(outcome.visited.len(), 5);
}

#[tokio::test]
async fn test_non_html_page_contributes_no_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", html_page("Home", r#"<a href="/menu.pdf">Menu</a>"#), 1).await;

    Mock::given(method("GET"))
        .and(path("/menu.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/secret">x</a>"#, "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_crawler(2).crawl(&format!("{}/", base)).await.unwrap();

    assert_eq!(outcome.pages_fetched, 2);
    assert!(!outcome.links.contains(&format!("{}/secret", base)));
}

#[tokio::test]
async fn test_crawl_sites_writes_sorted_link_file() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        html_page("Home", r#"<a href="/zebra">Z</a><a href="/apple">A</a>"#),
        1,
    )
    .await;

    let config = test_config(dir.path(), 0);
    let seeds = vec![format!("{}/", base)];

    let reports = crawl_sites(&config, &seeds).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].scope_host, "127.0.0.1");
    assert_eq!(reports[0].links_recorded, 3);

    let link_file = dir.path().join("href").join("127.0.0.1.txt");
    assert_eq!(reports[0].link_file.as_deref(), Some(link_file.as_path()));

    let content = fs::read_to_string(&link_file).unwrap();
    assert_eq!(
        content,
        format!("{base}/\n{base}/apple\n{base}/zebra\n", base = base)
    );
}

#[tokio::test]
async fn test_failed_link_write_does_not_stop_later_seeds() {
    let server = MockServer::start().await;
    let base = server.uri();
    let port = server.address().port();
    let dir = TempDir::new().unwrap();

    // Served once for the 127.0.0.1 seed and once for the localhost seed
    mount_page(
        &server,
        "/",
        html_page("Home", r#"<a href="/menu">Menu</a>"#),
        2,
    )
    .await;

    // A directory in place of the link file makes the first write fail
    let href_dir = dir.path().join("href");
    fs::create_dir_all(href_dir.join("127.0.0.1.txt")).unwrap();

    let localhost_seed = format!("http://localhost:{}/", port);
    let seeds = vec![
        base.clone(),
        "ftp://files.example.com/".to_string(),
        localhost_seed.clone(),
    ];

    let config = test_config(dir.path(), 0);
    let reports = crawl_sites(&config, &seeds).await.unwrap();

    // The ftp seed cannot be crawled and gets no report
    assert_eq!(reports.len(), 2);

    assert_eq!(reports[0].seed, base);
    assert_eq!(reports[0].scope_host, "127.0.0.1");
    assert!(reports[0].link_file.is_none());

    let link_file = href_dir.join("localhost.txt");
    assert_eq!(reports[1].seed, localhost_seed);
    assert_eq!(reports[1].link_file.as_deref(), Some(link_file.as_path()));
    assert_eq!(
        fs::read_to_string(&link_file).unwrap(),
        format!("{seed}\n{seed}menu\n", seed = localhost_seed)
    );
}
