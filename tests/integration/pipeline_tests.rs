//! End-to-end tests running every stage against a mock site

use crate::common::{html_page, mount_page, test_config};
use site_harvest::config::load_seeds;
use site_harvest::crawler::crawl_sites;
use site_harvest::extract::extract_all;
use site_harvest::knowledge::{build_documents, read_documents, write_documents};
use site_harvest::output::merge_all;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::MockServer;

const MENU_BODY: &str = r#"<main>
    <h1>Our Menu</h1>
    <p>Classic burger with cheddar and pickles.</p>
    <p>Garden salad with seasonal greens and lemon dressing.</p>
    <p>Hand cut fries served with house made ketchup.</p>
    <p>Find more on <a href="https://partner.invalid/deals">our partner site</a>.</p>
</main>"#;

#[tokio::test]
async fn test_full_pipeline_produces_documents() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), 1);

    mount_page(
        &server,
        "/",
        html_page("Home", r#"<main><a href="/menu">Menu</a></main>"#),
        2,
    )
    .await;
    mount_page(&server, "/menu", html_page("Menu", MENU_BODY), 2).await;

    fs::write(&config.paths.websites, format!("{}/\n", base)).unwrap();
    let seeds = load_seeds(Path::new(&config.paths.websites)).unwrap();

    // crawl
    let crawl_reports = crawl_sites(&config, &seeds).await.unwrap();
    assert_eq!(crawl_reports[0].links_recorded, 3);

    // extract
    let extraction_reports = extract_all(&config).await.unwrap();
    assert_eq!(extraction_reports[0].processed, 2);
    assert_eq!(extraction_reports[0].failed, 1);

    // merge
    let merge_reports = merge_all(
        Path::new(&config.paths.data_dir),
        Path::new(&config.paths.structured_dir),
    )
    .unwrap();
    assert_eq!(merge_reports.len(), 1);
    // The error record for the external link is too short to merge
    assert!(merge_reports[0].files_skipped >= 1);

    let merged = fs::read_to_string(&merge_reports[0].output).unwrap();
    assert!(merged.starts_with("Merged content for 127.0.0.1\n"));
    assert!(merged.contains("SECTION: menu\n"));
    assert!(merged.contains("Classic burger"));
    assert!(!merged.contains("http://"));
    assert!(!merged.contains("https://"));

    // documents
    let documents = build_documents(Path::new(&config.paths.structured_dir), &seeds).unwrap();
    let doc = documents
        .iter()
        .find(|d| d.metadata.section == "menu")
        .expect("menu section becomes a document");
    assert_eq!(doc.metadata.domain, "127.0.0.1");
    assert_eq!(doc.metadata.title, "Menu");
    assert_eq!(doc.metadata.source, format!("{}/", base));
    assert!(doc.page_content.contains("Garden salad"));

    let documents_path = Path::new(&config.paths.documents);
    write_documents(documents_path, &documents).unwrap();
    assert_eq!(read_documents(documents_path).unwrap(), documents);
}
