//! Integration tests for the scraper
//!
//! These tests use wiremock to serve catalogue pages and exercise the full
//! fetch, extract, filter and save cycle end-to-end.

use books_scrape::config::Config;
use books_scrape::crawler::{run_and_save, Driver, FetchError};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One product card as served by the catalogue
fn book(slug: &str, title: &str, price: &str) -> String {
    format!(
        r#"<li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
    <article class="product_pod">
        <h3><a href="{slug}/index.html" title="{title}">{title}</a></h3>
        <div class="product_price">
            <p class="price_color">{price}</p>
            <p class="instock availability">
                <i class="icon-ok"></i>
                    In stock
            </p>
        </div>
    </article>
</li>"#
    )
}

/// A catalogue page with the given cards and an optional "next" link
fn catalogue_page(books: &[String], next: Option<&str>) -> String {
    let next = next
        .map(|href| format!(r#"<li class="next"><a href="{href}">next</a></li>"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html><html lang="en-us"><head><title>All products | Books to Scrape - Sandbox</title></head>
<body><div class="page_inner"><section>
<ol class="row">{}</ol>
<div><ul class="pager"><li class="current">Page</li>{}</ul></div>
</section></div></body></html>"#,
        books.join("\n"),
        next
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html"))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_never_requested(server: &MockServer, page_path: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, pages: u32, out_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.scraper.start_url = format!("{}/catalogue/page-1.html", server.uri());
    config.scraper.pages = pages;
    config.scraper.delay_secs = 0.0;
    config.http.timeout_secs = 5;
    config.output.path = out_dir
        .path()
        .join("books.csv")
        .to_string_lossy()
        .into_owned();
    config
}

/// Mounts a three-page catalogue where page 3 is the last page
async fn mount_three_page_catalogue(server: &MockServer) {
    mount_page(
        server,
        "/catalogue/page-1.html",
        catalogue_page(
            &[
                book("a-light-in-the-attic_1000", "A Light in the Attic", "£51.77"),
                book("tipping-the-velvet_999", "Tipping the Velvet", "£53.74"),
            ],
            Some("page-2.html"),
        ),
    )
    .await;

    mount_page(
        server,
        "/catalogue/page-2.html",
        catalogue_page(
            &[
                book("soumission_998", "Soumission", "£50.10"),
                book("sharp-objects_997", "Sharp Objects", "£47.82"),
            ],
            Some("page-3.html"),
        ),
    )
    .await;

    mount_page(
        server,
        "/catalogue/page-3.html",
        catalogue_page(
            &[
                book("olio_984", "Olio", "£23.88"),
                book("mesaerion_983", "Mesaerion", "£37.59"),
            ],
            None,
        ),
    )
    .await;
}

#[tokio::test]
async fn test_stops_when_no_next_page() {
    let mock_server = MockServer::start().await;
    mount_three_page_catalogue(&mock_server).await;
    mount_never_requested(&mock_server, "/catalogue/page-4.html").await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, 5, &out_dir);

    let driver = Driver::new(&config).expect("Failed to create driver");
    let report = driver.run().await;

    assert!(report.halted.is_none());
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.total_rows(), 6);

    let indices: Vec<u32> = report.pages.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(
        report.pages[2].url.as_str(),
        format!("{}/catalogue/page-3.html", mock_server.uri())
    );

    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "A Light in the Attic",
            "Tipping the Velvet",
            "Soumission",
            "Sharp Objects",
            "Olio",
            "Mesaerion"
        ]
    );
}

#[tokio::test]
async fn test_stops_at_page_budget() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(&[book("a_1", "A", "£10.00")], Some("page-2.html")),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/page-2.html",
        catalogue_page(&[book("b_2", "B", "£20.00")], Some("page-3.html")),
    )
    .await;
    mount_never_requested(&mock_server, "/catalogue/page-3.html").await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, 2, &out_dir);

    let report = Driver::new(&config).unwrap().run().await;

    assert!(report.halted.is_none());
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.total_rows(), 2);
}

#[tokio::test]
async fn test_delay_between_successive_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(&[book("a_1", "A", "£10.00")], Some("page-2.html")),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/page-2.html",
        catalogue_page(&[book("b_2", "B", "£20.00")], None),
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, 2, &out_dir);
    config.scraper.delay_secs = 1.0;

    let driver = Driver::new(&config).unwrap();
    let started = Instant::now();
    let report = driver.run().await;
    let elapsed = started.elapsed();

    assert_eq!(report.pages.len(), 2);
    assert!(
        elapsed >= Duration::from_secs(1),
        "expected one pause between pages, run took {:?}",
        elapsed
    );
    assert!(
        elapsed < Duration::from_secs(2),
        "expected a single pause, run took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_no_delay_after_last_page() {
    let mock_server = MockServer::start().await;

    // Page budget of 1 with a next link: the run ends without pausing
    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(&[book("a_1", "A", "£10.00")], Some("page-2.html")),
    )
    .await;
    mount_never_requested(&mock_server, "/catalogue/page-2.html").await;

    let out_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, 1, &out_dir);
    config.scraper.delay_secs = 5.0;

    let driver = Driver::new(&config).unwrap();
    let started = Instant::now();
    let report = driver.run().await;
    let elapsed = started.elapsed();

    assert_eq!(report.pages.len(), 1);
    assert!(
        elapsed < Duration::from_secs(2),
        "single-page run should not sleep, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_fetch_failure_halts_run_and_saves_earlier_rows() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(
            &[
                book("a-light-in-the-attic_1000", "A Light in the Attic", "£51.77"),
                book("tipping-the-velvet_999", "Tipping the Velvet", "£53.74"),
            ],
            Some("page-2.html"),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_never_requested(&mock_server, "/catalogue/page-3.html").await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, 3, &out_dir);

    let report = run_and_save(&config).await.expect("CSV should still be written");

    // Fetching stopped at page 2
    assert_eq!(report.pages.len(), 1);
    match &report.halted {
        Some(FetchError::Status { url, status }) => {
            assert_eq!(*status, 500);
            assert!(url.ends_with("/catalogue/page-2.html"));
        }
        other => panic!("expected a status failure, got {:?}", other),
    }

    // Page 1 rows are saved
    let csv = std::fs::read_to_string(&config.output.path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "title,price_raw,price_value,stock,url");
    assert!(lines[1].starts_with("A Light in the Attic,£51.77,51.77,In stock,"));
    assert!(lines[2].starts_with("Tipping the Velvet,£53.74,53.74,In stock,"));
}

#[tokio::test]
async fn test_failure_on_first_page_writes_header_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, 3, &out_dir);

    let report = run_and_save(&config).await.unwrap();

    assert!(report.pages.is_empty());
    assert_eq!(report.halted.as_ref().and_then(|e| e.status()), Some(404));

    let csv = std::fs::read_to_string(&config.output.path).unwrap();
    assert_eq!(csv, "title,price_raw,price_value,stock,url\n");
}

#[tokio::test]
async fn test_price_filter_across_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(
            &[
                book("cheap_1", "Cheap", "£12.00"),
                book("boundary_2", "Boundary", "£25.00"),
                book("dear_3", "Dear", "£30.00"),
            ],
            Some("page-2.html"),
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/page-2.html",
        catalogue_page(
            &[
                book("unknown_4", "Unknown", "£N/A"),
                book("pricey_5", "Pricey", "£99.99"),
            ],
            None,
        ),
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, 3, &out_dir);
    config.scraper.max_price = Some(25.0);

    let report = run_and_save(&config).await.unwrap();

    let retained: Vec<usize> = report.pages.iter().map(|p| p.retained).collect();
    let extracted: Vec<usize> = report.pages.iter().map(|p| p.extracted).collect();
    assert_eq!(extracted, vec![3, 2]);
    assert_eq!(retained, vec![2, 1]);

    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Cheap", "Boundary", "Unknown"]);

    let csv = std::fs::read_to_string(&config.output.path).unwrap();
    assert!(csv.contains("\nUnknown,£N/A,,In stock,"));
}

#[tokio::test]
async fn test_latin1_served_page_normalizes_pound_sign() {
    let mock_server = MockServer::start().await;

    // UTF-8 bytes labelled as Latin-1 decode to "Â£"
    let body = catalogue_page(&[book("olio_984", "Olio", "£23.88")], None);
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.into_bytes(), "text/html; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, 1, &out_dir);

    let report = Driver::new(&config).unwrap().run().await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].price_raw, "£23.88");
    assert_eq!(report.records[0].price_value, Some(23.88));
}

#[tokio::test]
async fn test_csv_output_with_custom_delimiter() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(
            &[book(
                "sapiens-a-brief-history-of-humankind_996",
                "Sapiens: A Brief History of Humankind",
                "£54.23",
            )],
            None,
        ),
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, 1, &out_dir);
    config.output.delimiter = ';';

    run_and_save(&config).await.unwrap();

    let csv = std::fs::read_to_string(&config.output.path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "title;price_raw;price_value;stock;url");
    assert_eq!(
        lines[1],
        format!(
            "Sapiens: A Brief History of Humankind;£54.23;54.23;In stock;{}/catalogue/sapiens-a-brief-history-of-humankind_996/index.html",
            mock_server.uri()
        )
    );
}

#[tokio::test]
async fn test_malformed_entry_skipped_end_to_end() {
    let mock_server = MockServer::start().await;

    let no_stock = r#"<article class="product_pod">
        <h3><a href="no-stock_2/index.html" title="No Stock">No Stock</a></h3>
        <p class="price_color">£10.00</p>
    </article>"#
        .to_string();

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        catalogue_page(
            &[
                book("first_1", "First", "£11.00"),
                no_stock,
                book("third_3", "Third", "£13.00"),
            ],
            None,
        ),
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, 1, &out_dir);

    let report = Driver::new(&config).unwrap().run().await;

    assert_eq!(report.pages[0].extracted, 2);
    let titles: Vec<&str> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Third"]);
}
