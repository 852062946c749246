//! Search and render integration tests using LocalStack.
//!
//! These tests run the searcher against a real S3 API, across several
//! listing pages, and render what it saved.

use crate::common::{LocalStackTestContext, login_log};
use sift_error::{SiftError, StoreError};
use sift_render::{DisplayZone, LineFormatter, RenderConfig, Renderer};
use sift_search::{
    DirectorySink, S3Store, SearchConfig, SearchSummary, Searcher, create_s3_client,
};
use sift_types::KeywordSet;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

async fn search(
    ctx: &LocalStackTestContext,
    bucket: &str,
    prefix: Option<&str>,
    logs_dir: &Path,
    keywords: &[&str],
) -> sift_error::Result<SearchSummary> {
    let mut s3_config = ctx.s3_config(bucket);
    if let Some(prefix) = prefix {
        s3_config = s3_config.with_prefix(prefix);
    }

    let client = create_s3_client(&s3_config).await?;
    let searcher = Searcher::new(
        Arc::new(S3Store::new(client, &s3_config)),
        Arc::new(DirectorySink::new(logs_dir)),
        KeywordSet::new(keywords.iter().copied()),
        SearchConfig::new().with_page_size(10).with_workers(4),
    );

    searcher.run().await
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_search_across_pages() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "test-search-pages";
    ctx.create_bucket(bucket).await.unwrap();

    // 35 objects over 4 pages of 10; every fifth one is a login
    for i in 0..35 {
        let key = format!("evt-{:03}", i);
        let body = if i % 5 == 0 {
            login_log(&format!("u{}", i % 3), "", i)
        } else {
            r#"{"data":{"userId":"u9","status":"success"},"meta":{"resource":"/api/ping"}}"#
                .to_string()
        };
        ctx.put_object(bucket, &key, &body).await.unwrap();
    }

    let dir = TempDir::new().unwrap();
    let summary = search(&ctx, bucket, None, dir.path(), &["auth/login"])
        .await
        .unwrap();

    assert_eq!(summary.objects_listed, 35);
    assert_eq!(summary.objects_fetched, 35);
    assert_eq!(summary.objects_matched, 7);
    assert!(summary.pages_listed >= 4);
    assert!(!summary.has_warnings());

    assert!(dir.path().join("u0").join("evt-000.json").is_file());
    assert!(dir.path().join("u2").join("evt-005.json").is_file());
    assert!(dir.path().join("u1").join("evt-010.json").is_file());
    assert!(!dir.path().join("u9").exists());

    let saved = std::fs::read_to_string(dir.path().join("u0").join("evt-000.json")).unwrap();
    assert_eq!(saved, login_log("u0", "", 0));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_search_with_prefix() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "test-search-prefix";
    ctx.create_bucket(bucket).await.unwrap();

    ctx.put_object(bucket, "2024/a", &login_log("u1", "", 0))
        .await
        .unwrap();
    ctx.put_object(bucket, "2025/b", &login_log("u2", "", 0))
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let summary = search(&ctx, bucket, Some("2025/"), dir.path(), &["auth/login"])
        .await
        .unwrap();

    assert_eq!(summary.objects_listed, 1);
    assert!(dir.path().join("u2").join("2025%2Fb.json").is_file());
    assert!(!dir.path().join("u1").exists());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_missing_bucket_fails() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let dir = TempDir::new().unwrap();
    let result = search(&ctx, "test-search-no-such-bucket", None, dir.path(), &["x"]).await;

    assert!(matches!(
        result,
        Err(SiftError::Store(StoreError::List { .. }))
    ));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_search_then_render() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "test-search-render";
    ctx.create_bucket(bucket).await.unwrap();

    ctx.put_object(bucket, "one", &login_log("u1", "a@b.com", 0))
        .await
        .unwrap();
    ctx.put_object(bucket, "two", &login_log("u1", "", 60_000))
        .await
        .unwrap();
    ctx.put_object(bucket, "broken", "auth/login {")
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let logs_dir = dir.path().join("logs");
    let summary = search(&ctx, bucket, None, &logs_dir, &["auth/login"])
        .await
        .unwrap();
    assert_eq!(summary.objects_matched, 3);
    assert_eq!(summary.warnings.len(), 1);

    let config = RenderConfig::new()
        .with_logs_dir(&logs_dir)
        .with_events_dir(dir.path().join("events"))
        .with_out_dir(dir.path().join("out"));
    let formatter = LineFormatter::default().with_zone(DisplayZone::Utc);
    let rendered = Renderer::new(config, formatter).run().unwrap();

    assert_eq!(rendered.files_rendered, 3);
    assert_eq!(rendered.users, 2);

    let event =
        std::fs::read_to_string(dir.path().join("events").join("u1").join("one.json.txt"))
            .unwrap();
    assert_eq!(
        event,
        "User a@b.com, has success to log in at 01-01-1970, 00:00:00, from IP 10.0.0.2, \
         OS linux, userAgent curl/8.0. Server Response: {\"ok\":true}\n"
    );

    let summary_file = std::fs::read_to_string(dir.path().join("out").join("u1.csv")).unwrap();
    assert_eq!(summary_file.lines().count(), 2);
    assert!(dir.path().join("out").join("null.csv").is_file());
}
