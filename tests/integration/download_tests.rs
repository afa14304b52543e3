//! Downloads over HTTP into a node directory

use crate::common::zip_bytes;
use portal_mirror::download::{DownloadOutcome, Downloader};
use portal_mirror::mirror::MirrorWriter;
use portal_mirror::transport::HttpFetcher;
use portal_mirror::{LeafResource, RunContext};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resource(server: &MockServer, oid: u32, name: &str) -> LeafResource {
    LeafResource {
        url: Url::parse(&format!("{}/Portal/Show.aspx?oid={}", server.uri(), oid)).unwrap(),
        suggested_name: name.to_string(),
    }
}

async fn mount(server: &MockServer, oid: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/Portal/Show.aspx"))
        .and(query_param("oid", oid.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

fn downloader(out: &TempDir) -> Downloader<HttpFetcher> {
    Downloader::new(
        HttpFetcher::new(reqwest::Client::new()),
        MirrorWriter::new(out.path()),
        Duration::ZERO,
    )
}

#[tokio::test]
async fn test_extended_disposition_name_used() {
    let server = MockServer::start().await;
    mount(
        &server,
        1,
        ResponseTemplate::new(200)
            .insert_header(
                "content-disposition",
                "attachment; filename*=UTF-8''p%C5%99%C3%ADloha%20%C4%8D.%205.pdf",
            )
            .set_body_bytes(b"%PDF-1.4".to_vec()),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    let outcome = dl
        .download_resource(&resource(&server, 1, "priloha"), out.path(), &mut ctx)
        .await;

    let expected = out.path().join("příloha č. 5.pdf");
    assert_eq!(outcome, DownloadOutcome::Saved { path: expected.clone() });
    assert_eq!(std::fs::read(expected).unwrap(), b"%PDF-1.4");
}

#[tokio::test]
async fn test_link_text_with_content_type_extension() {
    let server = MockServer::start().await;
    mount(
        &server,
        2,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/pdf")
            .set_body_bytes(b"%PDF".to_vec()),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    dl.download_resource(&resource(&server, 2, "Tabulka 1.2 - úsek"), out.path(), &mut ctx)
        .await;

    assert!(out.path().join("Tabulka 1.2 - úsek.pdf").exists());
    assert_eq!(ctx.files_saved, 1);
}

#[tokio::test]
async fn test_zip_payload_is_expanded() {
    let server = MockServer::start().await;
    mount(
        &server,
        3,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/x-zip-compressed")
            .set_body_bytes(zip_bytes(&[("vykres.pdf", b"A"), ("data/tab.xlsx", b"B")])),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    let outcome = dl
        .download_resource(&resource(&server, 3, "Podklady"), out.path(), &mut ctx)
        .await;

    assert!(matches!(outcome, DownloadOutcome::Unpacked { ref files, .. } if files.len() == 2));
    assert!(out.path().join("vykres.pdf").exists());
    assert!(out.path().join("data").join("tab.xlsx").exists());
    assert!(!out.path().join("Podklady.zip").exists());
    assert_eq!(ctx.archives_unpacked, 1);
}

#[tokio::test]
async fn test_zip_named_non_archive_is_kept() {
    let server = MockServer::start().await;
    mount(
        &server,
        4,
        ResponseTemplate::new(200)
            .insert_header("content-disposition", "attachment; filename=\"export.zip\"")
            .set_body_bytes(b"<html>session expired</html>".to_vec()),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    let outcome = dl
        .download_resource(&resource(&server, 4, "export"), out.path(), &mut ctx)
        .await;

    let kept = out.path().join("export.zip");
    assert_eq!(outcome, DownloadOutcome::ArchiveKept { path: kept.clone() });
    assert_eq!(std::fs::read(kept).unwrap(), b"<html>session expired</html>");
    assert_eq!(ctx.archives_kept, 1);
}

#[tokio::test]
async fn test_error_status_skipped_and_next_resource_downloaded() {
    let server = MockServer::start().await;
    mount(&server, 5, ResponseTemplate::new(404)).await;
    mount(
        &server,
        6,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/pdf")
            .set_body_bytes(b"ok".to_vec()),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    let first = dl
        .download_resource(&resource(&server, 5, "missing"), out.path(), &mut ctx)
        .await;
    let second = dl
        .download_resource(&resource(&server, 6, "present"), out.path(), &mut ctx)
        .await;

    assert_eq!(first, DownloadOutcome::Skipped { status: 404 });
    assert_eq!(
        second,
        DownloadOutcome::Saved {
            path: out.path().join("present.pdf")
        }
    );
    let names: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("present.pdf")]);
    assert_eq!(ctx.downloads_skipped, 1);
    assert_eq!(ctx.files_saved, 1);
}

#[tokio::test]
async fn test_same_name_twice_in_one_run() {
    let server = MockServer::start().await;
    for oid in [7, 8] {
        mount(
            &server,
            oid,
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"plan.pdf\"")
                .set_body_bytes(format!("v{}", oid).into_bytes()),
        )
        .await;
    }

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    dl.download_resource(&resource(&server, 7, "Plán"), out.path(), &mut ctx)
        .await;
    dl.download_resource(&resource(&server, 8, "Plán"), out.path(), &mut ctx)
        .await;

    assert_eq!(std::fs::read(out.path().join("Plán.pdf")).unwrap(), b"v7");
    assert_eq!(std::fs::read(out.path().join("Plán (2).pdf")).unwrap(), b"v8");
}

#[tokio::test]
async fn test_zip_member_does_not_replace_saved_file() {
    let server = MockServer::start().await;
    mount(
        &server,
        20,
        ResponseTemplate::new(200)
            .insert_header("content-disposition", "attachment; filename=\"plan.pdf\"")
            .set_body_bytes(b"ORIGINAL".to_vec()),
    )
    .await;
    mount(
        &server,
        21,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/zip")
            .set_body_bytes(zip_bytes(&[("plan.pdf", b"FROM_ZIP")])),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut dl = downloader(&out);
    let mut ctx = RunContext::new();

    dl.download_resource(&resource(&server, 20, "plan"), out.path(), &mut ctx)
        .await;
    let outcome = dl
        .download_resource(&resource(&server, 21, "balik"), out.path(), &mut ctx)
        .await;

    assert_eq!(
        outcome,
        DownloadOutcome::Unpacked {
            archive: out.path().join("balik.zip"),
            files: vec![out.path().join("plan (2).pdf")],
        }
    );
    assert_eq!(std::fs::read(out.path().join("plan.pdf")).unwrap(), b"ORIGINAL");
    assert_eq!(
        std::fs::read(out.path().join("plan (2).pdf")).unwrap(),
        b"FROM_ZIP"
    );
}
