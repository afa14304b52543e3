//! End-to-end mirror runs against a mock portal

use crate::common::{article_at, menu_page, test_config, write_session_state, zip_bytes};
use portal_mirror::crawler::run_mirror;
use portal_mirror::MirrorError;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, oid: u32, html: String) {
    Mock::given(method("GET"))
        .and(path("/Portal/ViewArticle.aspx"))
        .and(query_param("oid", oid.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}

async fn mount_resource(server: &MockServer, oid: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/Portal/Show.aspx"))
        .and(query_param("oid", oid.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_mirror_run() {
    let server = MockServer::start().await;
    let base = format!("{}/Portal/", server.uri());

    let items = r#"
        <li><a href="ViewArticle.aspx?oid=2">Praha: uzel</a></li>
        <li><a href="ViewArticle.aspx?oid=3">XML</a></li>"#;

    mount_page(
        &server,
        1,
        menu_page(
            items,
            r#"<a href="Show.aspx?oid=10">Úvod</a>
               <a href="ViewArticle.aspx?oid=2">not a resource</a>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        2,
        menu_page(
            items,
            r#"<a href="Show.aspx?oid=11">Výkresy</a>
               <a href="Show.aspx?oid=12">Chybí</a>
               <a href="Show.aspx?oid=11#dup">Výkresy znovu</a>"#,
        ),
    )
    .await;
    mount_page(&server, 3, menu_page(items, r#"<a href="Show.aspx?oid=13">x</a>"#)).await;

    mount_resource(
        &server,
        10,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/pdf")
            .set_body_bytes(b"%PDF".to_vec()),
    )
    .await;
    mount_resource(
        &server,
        11,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/zip")
            .set_body_bytes(zip_bytes(&[("list1.pdf", b"1"), ("list2.pdf", b"2")])),
    )
    .await;
    mount_resource(&server, 12, ResponseTemplate::new(404)).await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("SZ_TTP");
    let session = tmp.path().join("auth.json");
    write_session_state(&session, "127.0.0.1");

    let config = test_config(&article_at(&base, 1), &out, &session, &["xml"]);
    let ctx = run_mirror(&config).await.unwrap();

    assert_eq!(ctx.nodes_collected, 2);
    assert_eq!(ctx.nodes_excluded, 1);
    assert_eq!(ctx.resources_found, 3);
    assert_eq!(ctx.files_saved, 1);
    assert_eq!(ctx.archives_unpacked, 1);
    assert_eq!(ctx.downloads_skipped, 1);

    let root_dir = out.join("TTP");
    assert_eq!(std::fs::read(root_dir.join("Úvod.pdf")).unwrap(), b"%PDF");

    let node_dir = out.join("TTP - Praha_ uzel");
    assert!(node_dir.join("list1.pdf").exists());
    assert!(node_dir.join("list2.pdf").exists());
    assert!(!node_dir.join("Výkresy.zip").exists());
    assert!(!node_dir.join("Chybí").exists());

    assert!(!out.join("TTP - XML").exists());

    let requests = server.received_requests().await.unwrap();
    assert!(!requests
        .iter()
        .any(|r| r.url.query() == Some("oid=3") || r.url.query() == Some("oid=13")));
}

#[tokio::test]
async fn test_missing_session_aborts_before_network() {
    let server = MockServer::start().await;
    let base = format!("{}/Portal/", server.uri());

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let config = test_config(
        &article_at(&base, 1),
        &out,
        &tmp.path().join("missing.json"),
        &[],
    );

    let result = run_mirror(&config).await;

    assert!(matches!(
        result,
        Err(MirrorError::MissingSessionState { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_rerun_overwrites_in_place() {
    let server = MockServer::start().await;
    let base = format!("{}/Portal/", server.uri());

    mount_page(
        &server,
        1,
        menu_page("", r#"<a href="Show.aspx?oid=10">Řád</a>"#),
    )
    .await;
    mount_resource(
        &server,
        10,
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/pdf")
            .set_body_bytes(b"%PDF".to_vec()),
    )
    .await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let session = tmp.path().join("auth.json");
    write_session_state(&session, "127.0.0.1");
    let config = test_config(&article_at(&base, 1), &out, &session, &[]);

    run_mirror(&config).await.unwrap();
    run_mirror(&config).await.unwrap();

    let files: Vec<_> = std::fs::read_dir(out.join("TTP"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(files, vec![std::ffi::OsString::from("Řád.pdf")]);
}
