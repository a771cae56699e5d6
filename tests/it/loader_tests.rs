//! DataLoader：本地与远程来源，加载的整体性

use std::collections::HashMap;
use std::time::Duration;

use bishoujo_table::config::DataConfig;
use bishoujo_table::{DataLoader, LoadError, Source};

use crate::helpers::{FRAME_JSON, RELATION_JSON, write_documents};

fn local_loader(dir: &std::path::Path) -> DataLoader {
    let config = DataConfig {
        base: dir.to_string_lossy().into_owned(),
        ..DataConfig::default()
    };
    DataLoader::from_config(&config).unwrap()
}

// 绕过环境变量里的代理设置
fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn loads_both_local_documents() {
    let dir = tempfile::tempdir().unwrap();
    write_documents(dir.path(), FRAME_JSON, RELATION_JSON);

    let (frame, relation) = local_loader(dir.path()).load().await.unwrap();
    assert_eq!(frame.row_characters.len(), 3);
    assert_eq!(frame.col_types.len(), 4);
    assert!(relation.is_set("力", "愛"));
    assert!(!relation.is_set("心", "夢"));
}

#[tokio::test]
async fn non_object_relation_columns_still_load() {
    let dir = tempfile::tempdir().unwrap();
    write_documents(dir.path(), FRAME_JSON, r#"{"力": {"愛": 1}, "心": null}"#);

    let (_, relation) = local_loader(dir.path()).load().await.unwrap();
    assert!(relation.is_set("力", "愛"));
    assert!(!relation.is_set("心", "恋"));
    assert!(!relation.contains_column("心"));
}

#[tokio::test]
async fn missing_relation_file_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("table_frame.json"), FRAME_JSON).unwrap();

    let err = local_loader(dir.path()).load().await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[tokio::test]
async fn malformed_frame_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write_documents(dir.path(), r#"{"row_characters": "nope"}"#, RELATION_JSON);

    let err = local_loader(dir.path()).load().await.unwrap_err();
    match err {
        LoadError::Parse { location, .. } => assert!(location.ends_with("table_frame.json")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn loads_documents_over_http() {
    let addr = crate::helpers::serve(HashMap::from([
        ("/data/table_frame.json", (200, FRAME_JSON)),
        ("/data/character_hs.json", (200, RELATION_JSON)),
    ]))
    .await;

    let base = format!("http://{}/data", addr);
    let loader = DataLoader::with_client(
        local_client(),
        Source::resolve(&base, "table_frame.json").unwrap(),
        Source::resolve(&base, "character_hs.json").unwrap(),
    );

    let (frame, relation) = loader.load().await.unwrap();
    assert_eq!(frame.row_characters[0].jp, "愛");
    assert!(relation.is_set("心", "恋"));
}

#[tokio::test]
async fn http_error_status_fails_whole_load() {
    let addr = crate::helpers::serve(HashMap::from([
        ("/table_frame.json", (200, FRAME_JSON)),
        ("/character_hs.json", (500, "")),
    ]))
    .await;

    let base = format!("http://{}/", addr);
    let loader = DataLoader::with_client(
        local_client(),
        Source::resolve(&base, "table_frame.json").unwrap(),
        Source::resolve(&base, "character_hs.json").unwrap(),
    );

    match loader.load().await.unwrap_err() {
        LoadError::Status { location, status } => {
            assert!(location.ends_with("/character_hs.json"));
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
