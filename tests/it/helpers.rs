//! 集成测试共用的数据和工具

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bishoujo_table::{
    ColumnType, ExportError, ExportTrigger, Rasterizer, RelationMap, RenderedTable, RowCharacter,
    TableFrame, TableModel,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const FRAME_JSON: &str = r#"{
    "row_characters": [
        {"jp": "愛", "cn": "Love", "tachie": "ai.png"},
        {"jp": "恋", "cn": "Koi"},
        {"jp": "夢", "cn": "Dream"}
    ],
    "col_types": [
        {"jp": "力", "cn": "Strength"},
        {"jp": "心", "cn": "Heart"},
        {"cn": "其他"},
        {"jp": "空", "cn": "Sky"}
    ]
}"#;

pub const RELATION_JSON: &str = r#"{
    "力": {"愛": 1, "夢": 1},
    "心": {"恋": 1, "夢": 0}
}"#;

pub fn row(jp: &str, cn: &str) -> RowCharacter {
    RowCharacter {
        jp: jp.to_string(),
        cn: cn.to_string(),
        tachie: None,
    }
}

pub fn column(jp: &str, cn: &str) -> ColumnType {
    ColumnType {
        jp: Some(jp.to_string()),
        cn: cn.to_string(),
    }
}

pub fn sample_frame() -> TableFrame {
    serde_json::from_str(FRAME_JSON).unwrap()
}

pub fn sample_relation() -> RelationMap {
    serde_json::from_str(RELATION_JSON).unwrap()
}

pub fn sample_model() -> TableModel {
    TableModel::new(sample_frame(), sample_relation()).unwrap()
}

/// 把两份文档写入 `dir`
pub fn write_documents(dir: &Path, frame: &str, relation: &str) {
    std::fs::write(dir.join("table_frame.json"), frame).unwrap();
    std::fs::write(dir.join("character_hs.json"), relation).unwrap();
}

/// 总是失败的栅格化实现
pub struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, _table: &RenderedTable, _scale: f32) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Rasterize("boom".to_string()))
    }
}

/// 栅格化过程中直接 panic
pub struct PanickingRasterizer;

impl Rasterizer for PanickingRasterizer {
    fn rasterize(&self, _table: &RenderedTable, _scale: f32) -> Result<Vec<u8>, ExportError> {
        panic!("rasterizer crashed");
    }
}

/// 第一次失败，之后交给内部实现
pub struct FlakyRasterizer {
    failed_once: AtomicBool,
    inner: Arc<dyn Rasterizer>,
}

impl FlakyRasterizer {
    pub fn new(inner: Arc<dyn Rasterizer>) -> Self {
        Self {
            failed_once: AtomicBool::new(false),
            inner,
        }
    }
}

impl Rasterizer for FlakyRasterizer {
    fn rasterize(&self, table: &RenderedTable, scale: f32) -> Result<Vec<u8>, ExportError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(ExportError::Rasterize("first attempt".to_string()));
        }
        self.inner.rasterize(table, scale)
    }
}

pub fn exporter(rasterizer: Arc<dyn Rasterizer>, dir: &Path) -> ExportTrigger {
    ExportTrigger::new(rasterizer, dir.join("bishoujo-table.webp"), 1.0)
}

/// 按路径返回固定内容的简易 HTTP 服务，未知路径返回 404
pub async fn serve(routes: HashMap<&'static str, (u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                let (status, body) = routes.get(path.as_str()).copied().unwrap_or((404, ""));
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
