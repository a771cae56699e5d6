//! 加载与导出的错误类型

use std::path::PathBuf;
use thiserror::Error;

/// 两份 JSON 任一失败都整体视为加载失败
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("无效的数据地址: {0}")]
    InvalidLocation(String),

    #[error("请求 {location} 失败 (状态码: {status})")]
    Status {
        location: String,
        status: reqwest::StatusCode,
    },

    #[error("网络请求 {location} 失败: {source}")]
    Transport {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("读取 {location} 失败: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("解析 {location} 失败: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("角色日文名重复: {0}")]
    DuplicateRowKey(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("表格尚未渲染完成")]
    NotRendered,

    #[error("栅格化失败: {0}")]
    Rasterize(String),

    #[error("图片编码失败: {0}")]
    Encode(#[from] image::ImageError),

    #[error("写入 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
