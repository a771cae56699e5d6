use reqwest::{Client, ClientBuilder, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::DataConfig;
use crate::error::LoadError;
use crate::models::{RelationMap, TableFrame};

/// 静态 JSON 文件的位置：远程地址或本地路径
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl Source {
    /// 按 base 拼接文件名，base 以 http(s):// 开头时视为远程
    pub fn resolve(base: &str, file: &str) -> Result<Source, LoadError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let base = if base.ends_with('/') {
                base.to_string()
            } else {
                format!("{}/", base)
            };
            let url = Url::parse(&base)
                .and_then(|b| b.join(file))
                .map_err(|e| LoadError::InvalidLocation(format!("{}{}: {}", base, file, e)))?;
            Ok(Source::Remote(url))
        } else {
            Ok(Source::Local(PathBuf::from(base).join(file)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct DataLoader {
    client: Client,
    frame: Source,
    relation: Source,
}

impl DataLoader {
    pub fn new(frame: Source, relation: Source, timeout: Duration) -> Result<Self, LoadError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Transport {
                location: "client".to_string(),
                source: e,
            })?;

        Ok(Self::with_client(client, frame, relation))
    }

    pub fn with_client(client: Client, frame: Source, relation: Source) -> Self {
        DataLoader {
            client,
            frame,
            relation,
        }
    }

    pub fn from_config(config: &DataConfig) -> Result<Self, LoadError> {
        let frame = Source::resolve(&config.base, &config.frame_file)?;
        let relation = Source::resolve(&config.base, &config.relation_file)?;
        Self::new(
            frame,
            relation,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// 同时加载两份文件，任一失败则整体失败
    pub async fn load(&self) -> Result<(TableFrame, RelationMap), LoadError> {
        info!("加载数据: {} + {}", self.frame, self.relation);

        let result = futures::try_join!(
            self.fetch::<TableFrame>(&self.frame),
            self.fetch::<RelationMap>(&self.relation),
        );

        match result {
            Ok((frame, relation)) => {
                info!(
                    "数据加载完成: {} 个角色, {} 个类型",
                    frame.row_characters.len(),
                    frame.col_types.len()
                );
                Ok((frame, relation))
            }
            Err(e) => {
                warn!("数据加载失败: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, source: &Source) -> Result<T, LoadError> {
        let location = source.to_string();
        debug!("请求 {}", location);

        let body = match source {
            Source::Remote(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|e| LoadError::Transport {
                        location: location.clone(),
                        source: e,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status { location, status });
                }

                response.bytes().await.map_err(|e| LoadError::Transport {
                    location: location.clone(),
                    source: e,
                })?
                .to_vec()
            }
            Source::Local(path) => tokio::fs::read(path).await.map_err(|e| LoadError::Io {
                location: location.clone(),
                source: e,
            })?,
        };

        serde_json::from_slice(&body).map_err(|e| LoadError::Parse { location, source: e })
    }
}
