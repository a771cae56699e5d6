use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
/// 导出倍数上限，避免生成过大的画布
pub const MAX_EXPORT_SCALE: f32 = 8.0;

// 配置文件结构
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// 目录路径或 http(s) 基础地址
    pub base: String,
    pub frame_file: String,
    pub relation_file: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub page_file: String,
    pub export_file: String,
    pub export_scale: f32,
    pub charset_file: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            frame_file: "table_frame.json".to_string(),
            relation_file: "character_hs.json".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dist"),
            page_file: "index.html".to_string(),
            export_file: "bishoujo-table.webp".to_string(),
            export_scale: 1.5,
            charset_file: "table_used_characters.txt".to_string(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
        }
    }
}

impl Config {
    /// 读取当前目录下的 config.toml，文件不存在时使用默认配置
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::info!("{} 不存在，使用默认配置", path.display());
            return Ok(Config::default());
        }
        let config_content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("配置文件 {} 无法读取: {}", path.display(), e))?;
        Self::parse(&config_content)
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("配置文件解析失败: {}", e))?;
        let scale = config.output.export_scale;
        if !(scale > 0.0 && scale <= MAX_EXPORT_SCALE) {
            anyhow::bail!(
                "output.export_scale 必须在 (0, {}] 范围内: {}",
                MAX_EXPORT_SCALE,
                scale
            );
        }
        Ok(config)
    }

    pub fn page_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.page_file)
    }

    pub fn export_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.export_file)
    }

    pub fn charset_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.charset_file)
    }
}
