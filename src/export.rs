use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::render::{Cell, RenderedTable, RowKind};

/// 把已渲染的表格区域转换为图片字节
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, table: &RenderedTable, scale: f32) -> Result<Vec<u8>, ExportError>;
}

const CELL_WIDTH: u32 = 48;
const CELL_HEIGHT: u32 = 28;
const PORTRAIT_HEIGHT: u32 = 64;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRID: Rgba<u8> = Rgba([204, 204, 204, 255]);
const LABEL_FILL: Rgba<u8> = Rgba([240, 240, 244, 255]);
const DOT: Rgba<u8> = Rgba([208, 74, 106, 255]);

/// 绘制网格、标记点和立绘的栅格化实现，输出无损 WebP
///
/// 文字标签没有字体可用，只画出底色。
pub struct GridRasterizer {
    assets_dir: PathBuf,
}

impl GridRasterizer {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    fn load_portrait(&self, file: &str, w: u32, h: u32) -> Option<RgbaImage> {
        let path = self.assets_dir.join("tachie").join(file);
        match image::open(&path) {
            Ok(img) => Some(img.resize_to_fill(w, h, FilterType::Triangle).to_rgba8()),
            Err(e) => {
                warn!("立绘 {} 读取失败: {}", path.display(), e);
                None
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..(y + h).min(canvas.height()) {
        for px in x..(x + w).min(canvas.width()) {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn stroke_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    fill_rect(canvas, x, y, w, 1, color);
    fill_rect(canvas, x, y + h.saturating_sub(1), w, 1, color);
    fill_rect(canvas, x, y, 1, h, color);
    fill_rect(canvas, x + w.saturating_sub(1), y, 1, h, color);
}

fn fill_dot(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let cx = x as f32 + w as f32 / 2.0;
    let cy = y as f32 + h as f32 / 2.0;
    let r = w.min(h) as f32 * 0.25;
    for py in y..(y + h).min(canvas.height()) {
        for px in x..(x + w).min(canvas.width()) {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

fn scaled(v: u32, scale: f32) -> u32 {
    ((v as f32 * scale).round() as u32).max(1)
}

impl Rasterizer for GridRasterizer {
    fn rasterize(&self, table: &RenderedTable, scale: f32) -> Result<Vec<u8>, ExportError> {
        let columns = table.width() as u32;
        if columns == 0 {
            return Err(ExportError::Rasterize("表格为空".to_string()));
        }

        let cell_w = scaled(CELL_WIDTH, scale);
        let row_heights: Vec<u32> = table
            .rows
            .iter()
            .map(|row| match row.kind {
                RowKind::Portraits => scaled(PORTRAIT_HEIGHT, scale),
                RowKind::Names | RowKind::Data => scaled(CELL_HEIGHT, scale),
            })
            .collect();

        let too_large = || ExportError::Rasterize("图片尺寸过大".to_string());
        let width = cell_w.checked_mul(columns).ok_or_else(too_large)?;
        let height = row_heights
            .iter()
            .try_fold(0u32, |acc, &h| acc.checked_add(h))
            .ok_or_else(too_large)?;
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        let mut y = 0;
        for (row, &h) in table.rows.iter().zip(&row_heights) {
            for (i, cell) in row.cells.iter().enumerate() {
                let x = i as u32 * cell_w;
                // 空白占位单元格横跨剩余所有列
                let w = match cell {
                    Cell::Blank => width - x,
                    _ => cell_w,
                };
                match cell {
                    Cell::Empty | Cell::Blank => {}
                    Cell::Label(text) if text.is_empty() => {}
                    Cell::Label(_) => fill_rect(
                        &mut canvas,
                        x + 1,
                        y + 1,
                        w.saturating_sub(2),
                        h.saturating_sub(2),
                        LABEL_FILL,
                    ),
                    Cell::Marked => fill_dot(&mut canvas, x, y, w, h, DOT),
                    Cell::Portrait(file) => {
                        if let Some(img) = self.load_portrait(file, w, h) {
                            imageops::overlay(&mut canvas, &img, x as i64, y as i64);
                        }
                    }
                }
                stroke_rect(&mut canvas, x, y, w, h, GRID);
            }
            y += h;
        }

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::WebP)?;
        Ok(bytes)
    }
}

/// 导出按钮：栅格化当前表格并写入固定文件名
pub struct ExportTrigger {
    rasterizer: Arc<dyn Rasterizer>,
    path: PathBuf,
    scale: f32,
}

impl ExportTrigger {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, path: impl Into<PathBuf>, scale: f32) -> Self {
        Self {
            rasterizer,
            path: path.into(),
            scale,
        }
    }

    pub async fn export(&self, table: &RenderedTable) -> Result<PathBuf, ExportError> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let table = table.clone();
        let scale = self.scale;

        // 栅格化中的 panic 也在这里转换为错误
        let bytes = tokio::task::spawn_blocking(move || rasterizer.rasterize(&table, scale))
            .await
            .map_err(|e| ExportError::Rasterize(e.to_string()))??;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ExportError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        tokio::fs::write(&self.path, &bytes)
            .await
            .map_err(|e| ExportError::Io {
                path: self.path.clone(),
                source: e,
            })?;

        info!("已导出 {} ({} 字节)", self.path.display(), bytes.len());
        Ok(self.path.clone())
    }
}
