//! 统计表格用到的字符，用于字体子集化

use std::collections::BTreeSet;
use std::path::Path;

use crate::html::MARKER;
use crate::models::TableFrame;

/// 所有 jp/cn 文本中出现过的字符，去重后按码点排序
pub fn used_characters(frame: &TableFrame) -> BTreeSet<char> {
    let mut chars = BTreeSet::new();
    for row in &frame.row_characters {
        chars.extend(row.jp.chars());
        chars.extend(row.cn.chars());
    }
    for col in &frame.col_types {
        if let Some(jp) = &col.jp {
            chars.extend(jp.chars());
        }
        chars.extend(col.cn.chars());
    }
    chars
}

/// 字体需要包含的全部字符，末尾追加标记符号
pub fn font_glyphs(frame: &TableFrame) -> String {
    let mut glyphs: String = used_characters(frame).into_iter().collect();
    if !glyphs.contains(MARKER) {
        glyphs.push(MARKER);
    }
    glyphs
}

pub async fn write_glyphs(frame: &TableFrame, path: &Path) -> anyhow::Result<usize> {
    let glyphs = font_glyphs(frame);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("无法创建目录 {}: {}", parent.display(), e))?;
    }
    tokio::fs::write(path, &glyphs)
        .await
        .map_err(|e| anyhow::anyhow!("无法写入 {}: {}", path.display(), e))?;
    Ok(glyphs.chars().count())
}
