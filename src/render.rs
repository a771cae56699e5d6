//! 表格结构生成
//!
//! 只产出行/单元格描述，不涉及任何展示层；同一组输入总是得到相同的结构。

use serde::Serialize;

use crate::models::Language;
use crate::table::TableModel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    /// 立绘文件名
    Portrait(String),
    Label(String),
    Marked,
    /// 没有关联数据的列，整行只占一个单元格
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Portraits,
    Names,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub language: Language,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn header_rows(&self) -> &[RenderedRow] {
        &self.rows[..2.min(self.rows.len())]
    }

    pub fn data_rows(&self) -> &[RenderedRow] {
        &self.rows[2.min(self.rows.len())..]
    }

    /// 最宽一行的单元格数
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

pub fn render(model: &TableModel, lang: Language) -> RenderedTable {
    let mut rows = Vec::with_capacity(model.columns().len() + 2);

    // 表头：立绘
    let mut portraits = vec![Cell::Empty];
    portraits.extend(model.rows().iter().map(|c| match &c.tachie {
        Some(file) if !file.is_empty() => Cell::Portrait(file.clone()),
        _ => Cell::Empty,
    }));
    rows.push(RenderedRow {
        kind: RowKind::Portraits,
        cells: portraits,
    });

    // 表头：名字
    let mut names = vec![Cell::Empty];
    names.extend(
        model
            .rows()
            .iter()
            .map(|c| Cell::Label(c.label(lang).to_string())),
    );
    rows.push(RenderedRow {
        kind: RowKind::Names,
        cells: names,
    });

    // 数据行，关联查询始终用日文键
    for column in model.columns() {
        let mut cells = vec![Cell::Label(column.label(lang).to_string())];
        match column.key() {
            Some(key) if model.has_relation_data(column) => {
                cells.extend(model.rows().iter().map(|c| {
                    if model.has_mark(key, &c.jp) {
                        Cell::Marked
                    } else {
                        Cell::Empty
                    }
                }));
            }
            _ => cells.push(Cell::Blank),
        }
        rows.push(RenderedRow {
            kind: RowKind::Data,
            cells,
        });
    }

    RenderedTable {
        language: lang,
        rows,
    }
}
