use std::collections::HashSet;

use crate::error::LoadError;
use crate::models::{ColumnType, RelationMap, RowCharacter, TableFrame};

/// 加载完成后的只读表格数据
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    frame: TableFrame,
    relation: RelationMap,
}

impl TableModel {
    /// 角色的日文名是关联键，必须唯一
    pub fn new(frame: TableFrame, relation: RelationMap) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for row in &frame.row_characters {
            if !seen.insert(row.jp.as_str()) {
                return Err(LoadError::DuplicateRowKey(row.jp.clone()));
            }
        }
        Ok(TableModel { frame, relation })
    }

    pub fn rows(&self) -> &[RowCharacter] {
        &self.frame.row_characters
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.frame.col_types
    }

    pub fn frame(&self) -> &TableFrame {
        &self.frame
    }

    pub fn has_mark(&self, column_key: &str, row_key: &str) -> bool {
        self.relation.is_set(column_key, row_key)
    }

    /// 列有日文键且关联表中存在该键
    pub fn has_relation_data(&self, column: &ColumnType) -> bool {
        column
            .key()
            .is_some_and(|key| self.relation.contains_column(key))
    }
}
