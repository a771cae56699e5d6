use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

// 数据结构定义

/// 显示语言，只有日文和中文两种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Jp,
    Cn,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Jp => "jp",
            Language::Cn => "cn",
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::Jp => Language::Cn,
            Language::Cn => Language::Jp,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// 角色（行），以日文名作为关联键
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RowCharacter {
    pub jp: String,
    #[serde(default)]
    pub cn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tachie: Option<String>, // 立绘文件名
}

impl RowCharacter {
    pub fn label(&self, lang: Language) -> &str {
        match lang {
            Language::Jp => &self.jp,
            Language::Cn => &self.cn,
        }
    }
}

// 类型（列），jp 可缺省，缺省时整行显示为空白
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jp: Option<String>,
    #[serde(default)]
    pub cn: String,
}

impl ColumnType {
    pub fn label(&self, lang: Language) -> &str {
        match lang {
            Language::Jp => self.jp.as_deref().unwrap_or(""),
            Language::Cn => &self.cn,
        }
    }

    /// 非空的日文键
    pub fn key(&self) -> Option<&str> {
        self.jp.as_deref().filter(|k| !k.is_empty())
    }
}

// table_frame.json
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TableFrame {
    pub row_characters: Vec<RowCharacter>,
    pub col_types: Vec<ColumnType>,
}

// character_hs.json: 类型 -> 角色 -> 1
// 列的值不是对象时不报错，视为没有关联数据
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct RelationMap(HashMap<String, Value>);

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 该列存在且值为对象
    pub fn contains_column(&self, column_key: &str) -> bool {
        self.0.get(column_key).is_some_and(Value::is_object)
    }

    /// 只有值恰好为 1 时才算有关联
    pub fn is_set(&self, column_key: &str, row_key: &str) -> bool {
        self.0
            .get(column_key)
            .and_then(|rows| rows.get(row_key))
            .and_then(Value::as_f64)
            .is_some_and(|v| v == 1.0)
    }

    pub fn mark(&mut self, column_key: impl Into<String>, row_key: impl Into<String>) {
        let rows = self
            .0
            .entry(column_key.into())
            .or_insert_with(|| Value::Object(Map::new()));
        if !rows.is_object() {
            *rows = Value::Object(Map::new());
        }
        if let Value::Object(rows) = rows {
            rows.insert(row_key.into(), Value::from(1));
        }
    }
}
