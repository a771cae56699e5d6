//! 把 RenderedTable 转换为 HTML

use crate::render::{Cell, RenderedTable, RowKind};
use crate::toggle::{LanguageToggle, TOGGLE_ICON};

/// 页面中引用资源的相对路径前缀
pub const ASSET_URL_ROOT: &str = "assets";
pub const LOAD_FAILED_MESSAGE: &str = "数据加载失败，请刷新页面重试";
pub const MARKER: char = '●';

const STYLE: &str = "\
body{font-family:'QiushuiShotaiLite',sans-serif;margin:0;padding:16px}\
div.container{display:inline-block;padding:12px;background:#fff}\
table.bishoujo-table{border-collapse:collapse}\
table.bishoujo-table td{border:1px solid #ccc;text-align:center;padding:2px 6px}\
tr.td-spacing td{height:24px}\
td.dot{color:#d04a6a}\
img.tachie-box{width:64px;height:64px;object-fit:cover}\
img.svg-icon{width:1em;height:1em;vertical-align:middle}\
span.lang-switch,span.export-screenshot{cursor:pointer;margin-right:12px}\
div.notice{color:#a33;margin:8px 0}\
p.load-failed{color:#a33}";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_cell(out: &mut String, cell: &Cell) {
    match cell {
        Cell::Empty => out.push_str("<td></td>"),
        Cell::Portrait(file) => {
            out.push_str("<td><img class=\"tachie-box\" src=\"");
            out.push_str(ASSET_URL_ROOT);
            out.push_str("/tachie/");
            out.push_str(&escape(file));
            out.push_str("\" alt=\"\"/></td>");
        }
        Cell::Label(text) => {
            out.push_str("<td>");
            out.push_str(&escape(text));
            out.push_str("</td>");
        }
        Cell::Marked => {
            out.push_str("<td class=\"dot\">");
            out.push(MARKER);
            out.push_str("</td>");
        }
        Cell::Blank => out.push_str("<td class=\"blank\"></td>"),
    }
}

/// 只生成 table 元素本身
pub fn render_table(table: &RenderedTable) -> String {
    let mut out = String::from("<table class=\"bishoujo-table\">");
    for row in &table.rows {
        match row.kind {
            RowKind::Data => out.push_str("<tr class=\"td-spacing\">"),
            RowKind::Portraits | RowKind::Names => out.push_str("<tr>"),
        }
        for cell in &row.cells {
            render_cell(&mut out, cell);
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

fn render_controls(out: &mut String, toggle: Option<&LanguageToggle>) {
    out.push_str("<div class=\"controls\">");
    if let Some(toggle) = toggle {
        out.push_str("<span class=\"");
        out.push_str(toggle.css_class());
        out.push_str("\"><img class=\"svg-icon\" src=\"");
        out.push_str(ASSET_URL_ROOT);
        out.push('/');
        out.push_str(TOGGLE_ICON);
        out.push_str("\" alt=\"\"/>");
        out.push_str(toggle.caption());
        out.push_str("</span>");
        out.push_str("<span class=\"export-screenshot\">导出图片</span>");
    }
    out.push_str("</div>");
}

fn render_document(lang: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 1024);
    out.push_str("<!DOCTYPE html><html lang=\"");
    out.push_str(lang);
    out.push_str("\"><head><meta charset=\"utf-8\"><title>美少女表</title><style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body>");
    out.push_str(body);
    out.push_str("</body></html>\n");
    out
}

fn html_lang(table: &RenderedTable) -> &'static str {
    match table.language {
        crate::models::Language::Jp => "ja",
        crate::models::Language::Cn => "zh",
    }
}

/// 完整页面：操作按钮、提示信息和 div.container 内的表格
pub fn render_page(table: &RenderedTable, toggle: &LanguageToggle, notice: Option<&str>) -> String {
    let mut body = String::new();
    render_controls(&mut body, Some(toggle));
    if let Some(notice) = notice {
        body.push_str("<div class=\"notice\">");
        body.push_str(&escape(notice));
        body.push_str("</div>");
    }
    body.push_str("<div class=\"container\">");
    body.push_str(&render_table(table));
    body.push_str("</div>");
    render_document(html_lang(table), &body)
}

/// 加载失败时用提示替换表格区域
pub fn render_failure_page() -> String {
    let mut body = String::new();
    render_controls(&mut body, None);
    body.push_str("<div class=\"container\"><p class=\"load-failed\">");
    body.push_str(LOAD_FAILED_MESSAGE);
    body.push_str("</p></div>");
    render_document("zh", &body)
}
