use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::LoadError;
use crate::export::ExportTrigger;
use crate::html;
use crate::loader::DataLoader;
use crate::models::{Language, RelationMap, TableFrame};
use crate::render::{self, RenderedTable};
use crate::table::TableModel;
use crate::toggle::LanguageToggle;

// 加载成功后的视图状态
struct ReadyView {
    model: TableModel,
    toggle: LanguageToggle,
    rendered: RenderedTable,
}

enum ViewerState {
    Failed(LoadError),
    Ready(ReadyView),
}

/// 持有当前语言和已渲染的表格，驱动整个页面
pub struct Viewer {
    state: ViewerState,
    exporter: ExportTrigger,
    /// 最近一次导出的失败提示，成功导出后清除
    notice: Option<String>,
}

impl Viewer {
    pub async fn initialize(loader: &DataLoader, exporter: ExportTrigger) -> Viewer {
        Self::from_load_result(loader.load().await, exporter)
    }

    /// 两份数据都成功才建立模型并以日文完成首次渲染
    pub fn from_load_result(
        result: Result<(TableFrame, RelationMap), LoadError>,
        exporter: ExportTrigger,
    ) -> Viewer {
        let state = match result.and_then(|(frame, relation)| TableModel::new(frame, relation)) {
            Ok(model) => {
                let toggle = LanguageToggle::new();
                let rendered = render::render(&model, toggle.current());
                info!("首次渲染完成 ({})", toggle.current());
                ViewerState::Ready(ReadyView {
                    model,
                    toggle,
                    rendered,
                })
            }
            Err(e) => {
                warn!("初始化失败: {}", e);
                ViewerState::Failed(e)
            }
        };

        Viewer {
            state,
            exporter,
            notice: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ViewerState::Ready(_))
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.state {
            ViewerState::Failed(e) => Some(e),
            ViewerState::Ready(_) => None,
        }
    }

    pub fn model(&self) -> Option<&TableModel> {
        match &self.state {
            ViewerState::Ready(view) => Some(&view.model),
            ViewerState::Failed(_) => None,
        }
    }

    pub fn language(&self) -> Option<Language> {
        match &self.state {
            ViewerState::Ready(view) => Some(view.toggle.current()),
            ViewerState::Failed(_) => None,
        }
    }

    pub fn rendered(&self) -> Option<&RenderedTable> {
        match &self.state {
            ViewerState::Ready(view) => Some(&view.rendered),
            ViewerState::Failed(_) => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// 切换语言并重新渲染；加载失败时没有可切换的表格
    pub fn toggle(&mut self) -> Option<Language> {
        let ViewerState::Ready(view) = &mut self.state else {
            return None;
        };
        let lang = view.toggle.toggle();
        view.rendered = render::render(&view.model, lang);
        info!("切换语言: {}", lang);
        Some(lang)
    }

    /// 导出失败只更新提示，不影响已渲染的表格
    pub async fn export(&mut self) -> Option<PathBuf> {
        let ViewerState::Ready(view) = &self.state else {
            self.notice = Some(format!("导出失败：{}", crate::error::ExportError::NotRendered));
            return None;
        };

        match self.exporter.export(&view.rendered).await {
            Ok(path) => {
                self.notice = None;
                Some(path)
            }
            Err(e) => {
                warn!("导出失败: {}", e);
                self.notice = Some(format!("导出失败：{}", e));
                None
            }
        }
    }

    pub fn page(&self) -> String {
        match &self.state {
            ViewerState::Ready(view) => html::render_page(&view.rendered, &view.toggle, self.notice()),
            ViewerState::Failed(_) => html::render_failure_page(),
        }
    }

    pub async fn write_page(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("无法创建目录 {}: {}", parent.display(), e))?;
        }
        tokio::fs::write(path, self.page())
            .await
            .map_err(|e| anyhow::anyhow!("无法写入页面 {}: {}", path.display(), e))?;
        Ok(())
    }
}
