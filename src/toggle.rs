use crate::models::Language;

pub const TOGGLE_ICON: &str = "icon/lang-switch.svg";

/// 语言切换按钮的状态，初始为日文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageToggle {
    current: Language,
}

impl LanguageToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// 无条件切换，返回新的语言
    pub fn toggle(&mut self) -> Language {
        self.current = self.current.other();
        self.current
    }

    /// 按钮文字描述下一次点击将切换到的语言
    pub fn caption(&self) -> &'static str {
        match self.current.other() {
            Language::Cn => "切换中文",
            Language::Jp => "切换日文",
        }
    }

    /// 显示中文时按钮带 cn 样式
    pub fn css_class(&self) -> &'static str {
        match self.current {
            Language::Jp => "lang-switch",
            Language::Cn => "lang-switch cn",
        }
    }
}
