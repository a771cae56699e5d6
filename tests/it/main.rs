//! 集成测试入口，所有测试编译为同一个二进制
//!
//! - loader: 并发加载与整体失败
//! - render: 表格结构的性质
//! - viewer: 语言切换、导出提示和加载失败页面

mod helpers;
mod loader_tests;
