use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bishoujo_table::{charset, Config, DataLoader, ExportTrigger, GridRasterizer, Viewer};

fn print_menu() {
    println!("\n📋 操作：");
    println!("   t - 切换语言");
    println!("   e - 导出图片");
    println!("   c - 生成字体字符表");
    println!("   q - 退出");
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bishoujo_table=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🎀 美少女表");

    let config = Config::load()?;
    let page_path = config.page_path();

    let loader = DataLoader::from_config(&config.data)?;
    let exporter = ExportTrigger::new(
        Arc::new(GridRasterizer::new(config.assets.dir.clone())),
        config.export_path(),
        config.output.export_scale,
    );

    let mut viewer = Viewer::initialize(&loader, exporter).await;
    viewer.write_page(&page_path).await?;

    if let Some(e) = viewer.load_error() {
        println!("❌ {}", bishoujo_table::html::LOAD_FAILED_MESSAGE);
        println!("   {}", e);
        println!("📄 已生成 {}", page_path.display());
        return Ok(());
    }

    println!("📄 已生成 {}", page_path.display());
    print_menu();

    // 首次渲染成功后才接受切换
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "t" => {
                if let Some(lang) = viewer.toggle() {
                    viewer.write_page(&page_path).await?;
                    println!("🔄 当前语言: {}", lang);
                }
            }
            "e" => match viewer.export().await {
                Some(path) => println!("✅ 图片已导出：{}", path.display()),
                None => {
                    // 提示写进页面，表格保持原样
                    viewer.write_page(&page_path).await?;
                    if let Some(notice) = viewer.notice() {
                        println!("⚠️  {}", notice);
                    }
                }
            },
            "c" => {
                if let Some(model) = viewer.model() {
                    let path = config.charset_path();
                    let count = charset::write_glyphs(model.frame(), &path).await?;
                    println!("✅ 共 {} 个字符，已保存至 {}", count, path.display());
                }
            }
            "q" => break,
            "" => {}
            other => {
                println!("❓ 未知操作: {}", other);
                print_menu();
            }
        }
    }

    println!("👋 再见");
    Ok(())
}
