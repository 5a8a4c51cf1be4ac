/// 日志工具模块
///
/// 提供启动、加载、导出等阶段的日志输出
use crate::config::Config;
use tracing::info;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 工作项查看器启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 数据源: {}", config.data_source);
    info!("📂 输出目录: {}", config.output_dir);
    info!(
        "📐 分页模式: {}",
        if config.paginate { "开启" } else { "关闭（单页）" }
    );
    info!("{}", "=".repeat(60));
}

/// 记录数据加载结果
pub fn log_records_loaded(total: usize) {
    if total == 0 {
        info!("⚠️ 数据集中没有工作项");
    } else {
        info!("✓ 共加载 {} 条工作项", total);
    }
}

/// 打印交互模式帮助
pub fn print_shell_help() {
    println!("{}", "─".repeat(60));
    println!("可用命令:");
    println!("  preview <ItemId>     查找并预览工作项");
    println!("  check <部分>         勾选 details / notes / attachments / audit");
    println!("  uncheck <部分>       取消勾选");
    println!("  sections             查看当前勾选状态");
    println!("  download             导出当前预览的工作项");
    println!("  close                关闭预览");
    println!("  reload               重新加载数据");
    println!("  help                 显示帮助");
    println!("  quit                 退出");
    println!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
