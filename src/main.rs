// ==========================================
// 陈列活动奖励评估 - 命令行入口
// ==========================================
// 用法: display-reward-eval <YYYYMM> <CUSTOMER> <PROGRAM>
// 输出: 评估结果 JSON (stdout); 日志输出到 stderr
// ==========================================

use anyhow::Context;
use clap::Parser;
use display_reward_eval::config::EvaluationSettings;
use display_reward_eval::{logging, EvaluationEngine, Period, SqliteRepositories};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "display-reward-eval",
    about = "Evaluate one customer's display program reward eligibility for a month",
    version
)]
struct Cli {
    /// Evaluation period in YYYYMM form
    period: Period,
    /// Customer code
    customer_code: String,
    /// Program code
    program_code: String,
    /// Override the configured SQLite database path
    #[arg(long)]
    db_path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = EvaluationSettings::load().context("加载配置失败")?;
    if let Some(db_path) = cli.db_path {
        settings.database.db_path = db_path;
    }

    // 初始化日志系统
    logging::init(&settings.logging);

    tracing::info!("{} v{}", display_reward_eval::APP_NAME, display_reward_eval::VERSION);
    tracing::info!("使用数据库: {}", settings.database.db_path);

    let repos = SqliteRepositories::open(&settings.database)
        .with_context(|| format!("无法打开数据库: {}", settings.database.db_path))?;
    let engine = EvaluationEngine::new(repos.registrations, repos.criteria, repos.audits);

    let result = engine
        .evaluate_customer(cli.period, &cli.customer_code, &cli.program_code)
        .context("评估失败")?;

    let output = json!({
        "result": result,
        "eligible_for_reward": result.eligible_for_reward(),
        "success_rate": result.success_rate(),
        "failure_summary": result.failure_summary(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
