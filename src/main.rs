//! 命令行入口：提交一个源文件到编译服务执行并打印结果
//!
//! 用法：
//! ```text
//! SOURCE_FILE=main.py LANGUAGE=python [INPUT_FILE=input.txt] code_runner_client
//! ```

use anyhow::{bail, Context};
use code_runner_client::orchestrator::single_run::{Dispatch, RunState};
use code_runner_client::{App, Config, Language};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    code_runner_client::logger::init(config.verbose_logging);
    tracing::info!("🚀 编译服务: {}", config.api_base_url);

    let source_path = std::env::var("SOURCE_FILE").context("请通过 SOURCE_FILE 指定源文件")?;
    let language_tag = std::env::var("LANGUAGE").context("请通过 LANGUAGE 指定语言")?;
    let language = Language::parse(&language_tag)
        .with_context(|| format!("不支持的语言: {}", language_tag))?;
    let code = std::fs::read_to_string(&source_path)
        .with_context(|| format!("读取源文件失败: {}", source_path))?;

    let mut app = App::new(config)?;
    app.set_language(language);
    app.on_edit(code);

    if let Ok(input_path) = std::env::var("INPUT_FILE") {
        let input = std::fs::read_to_string(&input_path)
            .with_context(|| format!("读取输入文件失败: {}", input_path))?;
        app.set_input_data(input);
    }

    let mut state = app.run_state();
    match app.run().await {
        Dispatch::Submitted => {}
        Dispatch::NeedsInputConfirmation => {
            tracing::warn!("⚠️ 代码疑似需要输入数据但未提供，直接提交");
            if app.run_confirmed().await != Dispatch::Submitted {
                bail!("提交失败");
            }
        }
        Dispatch::Busy => bail!("已有执行在进行中"),
    }

    // run() 返回时状态已是终结态
    let outcome = state.borrow_and_update().clone();
    match outcome {
        RunState::Completed {
            output,
            error,
            execution_time_seconds,
        } => {
            println!("{}", output);
            if !error.is_empty() {
                eprintln!("{}", error);
            }
            tracing::info!(
                "✓ 执行完成，用时 {:.3}s ({})",
                execution_time_seconds,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            Ok(())
        }
        RunState::Failed { message } => bail!("执行失败: {}", message),
        other => bail!("执行未到达终结状态: {:?}", other),
    }
}
