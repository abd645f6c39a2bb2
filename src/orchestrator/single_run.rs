//! 单次执行编排
//!
//! 职责：驱动"提交代码、轮询状态、发布结果"的完整流程
//!
//! 提交前做输入需求检查：代码要读标准输入而用户没给输入数据时，
//! 返回待确认而不是直接提交。同一时刻最多只有一次执行在进行，
//! 执行中的重复请求直接拒绝。

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::api::{CompileRequest, JobStatus, RunOutput};
use crate::config::Config;
use crate::error::Result;
use crate::models::Language;
use crate::services::input_detector::InputRequirementDetector;
use crate::services::job_poller::{JobBackend, JobOutcome, JobPoller};

/// 单次执行的外部可见状态
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    /// 空闲
    Idle,
    /// 已发起提交
    Submitting,
    /// 等待作业完成
    Waiting {
        status: JobStatus,
        queue_position: Option<u32>,
        job_id: String,
    },
    /// 执行完成
    Completed {
        output: String,
        error: String,
        execution_time_seconds: f64,
    },
    /// 执行失败
    Failed { message: String },
}

/// 一次执行请求的受理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// 已提交，进度走状态通道
    Submitted,
    /// 代码需要输入但未提供，等待用户确认后再提交
    NeedsInputConfirmation,
    /// 已有执行在进行中，本次请求被拒绝
    Busy,
}

/// 执行中标志的 RAII 守卫，任何退出路径都会复位
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 单次执行编排器
pub struct SingleRunOrchestrator<B: JobBackend<Request = CompileRequest, Output = RunOutput>> {
    poller: JobPoller<B>,
    detector: InputRequirementDetector,
    state_tx: watch::Sender<RunState>,
    in_flight: AtomicBool,
}

impl<B: JobBackend<Request = CompileRequest, Output = RunOutput>> SingleRunOrchestrator<B> {
    pub fn new(backend: B, config: &Config) -> Result<Self> {
        let (state_tx, _) = watch::channel(RunState::Idle);
        Ok(SingleRunOrchestrator {
            poller: JobPoller::new(backend, Duration::from_millis(config.poll_interval_ms)),
            detector: InputRequirementDetector::new()?,
            state_tx,
            in_flight: AtomicBool::new(false),
        })
    }

    /// 订阅执行状态
    pub fn state(&self) -> watch::Receiver<RunState> {
        self.state_tx.subscribe()
    }

    /// 发起执行，提交前检查输入需求
    ///
    /// 代码包含读输入惯用法而输入数据为空（含全空白）时不提交，
    /// 返回 [`Dispatch::NeedsInputConfirmation`]。
    pub async fn run(&self, language: Language, code: &str, input_data: &str) -> Dispatch {
        if input_data.trim().is_empty() && self.detector.requires_input(code, language) {
            info!("⚠️ 代码疑似需要输入数据，等待用户确认");
            return Dispatch::NeedsInputConfirmation;
        }
        self.run_confirmed(language, code, input_data).await
    }

    /// 发起执行，跳过输入需求检查（用户已确认）
    pub async fn run_confirmed(&self, language: Language, code: &str, input_data: &str) -> Dispatch {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Dispatch::Busy;
        }
        let _guard = InFlightGuard(&self.in_flight);

        info!("🚀 提交 {} 代码执行", language);
        self.state_tx.send_replace(RunState::Submitting);

        let request = CompileRequest {
            code: code.to_string(),
            language,
            input_data: input_data.to_string(),
        };
        let outcome = self
            .poller
            .run(&request, |progress| {
                self.state_tx.send_replace(RunState::Waiting {
                    status: progress.status,
                    queue_position: progress.queue_position,
                    job_id: progress.job_id,
                });
            })
            .await;

        match outcome {
            JobOutcome::Completed(output) => {
                info!("✓ 执行完成，用时 {:.3}s", output.execution_time_seconds);
                self.state_tx.send_replace(RunState::Completed {
                    output: output.output,
                    error: output.error,
                    execution_time_seconds: output.execution_time_seconds,
                });
            }
            JobOutcome::Failed { message } => {
                self.state_tx.send_replace(RunState::Failed { message });
            }
            // 被新会话取代时状态由新会话接管，这里什么都不发
            JobOutcome::Superseded => {}
        }
        Dispatch::Submitted
    }
}
