//! 作业提交与轮询驱动
//!
//! 职责：把"提交作业、按固定间隔轮询直到终结状态"的流程
//! 从具体业务（单次执行、批量评测）中抽离出来
//!
//! 核心机制：
//! - 每次启动领取一个递增的会话号，新会话启动即废弃旧会话
//! - 被废弃的会话在下一个检查点静默退出，不再发起任何轮询请求
//! - 提交或轮询的网络失败对本次作业是终结性的，报告失败后停止

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::JobStatus;
use crate::error::Result;

/// 提交成功后的作业句柄
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    pub job_id: String,
    pub status: Option<JobStatus>,
}

/// 单次轮询得到的作业快照
#[derive(Debug, Clone)]
pub enum PollReport<T> {
    /// 仍在进行中
    InProgress {
        status: JobStatus,
        queue_position: Option<u32>,
    },
    /// 正常完成，附带产出
    Completed(T),
    /// 服务端判定失败
    Failed { message: String },
}

/// 作业后端：提交请求并查询进度
///
/// 单次执行和批量评测各自实现一个后端，轮询流程完全复用。
pub trait JobBackend {
    type Request;
    type Output;

    fn submit(&self, request: &Self::Request) -> impl Future<Output = Result<SubmittedJob>> + Send;

    fn poll(&self, job_id: &str) -> impl Future<Output = Result<PollReport<Self::Output>>> + Send;
}

/// 轮询过程中的进度通知
#[derive(Debug, Clone)]
pub struct JobProgress {
    pub job_id: String,
    pub status: JobStatus,
    pub queue_position: Option<u32>,
}

/// 一次作业的最终归宿
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome<T> {
    /// 正常完成
    Completed(T),
    /// 失败（服务端判定失败或网络失败）
    Failed { message: String },
    /// 被更新的会话取代，产出已无人关心
    Superseded,
}

/// 作业轮询器
pub struct JobPoller<B> {
    backend: B,
    poll_interval: Duration,
    session: AtomicU64,
}

impl<B: JobBackend> JobPoller<B> {
    pub fn new(backend: B, poll_interval: Duration) -> Self {
        JobPoller {
            backend,
            poll_interval,
            session: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 废弃当前正在进行的会话（若有）
    ///
    /// 正在执行的 [`run`](Self::run) 会在下一个检查点返回
    /// [`JobOutcome::Superseded`]，不再发起后续轮询。
    pub fn supersede(&self) {
        self.session.fetch_add(1, Ordering::SeqCst);
    }

    /// 提交作业并轮询到终结状态
    ///
    /// # 参数
    /// - `request`: 后端的提交请求
    /// - `on_progress`: 每次观察到非终结状态时的进度回调
    pub async fn run(
        &self,
        request: &B::Request,
        mut on_progress: impl FnMut(JobProgress),
    ) -> JobOutcome<B::Output> {
        let token = self.session.fetch_add(1, Ordering::SeqCst) + 1;

        let submitted = match self.backend.submit(request).await {
            Ok(submitted) => submitted,
            Err(e) => {
                warn!("❌ 作业提交失败: {}", e);
                return JobOutcome::Failed {
                    message: "作业提交失败，请检查服务是否可用".to_string(),
                };
            }
        };
        debug!("📤 作业已提交: {}", submitted.job_id);

        let initial_status = submitted.status.unwrap_or(JobStatus::Pending);
        if !initial_status.is_terminal() {
            on_progress(JobProgress {
                job_id: submitted.job_id.clone(),
                status: initial_status,
                queue_position: None,
            });
        }

        loop {
            if self.session.load(Ordering::SeqCst) != token {
                debug!("作业 {} 的会话已被取代，停止轮询", submitted.job_id);
                return JobOutcome::Superseded;
            }

            tokio::time::sleep(self.poll_interval).await;

            if self.session.load(Ordering::SeqCst) != token {
                debug!("作业 {} 的会话已被取代，停止轮询", submitted.job_id);
                return JobOutcome::Superseded;
            }

            match self.backend.poll(&submitted.job_id).await {
                Ok(PollReport::InProgress {
                    status,
                    queue_position,
                }) => {
                    on_progress(JobProgress {
                        job_id: submitted.job_id.clone(),
                        status,
                        queue_position,
                    });
                }
                Ok(PollReport::Completed(output)) => {
                    debug!("✓ 作业 {} 已完成", submitted.job_id);
                    return JobOutcome::Completed(output);
                }
                Ok(PollReport::Failed { message }) => {
                    warn!("❌ 作业 {} 失败: {}", submitted.job_id, message);
                    return JobOutcome::Failed { message };
                }
                Err(e) => {
                    warn!("❌ 轮询作业 {} 失败: {}", submitted.job_id, e);
                    return JobOutcome::Failed {
                        message: "查询作业状态失败，请稍后重试".to_string(),
                    };
                }
            }
        }
    }
}
