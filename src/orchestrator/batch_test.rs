//! 批量评测编排
//!
//! 职责：把启用的测试用例整批提交评测，完成后把服务端按名称
//! 返回的结果对应回本地用例
//!
//! 对应靠用例名称：服务端结果里的 `test_case_name` 与提交时的
//! 名称逐一匹配，匹配不上的结果记一条警告后丢弃。

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{BatchCaseResult, BatchCaseSpec, BatchTestRequest, JobStatus};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Language, TestCase, TestResult};
use crate::services::job_poller::{JobBackend, JobOutcome, JobPoller};

/// 批量评测的外部可见状态
#[derive(Debug, Clone, PartialEq)]
pub enum TestRunState {
    /// 空闲
    Idle,
    /// 已发起提交
    Submitting,
    /// 等待评测完成
    Waiting { status: JobStatus, job_id: String },
    /// 评测完成，结果已对应回本地用例
    Completed(Vec<TestResult>),
    /// 评测失败
    Failed { message: String },
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 批量评测编排器
pub struct BatchTestOrchestrator<B: JobBackend<Request = BatchTestRequest, Output = Vec<BatchCaseResult>>> {
    poller: JobPoller<B>,
    state_tx: watch::Sender<TestRunState>,
    in_flight: AtomicBool,
}

impl<B: JobBackend<Request = BatchTestRequest, Output = Vec<BatchCaseResult>>>
    BatchTestOrchestrator<B>
{
    pub fn new(backend: B, config: &Config) -> Self {
        let (state_tx, _) = watch::channel(TestRunState::Idle);
        BatchTestOrchestrator {
            poller: JobPoller::new(backend, Duration::from_millis(config.poll_interval_ms)),
            state_tx,
            in_flight: AtomicBool::new(false),
        }
    }

    /// 订阅评测状态
    pub fn state(&self) -> watch::Receiver<TestRunState> {
        self.state_tx.subscribe()
    }

    /// 提交所有启用的用例并等待结果
    ///
    /// # 参数
    /// - `cases`: 本地用例集合，只有启用的会被提交
    ///
    /// # 返回
    /// 没有启用的用例时返回校验错误，不发起网络请求。
    pub async fn run_all(&self, language: Language, code: &str, cases: &[TestCase]) -> Result<()> {
        let enabled: Vec<&TestCase> = cases.iter().filter(|c| c.enabled).collect();
        if enabled.is_empty() {
            return Err(AppError::validation("没有启用的测试用例"));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::validation("已有评测在进行中"));
        }
        let _guard = InFlightGuard(&self.in_flight);

        info!("🚀 提交批量评测，共 {} 个用例", enabled.len());
        self.state_tx.send_replace(TestRunState::Submitting);

        let request = BatchTestRequest {
            code: code.to_string(),
            language,
            test_cases: enabled
                .iter()
                .map(|c| BatchCaseSpec {
                    name: c.name.clone(),
                    input_data: c.input.clone(),
                    expected_output: c.expected.clone(),
                    enabled: true,
                })
                .collect(),
        };

        let outcome = self
            .poller
            .run(&request, |progress| {
                self.state_tx.send_replace(TestRunState::Waiting {
                    status: progress.status,
                    job_id: progress.job_id,
                });
            })
            .await;

        match outcome {
            JobOutcome::Completed(results) => {
                let matched = correlate(&enabled, results);
                info!(
                    "✓ 评测完成: {}/{} 通过",
                    matched.iter().filter(|r| r.passed).count(),
                    matched.len()
                );
                self.state_tx.send_replace(TestRunState::Completed(matched));
            }
            JobOutcome::Failed { message } => {
                self.state_tx.send_replace(TestRunState::Failed { message });
            }
            JobOutcome::Superseded => {}
        }
        Ok(())
    }
}

/// 把服务端结果按名称对应回本地用例
///
/// 服务端返回的结果顺序不保证与提交顺序一致。名称匹配不上的
/// 结果无法归属到任何本地用例，丢弃并记警告。
fn correlate(cases: &[&TestCase], results: Vec<BatchCaseResult>) -> Vec<TestResult> {
    let mut matched = Vec::with_capacity(results.len());
    for result in results {
        match cases.iter().find(|c| c.name == result.test_case_name) {
            Some(case) => matched.push(TestResult {
                test_case_id: case.id,
                passed: result.passed,
                actual: result.actual_output,
                expected: result.expected_output,
                execution_time_seconds: result.execution_time,
                error: result.error,
            }),
            None => {
                warn!("⚠️ 评测结果 {:?} 无法对应到本地用例，已丢弃", result.test_case_name);
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestCaseSet;
    use crate::services::job_poller::{PollReport, SubmittedJob};
    use std::sync::Mutex;

    struct FakeBackend {
        submitted: Mutex<Vec<BatchTestRequest>>,
        results: Vec<BatchCaseResult>,
    }

    impl FakeBackend {
        fn returning(results: Vec<BatchCaseResult>) -> Self {
            FakeBackend {
                submitted: Mutex::new(Vec::new()),
                results,
            }
        }
    }

    impl JobBackend for FakeBackend {
        type Request = BatchTestRequest;
        type Output = Vec<BatchCaseResult>;

        async fn submit(&self, request: &BatchTestRequest) -> Result<SubmittedJob> {
            self.submitted.lock().unwrap().push(request.clone());
            Ok(SubmittedJob {
                job_id: "batch-1".to_string(),
                status: None,
            })
        }

        async fn poll(&self, _job_id: &str) -> Result<PollReport<Vec<BatchCaseResult>>> {
            Ok(PollReport::Completed(self.results.clone()))
        }
    }

    fn case_result(name: &str, passed: bool, actual: &str, expected: &str) -> BatchCaseResult {
        BatchCaseResult {
            test_case_name: name.to_string(),
            passed,
            actual_output: actual.to_string(),
            expected_output: expected.to_string(),
            execution_time: 0.05,
            error: None,
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn rejects_run_with_no_enabled_cases() {
        let mut set = TestCaseSet::new();
        set.toggle(1);
        let orchestrator =
            BatchTestOrchestrator::new(FakeBackend::returning(Vec::new()), &Config::default());

        let err = orchestrator
            .run_all(Language::Python, "print(1)", set.cases())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "没有启用的测试用例");
        assert!(orchestrator.poller.backend().submitted.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn only_enabled_cases_are_submitted() {
        let mut set = TestCaseSet::new();
        set.add();
        set.toggle(2);
        let orchestrator =
            BatchTestOrchestrator::new(FakeBackend::returning(Vec::new()), &Config::default());

        orchestrator
            .run_all(Language::Python, "print(1)", set.cases())
            .await
            .unwrap();

        let submitted = orchestrator.poller.backend().submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].test_cases.len(), 1);
        assert_eq!(submitted[0].test_cases[0].name, "测试 (1)");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn results_correlate_back_by_name() {
        let mut set = TestCaseSet::new();
        set.add();
        set.set_input(1, "1 2");
        set.set_expected(1, "3");
        set.set_input(2, "2 3");
        set.set_expected(2, "5");

        // 服务端乱序返回
        let orchestrator = BatchTestOrchestrator::new(
            FakeBackend::returning(vec![
                case_result("测试 (2)", false, "6", "5"),
                case_result("测试 (1)", true, "3", "3"),
            ]),
            &Config::default(),
        );

        orchestrator
            .run_all(Language::Python, "print(sum(map(int, input().split())))", set.cases())
            .await
            .unwrap();

        let state = orchestrator.state().borrow().clone();
        let TestRunState::Completed(results) = state else {
            panic!("应当处于完成状态");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].test_case_id, 2);
        assert!(!results[0].passed);
        assert_eq!(results[1].test_case_id, 1);
        assert!(results[1].passed);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn unmatched_result_is_dropped() {
        let set = TestCaseSet::new();
        let orchestrator = BatchTestOrchestrator::new(
            FakeBackend::returning(vec![
                case_result("测试 (1)", true, "", ""),
                case_result("来历不明", true, "", ""),
            ]),
            &Config::default(),
        );

        orchestrator
            .run_all(Language::C, "int main(){}", set.cases())
            .await
            .unwrap();

        let state = orchestrator.state().borrow().clone();
        let TestRunState::Completed(results) = state else {
            panic!("应当处于完成状态");
        };
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].test_case_id, 1);
    }
}
