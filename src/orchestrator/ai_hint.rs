//! AI 提示协调
//!
//! 职责：为失败的测试用例请求 AI 提示，并维护会话级缓存
//!
//! 核心机制：
//! - 缓存键编码语言、代码指纹和失败用例身份，命中时不发请求
//! - 用例名形如 `BOJ(编号)` 时先取回题目原文作为提示上下文，
//!   取不回也不阻断提示请求，降级为只带编号的简短上下文
//! - 只有成功的提示才落缓存，失败的请求下次可以重试

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use regex::Regex;
use tracing::{info, warn};

use crate::api::{AiHintRequest, AiHintResponse, FailedCaseDetail, SiblingCase};
use crate::error::{AppError, Result};
use crate::models::{FailingCase, Language, TestCase};
use crate::services::cache_key;
use crate::services::hint_cache::{HintCache, HintEntry};

/// AI 提示后端
pub trait HintBackend {
    fn problem_content(&self, problem_id: &str) -> impl Future<Output = Result<String>> + Send;

    fn request_hint(
        &self,
        request: &AiHintRequest,
    ) -> impl Future<Output = Result<AiHintResponse>> + Send;
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// AI 提示协调器
pub struct AiHintCoordinator<B> {
    backend: B,
    cache: Mutex<HintCache>,
    boj_pattern: Regex,
    in_flight: AtomicBool,
}

impl<B: HintBackend> AiHintCoordinator<B> {
    pub fn new(backend: B) -> Result<Self> {
        let boj_pattern = Regex::new(r"BOJ\((\d+)\)")
            .map_err(|e| AppError::validation(format!("题目名称规则无效: {}", e)))?;
        Ok(AiHintCoordinator {
            backend,
            cache: Mutex::new(HintCache::new()),
            boj_pattern,
            in_flight: AtomicBool::new(false),
        })
    }

    /// 已缓存的提示条数
    pub fn cached_hints(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// 为一个失败用例请求提示
    ///
    /// # 参数
    /// - `failing`: 失败用例快照
    /// - `all_cases`: 同组全部用例，供服务端识别跨用例的规律
    pub async fn request_hint(
        &self,
        language: Language,
        code: &str,
        failing: &FailingCase,
        all_cases: &[TestCase],
    ) -> Result<HintEntry> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::validation("已有提示请求在进行中"));
        }
        let _guard = InFlightGuard(&self.in_flight);

        let key = cache_key::build_key(language, code, failing);
        if let Some(entry) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            info!("✓ AI 提示命中缓存");
            return Ok(entry.clone());
        }

        let problem_context = self.resolve_problem_context(failing, all_cases).await;

        let request = AiHintRequest {
            language,
            code: code.to_string(),
            failed_test_case: FailedCaseDetail {
                test_case_name: failing.name.clone(),
                input_data: failing.input.clone(),
                expected_output: failing.expected.clone(),
                actual_output: failing.actual.clone(),
                error: failing.error.clone(),
                passed: false,
                execution_time: if failing.execution_time_seconds > 0.0 {
                    failing.execution_time_seconds
                } else {
                    0.1
                },
            },
            problem_context,
            all_test_cases: all_cases
                .iter()
                .map(|c| SiblingCase {
                    name: c.name.clone(),
                    input_data: c.input.clone(),
                    expected_output: c.expected.clone(),
                })
                .collect(),
        };

        info!("🚀 为用例 {:?} 请求 AI 提示", failing.name);
        let response = self.backend.request_hint(&request).await?;
        if !response.success {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "AI 提示生成失败".to_string());
            return Err(AppError::service(message));
        }

        let entry = HintEntry {
            analysis: response.analysis,
            hint: response.hint,
            suggestions: response.suggestions,
        };
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .put(key, entry.clone());
        Ok(entry)
    }

    /// 根据用例名推断题目上下文
    ///
    /// 名称带 `BOJ(编号)` 时取回题目原文；取不回时降级为只带编号。
    /// 没有编号但同组用例里有导入痕迹时给一个通用说明，否则不带上下文。
    async fn resolve_problem_context(
        &self,
        failing: &FailingCase,
        all_cases: &[TestCase],
    ) -> Option<String> {
        if let Some(id) = self
            .boj_pattern
            .captures(&failing.name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
        {
            return Some(match self.backend.problem_content(&id).await {
                Ok(content) => format!("BOJ {} 号题目:\n{}", id, content),
                Err(e) => {
                    warn!("⚠️ 题目 {} 原文获取失败，使用简化上下文: {}", id, e);
                    format!("BOJ {} 号题目。", id)
                }
            });
        }
        if all_cases.iter().any(|c| c.name.contains("BOJ(")) {
            return Some("BOJ 在线评测题目。".to_string());
        }
        None
    }
}
