//! 题目示例导入
//!
//! 职责：从题目编号或题目 URL 解析出示例用例，整体替换本地用例集
//!
//! 本地只负责从输入里提取题目编号和组装用例名称，真正的抓取和
//! 解析在服务端完成。导入失败时本地用例集保持原样。

use std::future::Future;

use regex::Regex;
use tracing::info;

use crate::api::ProblemParseResponse;
use crate::error::{AppError, Result};
use crate::models::{TestCase, TestCaseSet};

/// 题目解析后端
pub trait ProblemSource {
    fn parse_problem(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<ProblemParseResponse>> + Send;
}

/// 导入成功的产物
#[derive(Debug, Clone)]
pub struct ProblemImportResult {
    pub problem_id: String,
    pub cases: Vec<TestCase>,
}

/// 题目导入协调器
pub struct ProblemImportCoordinator<S> {
    source: S,
    url_pattern: Regex,
}

impl<S: ProblemSource> ProblemImportCoordinator<S> {
    pub fn new(source: S) -> Result<Self> {
        let url_pattern = Regex::new(r"problem/(\d+)")
            .map_err(|e| AppError::validation(format!("题目 URL 规则无效: {}", e)))?;
        Ok(ProblemImportCoordinator {
            source,
            url_pattern,
        })
    }

    /// 从用户输入里提取题目编号
    ///
    /// 接受两种形式：包含 `problem/<编号>` 的 URL，或纯数字编号。
    pub fn extract_problem_id(&self, reference: &str) -> Option<String> {
        let trimmed = reference.trim();
        if let Some(captures) = self.url_pattern.captures(trimmed) {
            return captures.get(1).map(|m| m.as_str().to_string());
        }
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Some(trimmed.to_string());
        }
        None
    }

    /// 导入前是否需要用户确认覆盖现有用例
    pub fn needs_confirmation(&self, cases: &TestCaseSet) -> bool {
        !cases.is_all_default()
    }

    /// 解析题目并构建替换用的用例列表
    ///
    /// 输入为空或提取不出题目编号时返回校验错误；服务端解析失败
    /// 或示例为空时返回服务错误。任何失败都不触碰现有用例集。
    pub async fn import(&self, reference: &str) -> Result<ProblemImportResult> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("请输入题目编号或题目链接"));
        }
        let problem_id = self
            .extract_problem_id(trimmed)
            .ok_or_else(|| AppError::validation("无法从输入中识别题目编号"))?;

        info!("🔍 解析题目 {}", problem_id);
        let response = self.source.parse_problem(trimmed).await?;
        if !response.success {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "题目解析失败".to_string());
            return Err(AppError::service(message));
        }
        if response.test_cases.is_empty() {
            return Err(AppError::service("题目没有可导入的示例"));
        }

        let cases = TestCaseSet::cases_from_samples(&problem_id, &response.test_cases);
        info!("✓ 题目 {} 导入 {} 个示例", problem_id, cases.len());
        Ok(ProblemImportResult { problem_id, cases })
    }
}
