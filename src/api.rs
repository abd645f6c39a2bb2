//! 编译服务 API 的报文类型
//!
//! 所有端点共用一个固定的根路径（见 [`crate::config::Config::api_base_url`]），
//! 报文为 JSON，状态字符串在线上始终是小写。

use crate::models::Language;
use serde::{Deserialize, Serialize};

/// 作业生命周期状态
///
/// `completed` 与 `failed` 是终结状态，到达后不再轮询。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Queued,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// GET `/languages` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

/// POST `/compile` 请求
#[derive(Debug, Clone, Serialize)]
pub struct CompileRequest {
    pub code: String,
    pub language: Language,
    pub input_data: String,
}

/// 作业创建回执（`/compile` 与 `/batch-test` 共用；批量端点不带 status）
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAck {
    pub job_id: String,
    #[serde(default)]
    pub status: Option<JobStatus>,
}

/// GET `/status/{job_id}` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct RunStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub queue_position: Option<u32>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub execution_time: Option<f64>,
}

/// 单次执行的终结产出
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub output: String,
    /// 成功完成时服务端也可能附带软错误文本（如 stderr）
    pub error: String,
    pub execution_time_seconds: f64,
}

/// POST `/batch-test` 请求
#[derive(Debug, Clone, Serialize)]
pub struct BatchTestRequest {
    pub code: String,
    pub language: Language,
    pub test_cases: Vec<BatchCaseSpec>,
}

/// 批量请求中的单个用例
#[derive(Debug, Clone, Serialize)]
pub struct BatchCaseSpec {
    pub name: String,
    pub input_data: String,
    pub expected_output: String,
    pub enabled: bool,
}

/// GET `/batch-status/{job_id}` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct BatchStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub results: Vec<BatchCaseResult>,
}

/// 服务端返回的单个用例结果，靠 `test_case_name` 与本地用例对应
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCaseResult {
    pub test_case_name: String,
    pub passed: bool,
    #[serde(default)]
    pub actual_output: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub execution_time: f64,
    #[serde(default)]
    pub error: Option<String>,
}

/// POST `/language-server` 请求
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub language: Language,
    pub code: String,
}

/// POST `/language-server` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub semantic_tokens: Vec<SemanticToken>,
}

/// 语义令牌（行列均为 0 起始）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SemanticToken {
    pub line: u32,
    pub start: u32,
    pub length: u32,
    #[serde(rename = "tokenType")]
    pub token_type: String,
}

/// POST `/baekjoon-parse` 请求
#[derive(Debug, Clone, Serialize)]
pub struct ProblemParseRequest {
    pub problem_input: String,
}

/// POST `/baekjoon-parse` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemParseResponse {
    pub success: bool,
    #[serde(default)]
    pub test_cases: Vec<SamplePair>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 题目示例的输入 / 期望输出对
#[derive(Debug, Clone, Deserialize)]
pub struct SamplePair {
    #[serde(default)]
    pub input_data: String,
    #[serde(default)]
    pub expected_output: String,
}

/// GET `/baekjoon-problem/{id}` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemContentResponse {
    pub success: bool,
    #[serde(default)]
    pub problem_content: String,
}

/// POST `/ai-hint` 请求
#[derive(Debug, Clone, Serialize)]
pub struct AiHintRequest {
    pub language: Language,
    pub code: String,
    pub failed_test_case: FailedCaseDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_context: Option<String>,
    pub all_test_cases: Vec<SiblingCase>,
}

/// 失败用例的详细信息
#[derive(Debug, Clone, Serialize)]
pub struct FailedCaseDetail {
    pub test_case_name: String,
    pub input_data: String,
    pub expected_output: String,
    pub actual_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub passed: bool,
    pub execution_time: f64,
}

/// 供服务端做模式识别的同组用例
#[derive(Debug, Clone, Serialize)]
pub struct SiblingCase {
    pub name: String,
    pub input_data: String,
    pub expected_output: String,
}

/// POST `/ai-hint` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct AiHintResponse {
    pub success: bool,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}
