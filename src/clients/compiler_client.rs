//! 编译服务客户端
//!
//! 职责：封装编译服务的全部 HTTP 端点
//!
//! 核心功能：
//! - 单次执行与批量评测的提交 / 状态查询
//! - 语义令牌分析、题目解析、题目原文、AI 提示
//!
//! 响应先取文本再解析 JSON，解析失败时错误里能带上端点信息。

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::{
    AiHintRequest, AiHintResponse, BatchCaseResult, BatchStatusResponse, BatchTestRequest,
    CompileRequest, JobStatus, LanguagesResponse, ProblemContentResponse, ProblemParseRequest,
    ProblemParseResponse, RunOutput, RunStatusResponse, SubmitAck, TokenRequest, TokenResponse,
};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Language;
use crate::orchestrator::ai_hint::HintBackend;
use crate::orchestrator::problem_import::ProblemSource;
use crate::services::job_poller::{JobBackend, PollReport, SubmittedJob};
use crate::services::token_pipeline::TokenAnalyzer;

/// 编译服务客户端
#[derive(Clone)]
pub struct CompilerClient {
    http: reqwest::Client,
    base_url: String,
}

impl CompilerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::transport("client", e))?;
        Ok(CompilerClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("🔍 GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::transport(path, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport(path, e))?;
        serde_json::from_str(&body).map_err(|e| AppError::decode(path, e))
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("📤 POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::transport(path, e))?;
        let text = response
            .text()
            .await
            .map_err(|e| AppError::transport(path, e))?;
        serde_json::from_str(&text).map_err(|e| AppError::decode(path, e))
    }

    /// 查询服务端支持的语言列表
    pub async fn supported_languages(&self) -> Result<Vec<String>> {
        let response: LanguagesResponse = self.get_json("/languages").await?;
        Ok(response.languages)
    }

    /// 提交单次执行作业
    pub async fn submit_compile(&self, request: &CompileRequest) -> Result<SubmitAck> {
        self.post_json("/compile", request).await
    }

    /// 查询单次执行作业的状态
    pub async fn compile_status(&self, job_id: &str) -> Result<RunStatusResponse> {
        self.get_json(&format!("/status/{}", job_id)).await
    }

    /// 提交批量评测作业
    pub async fn submit_batch(&self, request: &BatchTestRequest) -> Result<SubmitAck> {
        self.post_json("/batch-test", request).await
    }

    /// 查询批量评测作业的状态
    pub async fn batch_status(&self, job_id: &str) -> Result<BatchStatusResponse> {
        self.get_json(&format!("/batch-status/{}", job_id)).await
    }

    /// 请求语义令牌分析
    pub async fn semantic_tokens(&self, request: &TokenRequest) -> Result<TokenResponse> {
        self.post_json("/language-server", request).await
    }

    /// 解析题目编号或 URL，取回示例用例
    pub async fn parse_problem(&self, request: &ProblemParseRequest) -> Result<ProblemParseResponse> {
        self.post_json("/baekjoon-parse", request).await
    }

    /// 取回题目原文
    pub async fn problem_content(&self, problem_id: &str) -> Result<ProblemContentResponse> {
        self.get_json(&format!("/baekjoon-problem/{}", problem_id)).await
    }

    /// 请求 AI 提示
    pub async fn ai_hint(&self, request: &AiHintRequest) -> Result<AiHintResponse> {
        self.post_json("/ai-hint", request).await
    }
}

/// 单次执行作业后端
#[derive(Clone)]
pub struct CompileJob {
    client: CompilerClient,
}

impl CompileJob {
    pub fn new(client: CompilerClient) -> Self {
        CompileJob { client }
    }
}

impl JobBackend for CompileJob {
    type Request = CompileRequest;
    type Output = RunOutput;

    async fn submit(&self, request: &CompileRequest) -> Result<SubmittedJob> {
        let ack = self.client.submit_compile(request).await?;
        Ok(SubmittedJob {
            job_id: ack.job_id,
            status: ack.status,
        })
    }

    async fn poll(&self, job_id: &str) -> Result<PollReport<RunOutput>> {
        let status = self.client.compile_status(job_id).await?;
        Ok(match status.status {
            JobStatus::Completed => PollReport::Completed(RunOutput {
                output: status.output.unwrap_or_default(),
                error: status.error.unwrap_or_default(),
                execution_time_seconds: status.execution_time.unwrap_or_default(),
            }),
            JobStatus::Failed => PollReport::Failed {
                message: status
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "执行失败".to_string()),
            },
            other => PollReport::InProgress {
                status: other,
                queue_position: status.queue_position,
            },
        })
    }
}

/// 批量评测作业后端
#[derive(Clone)]
pub struct BatchJob {
    client: CompilerClient,
}

impl BatchJob {
    pub fn new(client: CompilerClient) -> Self {
        BatchJob { client }
    }
}

impl JobBackend for BatchJob {
    type Request = BatchTestRequest;
    type Output = Vec<BatchCaseResult>;

    async fn submit(&self, request: &BatchTestRequest) -> Result<SubmittedJob> {
        let ack = self.client.submit_batch(request).await?;
        Ok(SubmittedJob {
            job_id: ack.job_id,
            status: ack.status,
        })
    }

    async fn poll(&self, job_id: &str) -> Result<PollReport<Vec<BatchCaseResult>>> {
        let status = self.client.batch_status(job_id).await?;
        Ok(match status.status {
            JobStatus::Completed => PollReport::Completed(status.results),
            JobStatus::Failed => PollReport::Failed {
                message: "批量评测失败".to_string(),
            },
            other => PollReport::InProgress {
                status: other,
                queue_position: None,
            },
        })
    }
}

impl TokenAnalyzer for CompilerClient {
    async fn analyze(&self, language: Language, code: &str) -> Result<Vec<crate::api::SemanticToken>> {
        let response = self
            .semantic_tokens(&TokenRequest {
                language,
                code: code.to_string(),
            })
            .await?;
        Ok(response.semantic_tokens)
    }
}

impl ProblemSource for CompilerClient {
    async fn parse_problem(&self, reference: &str) -> Result<ProblemParseResponse> {
        CompilerClient::parse_problem(
            self,
            &ProblemParseRequest {
                problem_input: reference.to_string(),
            },
        )
        .await
    }
}

impl HintBackend for CompilerClient {
    async fn problem_content(&self, problem_id: &str) -> Result<String> {
        let response = CompilerClient::problem_content(self, problem_id).await?;
        if !response.success {
            return Err(AppError::service("题目内容获取失败"));
        }
        Ok(response.problem_content)
    }

    async fn request_hint(&self, request: &AiHintRequest) -> Result<AiHintResponse> {
        self.ai_hint(request).await
    }
}
