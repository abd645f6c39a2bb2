//! 顶层门面
//!
//! 职责：持有编辑器会话的全部状态（各语言的文档、输入数据、
//! 测试用例集），并把用户操作分发给对应的编排器
//!
//! 每种语言保留一份独立文档，切换语言时互不覆盖；文档初始
//! 内容为该语言的起始代码模板。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::clients::{BatchJob, CompileJob, CompilerClient};
use crate::config::Config;
use crate::error::Result;
use crate::models::{FailingCase, Language, TestCase, TestCaseSet};
use crate::services::hint_cache::HintEntry;
use crate::services::token_pipeline::{DecorationState, SemanticTokenPipeline};
use crate::orchestrator::ai_hint::AiHintCoordinator;
use crate::orchestrator::batch_test::{BatchTestOrchestrator, TestRunState};
use crate::orchestrator::problem_import::{ProblemImportCoordinator, ProblemImportResult};
use crate::orchestrator::single_run::{Dispatch, RunState, SingleRunOrchestrator};

/// 一次题目导入请求的受理结果
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// 已导入并替换用例集
    Imported { problem_id: String, case_count: usize },
    /// 现有用例已被编辑过，等待用户确认覆盖
    NeedsConfirmation,
}

/// 编辑器会话门面
pub struct App {
    config: Config,
    documents: HashMap<Language, String>,
    language: Language,
    input_data: String,
    test_cases: TestCaseSet,
    pipeline: SemanticTokenPipeline<CompilerClient>,
    single_run: SingleRunOrchestrator<CompileJob>,
    batch: BatchTestOrchestrator<BatchJob>,
    import: ProblemImportCoordinator<CompilerClient>,
    hints: AiHintCoordinator<CompilerClient>,
    client: CompilerClient,
}

impl App {
    /// 创建会话，不发起任何网络请求
    pub fn new(config: Config) -> Result<Self> {
        let client = CompilerClient::new(&config)?;
        let pipeline = SemanticTokenPipeline::new(
            Arc::new(client.clone()),
            Duration::from_millis(config.debounce_ms),
            Duration::from_millis(config.settle_delay_ms),
        );
        let single_run = SingleRunOrchestrator::new(CompileJob::new(client.clone()), &config)?;
        let batch = BatchTestOrchestrator::new(BatchJob::new(client.clone()), &config);
        let import = ProblemImportCoordinator::new(client.clone())?;
        let hints = AiHintCoordinator::new(client.clone())?;

        let mut documents = HashMap::new();
        for lang in Language::all() {
            documents.insert(*lang, lang.template().to_string());
        }

        Ok(App {
            config,
            documents,
            language: Language::C,
            input_data: String::new(),
            test_cases: TestCaseSet::new(),
            pipeline,
            single_run,
            batch,
            import,
            hints,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// 当前语言的文档内容
    pub fn code(&self) -> &str {
        self.documents
            .get(&self.language)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn input_data(&self) -> &str {
        &self.input_data
    }

    pub fn set_input_data(&mut self, input: impl Into<String>) {
        self.input_data = input.into();
    }

    pub fn test_cases(&self) -> &TestCaseSet {
        &self.test_cases
    }

    pub fn test_cases_mut(&mut self) -> &mut TestCaseSet {
        &mut self.test_cases
    }

    /// 当前生效的高亮装饰
    pub fn decorations(&self) -> DecorationState {
        self.pipeline.decorations()
    }

    /// 会话装载后的首次高亮刷新
    pub fn initialize(&self) {
        let _ = self.pipeline.refresh_now(self.language, self.code());
    }

    /// 切换语言并立即刷新该语言文档的高亮
    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        info!("切换语言: {} -> {}", self.language, language);
        self.language = language;
        let _ = self.pipeline.refresh_now(language, self.code());
    }

    /// 编辑事件：更新文档并安排防抖分析
    pub fn on_edit(&mut self, text: impl Into<String>) {
        let text = text.into();
        let _ = self.pipeline.on_edit(self.language, &text);
        self.documents.insert(self.language, text);
    }

    /// 订阅单次执行状态
    pub fn run_state(&self) -> watch::Receiver<RunState> {
        self.single_run.state()
    }

    /// 订阅批量评测状态
    pub fn test_run_state(&self) -> watch::Receiver<TestRunState> {
        self.batch.state()
    }

    /// 执行当前文档，可能要求先确认输入
    pub async fn run(&self) -> Dispatch {
        self.single_run
            .run(self.language, self.code(), &self.input_data)
            .await
    }

    /// 用户确认无需输入后再次执行
    pub async fn run_confirmed(&self) -> Dispatch {
        self.single_run
            .run_confirmed(self.language, self.code(), &self.input_data)
            .await
    }

    /// 批量评测所有启用的用例
    pub async fn run_all_tests(&self) -> Result<()> {
        self.batch
            .run_all(self.language, self.code(), self.test_cases.cases())
            .await
    }

    /// 导入题目示例
    ///
    /// 现有用例被编辑过而 `confirmed` 为否时不导入，返回待确认。
    pub async fn import_problem(&mut self, reference: &str, confirmed: bool) -> Result<ImportOutcome> {
        if !confirmed && self.import.needs_confirmation(&self.test_cases) {
            return Ok(ImportOutcome::NeedsConfirmation);
        }
        let ProblemImportResult { problem_id, cases } = self.import.import(reference).await?;
        let case_count = cases.len();
        self.test_cases.replace_all(cases);
        Ok(ImportOutcome::Imported {
            problem_id,
            case_count,
        })
    }

    /// 为失败用例请求 AI 提示
    pub async fn request_hint(&self, failing: &FailingCase) -> Result<HintEntry> {
        self.hints
            .request_hint(self.language, self.code(), failing, self.test_cases.cases())
            .await
    }

    /// 由编号查找本地用例
    pub fn test_case(&self, id: u32) -> Option<&TestCase> {
        self.test_cases.get(id)
    }

    /// 查询服务端支持的语言列表
    pub async fn supported_languages(&self) -> Result<Vec<String>> {
        self.client.supported_languages().await
    }
}
