//! 本地测试用例集合
//!
//! 用例集始终非空，编号从 1 连续递增。删除用例后整组重新编号，
//! 并且所有名称重置为默认格式，保证名称与编号一致。

use crate::api::SamplePair;

/// 单个测试用例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub id: u32,
    pub name: String,
    pub input: String,
    pub expected: String,
    pub enabled: bool,
}

impl TestCase {
    fn blank(id: u32) -> Self {
        TestCase {
            id,
            name: TestCaseSet::default_name(id),
            input: String::new(),
            expected: String::new(),
            enabled: true,
        }
    }
}

/// 测试用例集合
///
/// 不变量：集合至少保留一个用例。
#[derive(Debug, Clone)]
pub struct TestCaseSet {
    cases: Vec<TestCase>,
}

impl TestCaseSet {
    /// 创建只含一个空白默认用例的集合
    pub fn new() -> Self {
        TestCaseSet {
            cases: vec![TestCase::blank(1)],
        }
    }

    /// 编号对应的默认名称
    pub fn default_name(id: u32) -> String {
        format!("测试 ({})", id)
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// 当前启用的用例
    pub fn enabled(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter().filter(|c| c.enabled)
    }

    /// 集合是否仍是初始状态（单个空输入的用例），用于判断导入前是否需要确认覆盖
    pub fn is_all_default(&self) -> bool {
        self.cases.len() == 1 && self.cases[0].input.is_empty()
    }

    /// 追加一个空白用例，编号取当前最大编号加一
    pub fn add(&mut self) -> u32 {
        let id = self.cases.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.cases.push(TestCase::blank(id));
        id
    }

    /// 删除指定用例并整组重新编号
    ///
    /// 只剩一个用例时删除是无操作。重新编号会把所有名称重置为默认格式，
    /// 用户自定义的名称也会被覆盖。
    pub fn remove(&mut self, id: u32) {
        if self.cases.len() <= 1 {
            return;
        }
        self.cases.retain(|c| c.id != id);
        self.renumber();
    }

    pub fn toggle(&mut self, id: u32) {
        if let Some(case) = self.cases.iter_mut().find(|c| c.id == id) {
            case.enabled = !case.enabled;
        }
    }

    pub fn set_input(&mut self, id: u32, input: impl Into<String>) {
        if let Some(case) = self.cases.iter_mut().find(|c| c.id == id) {
            case.input = input.into();
        }
    }

    pub fn set_expected(&mut self, id: u32, expected: impl Into<String>) {
        if let Some(case) = self.cases.iter_mut().find(|c| c.id == id) {
            case.expected = expected.into();
        }
    }

    /// 用一组新用例整体替换当前集合（题目导入时使用）
    ///
    /// 传入空集合时保持原状不变，维持非空不变量。
    pub fn replace_all(&mut self, cases: Vec<TestCase>) {
        if cases.is_empty() {
            return;
        }
        self.cases = cases;
    }

    /// 重置为初始的单个空白用例
    pub fn reset(&mut self) {
        self.cases = vec![TestCase::blank(1)];
    }

    /// 由题目示例对构建用例列表，编号从 1 开始
    pub fn cases_from_samples(problem_id: &str, samples: &[SamplePair]) -> Vec<TestCase> {
        samples
            .iter()
            .enumerate()
            .map(|(index, sample)| TestCase {
                id: index as u32 + 1,
                name: format!("BOJ({}) 示例 {}", problem_id, index + 1),
                input: sample.input_data.clone(),
                expected: sample.expected_output.clone(),
                enabled: true,
            })
            .collect()
    }

    fn renumber(&mut self) {
        for (index, case) in self.cases.iter_mut().enumerate() {
            case.id = index as u32 + 1;
            case.name = Self::default_name(case.id);
        }
    }
}

impl Default for TestCaseSet {
    fn default() -> Self {
        Self::new()
    }
}

/// 批量评测中单个用例的判定结果
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub test_case_id: u32,
    pub passed: bool,
    pub actual: String,
    pub expected: String,
    pub execution_time_seconds: f64,
    pub error: Option<String>,
}

/// 请求 AI 提示时所需的失败用例快照
#[derive(Debug, Clone, PartialEq)]
pub struct FailingCase {
    pub name: String,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub error: Option<String>,
    pub execution_time_seconds: f64,
}

impl FailingCase {
    pub fn from_parts(case: &TestCase, result: &TestResult) -> Self {
        FailingCase {
            name: case.name.clone(),
            input: case.input.clone(),
            expected: result.expected.clone(),
            actual: result.actual.clone(),
            error: result.error.clone(),
            execution_time_seconds: result.execution_time_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_starts_with_single_default_case() {
        let set = TestCaseSet::new();
        assert_eq!(set.len(), 1);
        assert_eq!(set.cases()[0].id, 1);
        assert_eq!(set.cases()[0].name, "测试 (1)");
        assert!(set.is_all_default());
    }

    #[test]
    fn add_uses_max_id_plus_one() {
        let mut set = TestCaseSet::new();
        set.add();
        set.add();
        assert_eq!(set.cases().iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2, 3]);
        set.remove(2);
        // 重新编号后再追加仍是 max+1
        let id = set.add();
        assert_eq!(id, 3);
    }

    #[test]
    fn remove_renumbers_and_resets_names() {
        let mut set = TestCaseSet::new();
        set.add();
        set.add();
        set.set_input(2, "4 2");
        set.remove(1);
        let ids: Vec<_> = set.cases().iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(set.cases()[0].name, "测试 (1)");
        assert_eq!(set.cases()[1].name, "测试 (2)");
        // 原 2 号用例的内容保留，只有编号和名称变化
        assert_eq!(set.cases()[0].input, "4 2");
    }

    #[test]
    fn cannot_remove_last_case() {
        let mut set = TestCaseSet::new();
        set.remove(1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn replace_all_ignores_empty_input() {
        let mut set = TestCaseSet::new();
        set.set_input(1, "保留");
        set.replace_all(Vec::new());
        assert_eq!(set.cases()[0].input, "保留");
    }

    #[test]
    fn edited_set_is_no_longer_default() {
        let mut set = TestCaseSet::new();
        set.set_input(1, "1 2");
        assert!(!set.is_all_default());
        set.reset();
        assert!(set.is_all_default());
    }

    #[test]
    fn cases_from_samples_numbers_and_names_sequentially() {
        let samples = vec![
            SamplePair {
                input_data: "1 2".to_string(),
                expected_output: "3".to_string(),
            },
            SamplePair {
                input_data: "5 7".to_string(),
                expected_output: "12".to_string(),
            },
        ];
        let cases = TestCaseSet::cases_from_samples("1000", &samples);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "BOJ(1000) 示例 1");
        assert_eq!(cases[1].name, "BOJ(1000) 示例 2");
        assert!(cases.iter().all(|c| c.enabled));
    }
}
