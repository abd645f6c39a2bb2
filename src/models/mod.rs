//! 领域数据模型
//!
//! - [`language`]：支持的编程语言及其起始代码模板
//! - [`test_case`]：本地测试用例集合与测试结果

pub mod language;
pub mod test_case;

pub use language::Language;
pub use test_case::{FailingCase, TestCase, TestCaseSet, TestResult};
