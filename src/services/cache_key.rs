//! AI 提示的缓存键构造
//!
//! 键同时编码语言、源代码指纹和失败用例的身份。任何一个维度
//! 变化（改了代码、换了语言、或者失败的用例不同）都会得到
//! 不同的键，从而触发新的提示请求而不是命中旧缓存。

use crate::models::{FailingCase, Language};
use crate::services::hasher::safe_hash;

/// 构造缓存键：`{语言}_{代码指纹}_{用例名}_{期望输出}_{实际输出}`
pub fn build_key(language: Language, source: &str, failing: &FailingCase) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        language.as_str(),
        safe_hash(source),
        failing.name,
        failing.expected,
        failing.actual
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(name: &str, expected: &str, actual: &str) -> FailingCase {
        FailingCase {
            name: name.to_string(),
            input: String::new(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error: None,
            execution_time_seconds: 0.1,
        }
    }

    #[test]
    fn identical_inputs_build_identical_keys() {
        let case = failing("测试 (1)", "3", "4");
        let a = build_key(Language::Python, "print(4)", &case);
        let b = build_key(Language::Python, "print(4)", &case);
        assert_eq!(a, b);
    }

    #[test]
    fn code_change_changes_key() {
        let case = failing("测试 (1)", "3", "4");
        let a = build_key(Language::Python, "print(4)", &case);
        let b = build_key(Language::Python, "print(5)", &case);
        assert_ne!(a, b);
    }

    #[test]
    fn different_failing_case_changes_key() {
        let a = build_key(Language::C, "int main(){}", &failing("测试 (1)", "3", "4"));
        let b = build_key(Language::C, "int main(){}", &failing("测试 (2)", "3", "4"));
        assert_ne!(a, b);
    }

    #[test]
    fn key_starts_with_language_tag() {
        let key = build_key(Language::Java, "class Main {}", &failing("测试 (1)", "", ""));
        assert!(key.starts_with("java_"));
    }
}
