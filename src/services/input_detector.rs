//! 标准输入需求检测
//!
//! 提交执行前做一次启发式扫描：代码里出现了该语言的读输入惯用法、
//! 而用户没有提供任何输入数据时，先让用户确认而不是直接提交。
//! 纯文本匹配，不理会注释和字符串字面量里的伪命中，宁可多问一次。

use crate::error::Result;
use crate::models::Language;
use regex::Regex;

/// 各语言的读输入惯用法（不区分大小写）
static INPUT_PATTERNS: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
    "python" => &[
        r"(?i)input\s*\(",
        r"(?i)raw_input\s*\(",
        r"(?i)getpass\s*\.\s*getpass\s*\(",
    ],
    "cpp" => &[
        r"(?i)cin\s*>>",
        r"(?i)getline\s*\(",
        r"(?i)scanf\s*\(",
        r"(?i)gets\s*\(",
        r"(?i)fgets\s*\(",
    ],
    "c" => &[
        r"(?i)scanf\s*\(",
        r"(?i)gets\s*\(",
        r"(?i)fgets\s*\(",
        r"(?i)getchar\s*\(",
        r"(?i)getc\s*\(",
    ],
    "java" => &[
        r"(?i)Scanner\s*\(",
        r"(?i)System\.in",
        r"(?i)BufferedReader\s*\(",
        r"(?i)InputStreamReader\s*\(",
    ],
    "javascript" => &[
        r"(?i)readline\s*\(",
        r"(?i)prompt\s*\(",
        r"(?i)process\.stdin",
        r#"(?i)require\s*\(\s*['"]readline['"]\s*\)"#,
    ],
};

/// 输入需求检测器，构造时一次性编译全部正则
pub struct InputRequirementDetector {
    compiled: Vec<(&'static str, Vec<Regex>)>,
}

impl InputRequirementDetector {
    pub fn new() -> Result<Self> {
        let mut compiled = Vec::with_capacity(INPUT_PATTERNS.len());
        for (tag, patterns) in INPUT_PATTERNS.entries() {
            let regexes = patterns
                .iter()
                .map(|&p| Regex::new(p))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| crate::error::AppError::validation(format!("输入检测规则无效: {}", e)))?;
            compiled.push((*tag, regexes));
        }
        Ok(InputRequirementDetector { compiled })
    }

    /// 代码是否包含该语言的读输入惯用法
    ///
    /// 未收录检测规则的语言一律返回 false。
    pub fn requires_input(&self, source: &str, language: Language) -> bool {
        self.compiled
            .iter()
            .find(|(tag, _)| *tag == language.as_str())
            .map(|(_, regexes)| regexes.iter().any(|r| r.is_match(source)))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> InputRequirementDetector {
        InputRequirementDetector::new().unwrap()
    }

    #[test]
    fn detects_python_input_call() {
        let d = detector();
        assert!(d.requires_input("n = int(input())", Language::Python));
        assert!(!d.requires_input("print(42)", Language::Python));
    }

    #[test]
    fn detects_c_scanf_with_whitespace_before_paren() {
        let d = detector();
        assert!(d.requires_input("scanf (\"%d\", &n);", Language::C));
        assert!(d.requires_input("ch = getchar();", Language::C));
    }

    #[test]
    fn detects_cpp_stream_extraction() {
        let d = detector();
        assert!(d.requires_input("int n; cin >> n;", Language::Cpp));
        assert!(!d.requires_input("cout << n;", Language::Cpp));
    }

    #[test]
    fn detects_java_system_in() {
        let d = detector();
        assert!(d.requires_input("new Scanner(System.in)", Language::Java));
        assert!(!d.requires_input("System.out.println(1);", Language::Java));
    }

    #[test]
    fn detects_javascript_readline_require() {
        let d = detector();
        assert!(d.requires_input("const rl = require('readline');", Language::Javascript));
        assert!(d.requires_input("process.stdin.on('data', f)", Language::Javascript));
        assert!(!d.requires_input("console.log(1)", Language::Javascript));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let d = detector();
        assert!(d.requires_input("SCANF(\"%d\", &n);", Language::C));
    }

    #[test]
    fn patterns_do_not_cross_languages() {
        let d = detector();
        // Python 的 input( 规则不应作用于 C 代码
        assert!(!d.requires_input("int input(void);", Language::C));
    }
}
