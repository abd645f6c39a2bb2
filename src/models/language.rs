//! 支持的编程语言
//!
//! 语言标识在线上以小写字符串传输，本地附带一份起始代码模板，
//! 编辑器在语言切换且当前文档为空时用模板填充。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 编译服务支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Python,
    Java,
    Javascript,
}

/// 各语言的起始代码模板
static TEMPLATES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "c" => "// 在这里编写 C 代码\n#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}",
    "cpp" => "// 在这里编写 C++ 代码\n#include <iostream>\n#include <string>\nusing namespace std;\n\nint main() {\n    cout << \"Hello, World!\" << endl;\n    return 0;\n}",
    "python" => "# 在这里编写 Python 代码\nprint(\"Hello, World!\")",
    "java" => "// 在这里编写 Java 代码\npublic class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}",
    "javascript" => "// 在这里编写 JavaScript 代码\nconsole.log(\"Hello, World!\");",
};

impl Language {
    /// 线上使用的小写标识
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Python => "python",
            Language::Java => "java",
            Language::Javascript => "javascript",
        }
    }

    /// 从小写标识解析，未知标识返回 None
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "c" => Some(Language::C),
            "cpp" => Some(Language::Cpp),
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            "javascript" => Some(Language::Javascript),
            _ => None,
        }
    }

    /// 该语言的起始代码模板
    pub fn template(&self) -> &'static str {
        TEMPLATES.get(self.as_str()).copied().unwrap_or_default()
    }

    /// 所有支持的语言（默认语言 C 排在首位）
    pub fn all() -> &'static [Language] {
        &[
            Language::C,
            Language::Cpp,
            Language::Python,
            Language::Java,
            Language::Javascript,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_language() {
        for lang in Language::all() {
            assert_eq!(Language::parse(lang.as_str()), Some(*lang));
        }
        assert_eq!(Language::parse("rust"), None);
    }

    #[test]
    fn every_language_has_a_template() {
        for lang in Language::all() {
            assert!(!lang.template().is_empty());
        }
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_value(Language::Cpp).unwrap(), "cpp");
        assert_eq!(
            serde_json::from_str::<Language>("\"javascript\"").unwrap(),
            Language::Javascript
        );
    }
}
