//! 源代码短指纹
//!
//! 缓存键里直接嵌入完整源代码会让键无法控制长度，这里用一个
//! 32 位滚动哈希把任意文本折叠成 8 位十六进制指纹。对任意
//! Unicode 文本（含中文和代理对之外的补充平面字符）都是安全的，
//! 相同文本永远得到相同指纹。

/// 计算文本的 8 位十六进制指纹
///
/// 算法：逐字符 `acc = acc * 31 + codepoint` 的 32 位环绕累加，
/// 取绝对值后格式化为固定 8 位小写十六进制。
pub fn safe_hash(text: &str) -> String {
    let mut acc: i32 = 0;
    for ch in text.chars() {
        acc = acc.wrapping_mul(31).wrapping_add(ch as i32);
    }
    format!("{:08x}", acc.unsigned_abs())
}
