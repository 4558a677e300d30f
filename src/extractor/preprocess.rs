use crate::extractor::SCHEMA_METHOD;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

// 括号组内只允许相邻的双引号字符串字面量（中间可以有空白/换行）
static STRING_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\(\s*"[^"]*"(?:\s*"[^"]*")*\s*\)"#).unwrap());

static STRING_PIECE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap());

static DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)def\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Merges parenthesized runs of adjacent string literals into one literal.
///
/// The dialect wraps long tooltip/help text across lines as adjacent
/// literals inside parentheses:
///
/// ```text
/// "tooltip": (
///     "Drastically reduces memory use "
///     "but will introduce seams."
/// )
/// ```
///
/// becomes `"tooltip": ("Drastically reduces memory use but will introduce seams.")`.
///
/// Applying the transform twice is a no-op. Literals containing escaped
/// quotes are a known limitation.
pub fn fold_string_groups(code: &str) -> String {
    let mut folded_groups = 0usize;
    let result = STRING_GROUP_RE.replace_all(code, |caps: &Captures| {
        folded_groups += 1;
        let mut merged = String::from("(\"");
        for piece in STRING_PIECE_RE.captures_iter(&caps[0]) {
            merged.push_str(&piece[1]);
        }
        merged.push_str("\")");
        merged
    });
    if folded_groups > 0 {
        debug!("Folded {} string literal group(s)", folded_groups);
    }
    result.into_owned()
}

/// Replaces the body of every function except the schema-declaration method
/// with a fixed no-op stub at the original indentation.
///
/// Function bodies may contain imports, arithmetic or calls that are
/// irrelevant to schema extraction and not guaranteed to parse; stubbing
/// them keeps every class/function boundary intact while discarding the
/// rest.
///
/// The body extent is found by scanning forward from the declaration line:
/// blank lines, column-0 comment lines and `):` signature continuations are
/// skipped, and the first remaining line indented at or below the
/// declaration ends the body. Mixed tab/space indentation is a known
/// limitation.
pub fn trivialize_function_bodies(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        let indent = match DEF_RE.captures(line) {
            Some(caps) if &caps[2] != SCHEMA_METHOD => caps[1].to_string(),
            _ => {
                out.push(line.to_string());
                continue;
            }
        };

        out.push(format!("{indent}def function():"));
        out.push(format!("{indent}    return None"));

        // 跳过整个函数体：直到缩进回到声明级别为止
        while i < lines.len() {
            let next = lines[i];
            i += 1;

            if next.trim().is_empty()
                || next.starts_with('#')
                || next.trim_start().starts_with("):")
            {
                continue;
            }

            let next_indent = next.len() - next.trim_start().len();
            if next_indent <= indent.len() {
                // We exited the function.
                i -= 1;
                break;
            }
        }
    }

    out.join("\n")
}
