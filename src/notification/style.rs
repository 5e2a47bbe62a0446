//! 行内样式转换 - 把 `*bold*` / `_italic_` 替换为 Unicode 数学字母
//!
//! Signal 没有富文本标记，只能把 ASCII 字母/数字替换成外观相似的
//! Mathematical Alphanumeric Symbols 字符来模拟粗体和斜体。
//!
//! 匹配规则：
//! 1. 最左匹配，前缀尽可能短
//! 2. 内容为允许字符集的最长连续串，遇到下一个 marker 即结束
//! 3. 不支持嵌套，内层 marker 视为外层的结束符
//! 4. 未闭合的 marker 原样保留

use std::borrow::Cow;

// Mathematical Sans-Serif Bold
const BOLD_UPPER: u32 = 0x1D5D4;
const BOLD_LOWER: u32 = 0x1D5EE;
const BOLD_DIGIT: u32 = 0x1D7EC;

// Mathematical Sans-Serif Italic（Unicode 没有斜体数字，数字用 Sans-Serif）
const ITALIC_UPPER: u32 = 0x1D608;
const ITALIC_LOWER: u32 = 0x1D622;
const ITALIC_DIGIT: u32 = 0x1D7E2;

/// 映射表大小：A-Z, a-z, 0-9
const TABLE_LEN: usize = 62;

/// 内容中除字母数字外允许出现的字符
const CONTENT_PUNCT: &[char] = &[' ', '_', '+', '/', '\\', '-', ',', ';', ':', '°'];

/// 粗体：`*text*`
pub static BOLD: StyleSpec = StyleSpec {
    marker: '*',
    table: build_table(BOLD_UPPER, BOLD_LOWER, BOLD_DIGIT),
};

/// 斜体：`_text_`
pub static ITALIC: StyleSpec = StyleSpec {
    marker: '_',
    table: build_table(ITALIC_UPPER, ITALIC_LOWER, ITALIC_DIGIT),
};

/// 一种样式：marker + 字符映射表
#[derive(Debug)]
pub struct StyleSpec {
    marker: char,
    table: [char; TABLE_LEN],
}

const fn build_table(upper: u32, lower: u32, digit: u32) -> [char; TABLE_LEN] {
    let mut table = ['\0'; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        let offset = i as u32;
        let code = if i < 26 {
            upper + offset
        } else if i < 52 {
            lower + offset - 26
        } else {
            digit + offset - 52
        };
        table[i] = match char::from_u32(code) {
            Some(c) => c,
            None => panic!("style table base is not a valid code point"),
        };
        i += 1;
    }
    table
}

impl StyleSpec {
    /// 映射单个字符，表外字符原样返回
    pub fn style_char(&self, c: char) -> char {
        let index = match c {
            'A'..='Z' => c as usize - 'A' as usize,
            'a'..='z' => c as usize - 'a' as usize + 26,
            '0'..='9' => c as usize - '0' as usize + 52,
            _ => return c,
        };
        self.table[index]
    }

    pub fn style(&self, text: &str) -> String {
        text.chars().map(|c| self.style_char(c)).collect()
    }

    /// 字符能否出现在 span 内容中（marker 本身除外）
    pub fn allows(&self, c: char) -> bool {
        c != self.marker && (c.is_alphanumeric() || CONTENT_PUNCT.contains(&c))
    }

    /// 查找最左侧的完整 span，返回 (开 marker, 闭 marker) 的字节位置
    fn find_span(&self, text: &str) -> Option<(usize, usize)> {
        let marker_len = self.marker.len_utf8();
        let mut search = 0;

        while let Some(rel) = text[search..].find(self.marker) {
            let open = search + rel;
            let body = open + marker_len;

            for (i, c) in text[body..].char_indices() {
                if c == self.marker {
                    return Some((open, body + i));
                }
                if !self.allows(c) {
                    break;
                }
            }

            // 这个 marker 开不了 span，从下一个字符继续
            search = body;
        }

        None
    }
}

/// 一次匹配切出的片段
struct Span<'a> {
    prefix: &'a str,
    content: &'a str,
}

/// 用指定样式转换所有 span
///
/// 每个 span 去掉 marker 后替换为样式字符，样式文本与相邻的非空白文本之间补一个空格；
/// 空 span 只在两侧都是非空白文本时留一个空格。
/// 没有可匹配的 span 时原样返回。
pub fn transform(input: &str, spec: &StyleSpec) -> String {
    let marker_len = spec.marker.len_utf8();
    let mut spans = Vec::new();
    let mut rest = input;

    while let Some((open, close)) = spec.find_span(rest) {
        spans.push(Span {
            prefix: &rest[..open],
            content: &rest[open + marker_len..close],
        });
        rest = &rest[close + marker_len..];
    }

    if spans.is_empty() {
        return input.to_string();
    }

    // 从右往左拼接：每个 span 之后是否补空格取决于已拼好部分的首字符
    let mut parts: Vec<Cow<'_, str>> = vec![Cow::Borrowed(rest)];
    let mut head = rest.chars().next();

    for span in spans.iter().rev() {
        let styled = spec.style(span.content);

        let prefix_last = span.prefix.chars().next_back();
        let (gap_before, gap_after) = if styled.is_empty() {
            (false, solid(prefix_last) && solid(head))
        } else {
            (
                solid(prefix_last) && solid(styled.chars().next()),
                solid(styled.chars().next_back()) && solid(head),
            )
        };

        head = span
            .prefix
            .chars()
            .next()
            .or_else(|| styled.chars().next())
            .or(if gap_after { Some(' ') } else { head });

        if gap_after {
            parts.push(Cow::Borrowed(" "));
        }
        parts.push(Cow::Owned(styled));
        if gap_before {
            parts.push(Cow::Borrowed(" "));
        }
        parts.push(Cow::Borrowed(span.prefix));
    }

    parts.into_iter().rev().collect()
}

fn solid(c: Option<char>) -> bool {
    c.is_some_and(|c| !c.is_whitespace())
}

/// 先粗体后斜体
pub fn stylize(input: &str) -> String {
    transform(&transform(input, &BOLD), &ITALIC)
}

/// 拼接标题和正文并转换样式
///
/// 有标题时生成 `*<title>*\n<body>`，空白标题忽略。
pub fn compose(title: Option<&str>, body: &str) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => stylize(&format!("{}{}{}\n{}", BOLD.marker, title, BOLD.marker, body)),
        None => stylize(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_table_bounds() {
        assert_eq!(BOLD.style_char('A'), '𝗔');
        assert_eq!(BOLD.style_char('z'), '𝘇');
        assert_eq!(BOLD.style_char('0'), '𝟬');
        assert_eq!(BOLD.style_char('9'), '𝟵');
        assert_eq!(ITALIC.style_char('A'), '𝘈');
        assert_eq!(ITALIC.style_char('z'), '𝘻');
        assert_eq!(ITALIC.style_char('7'), '𝟩');
    }

    #[test]
    fn test_style_char_passthrough() {
        for c in [' ', '-', '°', 'é', '中', '_', '*'] {
            assert_eq!(BOLD.style_char(c), c);
            assert_eq!(ITALIC.style_char(c), c);
        }
    }

    #[test]
    fn test_no_markers_unchanged() {
        for s in ["", "plain text", "ünïcödé 中文 🎉", "a + b = c"] {
            assert_eq!(transform(s, &BOLD), s);
            assert_eq!(transform(s, &ITALIC), s);
        }
    }

    #[test]
    fn test_single_bold_span() {
        assert_eq!(transform("hello *world* bye", &BOLD), "hello 𝘄𝗼𝗿𝗹𝗱 bye");
    }

    #[test]
    fn test_two_bold_spans() {
        assert_eq!(transform("*a* and *b*", &BOLD), "𝗮 and 𝗯");
    }

    #[test]
    fn test_span_gets_separating_spaces() {
        assert_eq!(transform("a*b*c", &BOLD), "a 𝗯 c");
        assert_eq!(transform("*a**b*", &BOLD), "𝗮 𝗯");
    }

    #[test]
    fn test_empty_content_collapses() {
        assert_eq!(transform("x ** y", &BOLD), "x  y");
        assert_eq!(transform("a**b", &BOLD), "a b");
        assert_eq!(transform("**b", &BOLD), "b");
        assert_eq!(transform("**", &BOLD), "");
    }

    #[test]
    fn test_unterminated_marker() {
        assert_eq!(transform("plain *oops", &BOLD), "plain *oops");
        assert_eq!(transform("snake_case", &ITALIC), "snake_case");
    }

    #[test]
    fn test_disallowed_char_blocks_span() {
        assert_eq!(transform("say *hi!* now", &BOLD), "say *hi!* now");
        assert_eq!(transform("_wow?_", &ITALIC), "_wow?_");
    }

    #[test]
    fn test_failed_closer_can_open() {
        // 第一个 `*` 因 `!` 失败，第二个 `*` 作为开头与第三个配对
        assert_eq!(transform("*hi!* there *x*", &BOLD), "*hi! 𝘁𝗵𝗲𝗿𝗲 x*");
    }

    #[test]
    fn test_allowed_punctuation_kept() {
        assert_eq!(
            transform("*Temp: 21° / 70%*", &BOLD),
            "*Temp: 21° / 70%*",
        );
        assert_eq!(transform("*Temp: 21° +-/*", &BOLD), "𝗧𝗲𝗺𝗽: 𝟮𝟭° +-/");
        assert_eq!(transform("*a\\b,c;d*", &BOLD), "𝗮\\𝗯,𝗰;𝗱");
    }

    #[test]
    fn test_newline_not_in_content() {
        assert_eq!(transform("*a\nb*", &BOLD), "*a\nb*");
    }

    #[test]
    fn test_no_nesting() {
        // 内层 marker 就是外层的结束符
        assert_eq!(transform("*outer *inner* rest*", &BOLD), "𝗼𝘂𝘁𝗲𝗿 inner 𝗿𝗲𝘀𝘁");
    }

    #[test]
    fn test_multibyte_prefix_suffix_preserved() {
        assert_eq!(transform("温度 *ok* 🎉", &BOLD), "温度 𝗼𝗸 🎉");
    }

    #[test]
    fn test_underscore_inside_bold() {
        assert_eq!(transform("*my_var*", &BOLD), "𝗺𝘆_𝘃𝗮𝗿");
    }

    #[test]
    fn test_italic_span() {
        assert_eq!(transform("an _ital_ word", &ITALIC), "an 𝘪𝘵𝘢𝘭 word");
    }

    #[test]
    fn test_stylize_no_cross_contamination() {
        assert_eq!(stylize("*bold* and _ital_"), "𝗯𝗼𝗹𝗱 and 𝘪𝘵𝘢𝘭");
    }

    #[test]
    fn test_stylize_italic_inside_bold() {
        // 粗体保留了 `_`，斜体仍会匹配，但已是样式字符的内容不再映射
        assert_eq!(stylize("*a_b_c*"), "𝗮 𝗯 𝗰");
    }

    #[test]
    fn test_second_pass_is_noop() {
        for s in ["hello *world* bye", "*a* and *b*", "x _y_ z", "*x_y*"] {
            let once = transform(s, &BOLD);
            assert_eq!(transform(&once, &BOLD), once);
            let styled = stylize(s);
            assert_eq!(stylize(&styled), styled);
        }
    }

    #[test]
    fn test_many_spans() {
        let input = "*a*".repeat(100_000);
        let output = transform(&input, &BOLD);
        assert!(!output.contains('*'));
        assert!(output.starts_with("𝗮 𝗮"));
    }

    #[test]
    fn test_compose_with_title() {
        assert_eq!(compose(Some("Title"), "body text"), "𝗧𝗶𝘁𝗹𝗲\nbody text");
    }

    #[test]
    fn test_compose_blank_title() {
        assert_eq!(compose(Some("  "), "body"), "body");
        assert_eq!(compose(None, "*x*"), "𝘅");
    }

    #[test]
    fn test_compose_unstylable_title() {
        assert_eq!(compose(Some("Alert!"), "body"), "*Alert!*\nbody");
    }
}
