//! 章节分割器
//!
//! 将生成的 markdown 小说文本按章节标记分割为有序章节序列。
//! 对任意输入都是全函数：缺失标记、空文本等畸形输入只会退化，不会报错。

/// 章节边界标记：以此前缀开头的行视为新章节的起始
pub const CHAPTER_MARKER: &str = "## Chapter ";

/// 标题缺失时的兜底标题
pub const FALLBACK_TITLE: &str = "Generated Novel";

/// 将小说文本分割为章节
///
/// 逐行扫描，维护一个累积缓冲区：
/// - 以 `"## Chapter "` 开头的行开启新章节；首个标记之前的内容
///   （序言、书名行等）不单独成章，而是并入第一章的正文
/// - 其他行追加到当前缓冲区
/// - 扫描结束后，非空白的缓冲区作为最后一章输出（去除首尾空白）
///
/// 没有任何标记的输入整体作为单独一章返回；空输入返回空序列。
pub fn split_into_chapters(text: &str) -> Vec<String> {
    let mut chapters = Vec::new();
    let mut current = String::new();
    let mut seen_heading = false;

    for line in text.split('\n') {
        if line.starts_with(CHAPTER_MARKER) {
            if seen_heading && !current.trim().is_empty() {
                chapters.push(current.trim().to_string());
                current.clear();
            }
            seen_heading = true;
        }
        current.push_str(line);
        current.push('\n');
    }

    let last = current.trim();
    if !last.is_empty() {
        chapters.push(last.to_string());
    }

    chapters
}

/// 从小说文本提取标题
///
/// 取第一行并去掉 markdown 一级标题前缀 `"# "`；空文本返回兜底标题
pub fn extract_title(text: &str) -> &str {
    let first = text.lines().next().unwrap_or("");
    let title = first.strip_prefix("# ").unwrap_or(first).trim();
    if title.is_empty() {
        FALLBACK_TITLE
    } else {
        title
    }
}

/// 提取章节的朗读文本
///
/// 去掉所有以 `#` 开头的标题行，剩余部分交给 TTS 合成
pub fn narration_text(chapter: &str) -> String {
    chapter
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_yields_single_chapter() {
        let text = "  just a plain story without headings\nsecond line  ";
        let chapters = split_into_chapters(text);

        assert_eq!(chapters.len(), 1);
        assert_eq!(
            chapters[0],
            "just a plain story without headings\nsecond line"
        );
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(split_into_chapters("").is_empty());
        assert!(split_into_chapters("   \n\n  ").is_empty());
    }

    #[test]
    fn test_two_chapters() {
        let text = "## Chapter 1: A\nfoo\n## Chapter 2: B\nbar\n";
        let chapters = split_into_chapters(text);

        assert_eq!(chapters, vec!["## Chapter 1: A\nfoo", "## Chapter 2: B\nbar"]);
    }

    #[test]
    fn test_preamble_merges_into_first_chapter() {
        // 首个章节标记之前的内容（书名行）并入第一章，不单独成章
        let text = "# The Hollow Crown\n\n## Chapter 1: Dawn\nbody\n## Chapter 2: Dusk\nmore";
        let chapters = split_into_chapters(text);

        assert_eq!(chapters.len(), 2);
        assert!(chapters[0].starts_with("# The Hollow Crown"));
        assert!(chapters[0].contains("## Chapter 1: Dawn"));
        assert_eq!(chapters[1], "## Chapter 2: Dusk\nmore");
    }

    #[test]
    fn test_resegmenting_is_stable() {
        // 章节重新拼接后再分割，结果不变
        let text = "intro line\n## Chapter 1: A\nfoo\n\n## Chapter 2: B\nbar\n## Chapter 3: C\nbaz";
        let chapters = split_into_chapters(text);
        let rejoined = chapters.join("\n");
        let chapters_again = split_into_chapters(&rejoined);

        assert_eq!(chapters, chapters_again);
    }

    #[test]
    fn test_marker_requires_exact_prefix() {
        // "### Chapter" 或 "##Chapter" 不是章节边界
        let text = "### Chapter 1: not a boundary\n##Chapter 2: neither\ntext";
        let chapters = split_into_chapters(text);

        assert_eq!(chapters.len(), 1);
    }

    #[test]
    fn test_extract_title_strips_h1_prefix() {
        assert_eq!(extract_title("# My Novel\n## Chapter 1: A"), "My Novel");
        assert_eq!(extract_title("Plain Title\nbody"), "Plain Title");
        assert_eq!(extract_title(""), FALLBACK_TITLE);
        assert_eq!(extract_title("#  \nbody"), FALLBACK_TITLE);
    }

    #[test]
    fn test_narration_text_drops_heading_lines() {
        let chapter = "## Chapter 1: Dawn\nFirst paragraph.\n# stray heading\nSecond paragraph.";
        let text = narration_text(chapter);

        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_narration_text_of_heading_only_chapter_is_empty() {
        assert_eq!(narration_text("## Chapter 1: Empty"), "");
    }
}
