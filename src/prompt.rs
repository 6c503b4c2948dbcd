//! Prompt assembly for the summarization call.
//!
//! The prompt embeds the three category blocks in fixed order (news, papers,
//! code), each preceded by its selection instructions and followed by the
//! flattened content lines as markdown bullets. The trailing instruction
//! asks for Chinese-language markdown tables with blank lines between them,
//! matching the report format downstream consumers expect.
//!
//! Every category block is bounded by a character cap before inclusion.
//! The summarization endpoint has a finite input window, and on a busy day
//! the GitHub trending scraper alone can emit hundreds of rows, so when a
//! block exceeds the cap the oldest-appended lines are dropped first and
//! the drop is logged.

use crate::models::ClassifiedCorpus;
use std::fmt::Write;
use tracing::{debug, instrument, warn};

/// Default per-category character cap, comfortably inside a ~1M-token
/// context window even for multi-byte text.
pub const DEFAULT_CATEGORY_CHAR_CAP: usize = 120_000;

const PREAMBLE: &str = "你是一名专业的信息分析助手，我将提供三类数据：新闻资讯、arXiv论文、GitHub代码仓，请你逐类分析并筛选推荐内容。\
最终以中文输出，不同类别请分别用markdown表格展示，表格之间换行。\n\n";

const NEWS_HEADER: &str = "【新闻资讯】\n\
- 从以下新闻中选出你认为最重要的最多5条；\n\
- 输出格式：标题、推荐理由、内容概述（100字以内）、类别、链接；\n\n";

const PAPERS_HEADER: &str = "【arXiv论文】\n\
- 从以下论文中筛选出最多5篇（如内容极其重要可略微超过），重点关注RAG、大模型、模型优化、知名作者或机构；\n\
- 输出格式：论文标题（原标题）、论文标题（中文标题）、推荐原因、论文概述（不超过100字，中文）、论文链接；\n\n";

const CODE_HEADER: &str = "【GitHub代码】\n\
- 分析以下代码仓的功能，筛选不超过5个值得推荐的项目；重点关注RAG工具、模型工具相关内容；\n\
- 输出格式：趋势、项目名、Star数、推荐理由、中文简要概述、项目链接；\n\n";

const CLOSING: &str = "请严格按顺序输出三个模块内容，全部使用中文，格式为美观的markdown表格，每类之间换行空行。\n";

/// Render the full request text for one run.
///
/// `category_char_cap` bounds the bullet-list portion of each category
/// block; headers and instructions are not counted against it.
#[instrument(level = "info", skip_all, fields(news = corpus.news.len(), papers = corpus.papers.len(), code = corpus.code.len()))]
pub fn build_prompt(corpus: &ClassifiedCorpus, category_char_cap: usize) -> String {
    let mut prompt = String::from(PREAMBLE);

    push_block(&mut prompt, NEWS_HEADER, "news", &corpus.news, category_char_cap);
    push_block(&mut prompt, PAPERS_HEADER, "papers", &corpus.papers, category_char_cap);
    push_block(&mut prompt, CODE_HEADER, "code", &corpus.code, category_char_cap);

    prompt.push_str(CLOSING);
    debug!(chars = prompt.len(), "Prompt assembled");
    prompt
}

fn push_block(out: &mut String, header: &str, label: &str, lines: &[String], cap: usize) {
    out.push_str(header);
    let (start, dropped) = capped_start(lines, cap);
    if dropped > 0 {
        warn!(
            category = label,
            dropped,
            kept = lines.len() - dropped,
            cap,
            "Category exceeded character cap; dropped oldest lines"
        );
    }
    for line in &lines[start..] {
        writeln!(out, "- {line}").unwrap();
    }
    out.push('\n');
}

/// Index of the first line to keep so that the bullet block fits `cap`
/// characters, dropping oldest-appended lines first. Returns the start
/// index and the number of dropped lines.
fn capped_start(lines: &[String], cap: usize) -> (usize, usize) {
    let mut total = 0usize;
    let mut start = lines.len();
    for (i, line) in lines.iter().enumerate().rev() {
        // "- " prefix plus trailing newline.
        let cost = line.chars().count() + 3;
        if total + cost > cap {
            break;
        }
        total += cost;
        start = i;
    }
    (start, start)
}
