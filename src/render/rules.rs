//! The assistant-text formatting chain.
//!
//! A document is a list of lines and every line a list of segments. Rules
//! only ever look at [`Segment::Text`]; whatever a rule emits is
//! [`Segment::Markup`] and stays opaque to the rules that run after it, so no
//! rule can re-match inside another rule's output. Line rules additionally
//! require the line's first segment to still be text, which is what "at the
//! start of a line" means once earlier rules have run.
//!
//! The same chain renders for two targets: HTML for the transcript page and
//! ANSI-styled text for the terminal.

use console::{StyledObject, style};
use regex::{Captures, Regex};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Markup(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Markup(s) => s,
        }
    }
}

type Line = Vec<Segment>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Html,
    Terminal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Splits on `\n`; a trailing `\r` on any line is dropped.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![Segment::Text(line.to_string())]
                }
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<Segment>] {
        &self.lines
    }

    /// Concatenates segments and joins lines with `<br>`.
    pub fn into_html(self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(Segment::as_str).collect::<String>())
            .collect::<Vec<_>>()
            .join("<br>")
    }

    /// Concatenates segments and joins lines with `\n`.
    pub fn into_text(self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(Segment::as_str).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

type Wrap = fn(&Captures<'_>, Target) -> String;

/// Replaces every match inside text segments with a markup leaf.
pub struct InlineRule {
    name: &'static str,
    pattern: Regex,
    wrap: Wrap,
}

impl InlineRule {
    fn split_text(&self, text: String, target: Target, out: &mut Line) {
        let mut last = 0;
        for caps in self.pattern.captures_iter(&text) {
            let Some(m) = caps.get(0) else { continue };
            if m.is_empty() {
                continue;
            }
            if m.start() > last {
                out.push(Segment::Text(text[last..m.start()].to_string()));
            }
            out.push(Segment::Markup((self.wrap)(&caps, target)));
            last = m.end();
        }
        if last == 0 {
            out.push(Segment::Text(text));
        } else if last < text.len() {
            out.push(Segment::Text(text[last..].to_string()));
        }
    }

    fn apply_line(&self, line: Line, target: Target) -> Line {
        let mut out = Vec::with_capacity(line.len());
        for segment in line {
            match segment {
                Segment::Text(text) => self.split_text(text, target, &mut out),
                markup @ Segment::Markup(_) => out.push(markup),
            }
        }
        out
    }
}

/// Rewrites a prefix of the line's leading text segment.
///
/// With `close` set the rule wraps the whole line (open replaces the prefix,
/// close is appended) and the remainder stays text; it only fires when there
/// is something left to wrap. Closing markup is HTML only.
pub struct LineRule {
    name: &'static str,
    pattern: Regex,
    open: Wrap,
    close: Option<&'static str>,
}

impl LineRule {
    /// Opening markup and the unmatched remainder of the leading text.
    fn match_prefix(&self, line: &Line, target: Target) -> Option<(String, String)> {
        let Some(Segment::Text(first)) = line.first() else {
            return None;
        };
        let caps = self.pattern.captures(first)?;
        let m = caps.get(0).filter(|m| m.start() == 0)?;
        Some(((self.open)(&caps, target), first[m.end()..].to_string()))
    }

    fn apply_line(&self, line: Line, target: Target) -> Line {
        let Some((open, rest)) = self.match_prefix(&line, target) else {
            return line;
        };

        if self.close.is_some() && rest.is_empty() && line.len() == 1 {
            return line;
        }

        let mut out = Vec::with_capacity(line.len() + 2);
        out.push(Segment::Markup(open));
        if !rest.is_empty() {
            out.push(Segment::Text(rest));
        }
        out.extend(line.into_iter().skip(1));
        if let (Some(close), Target::Html) = (self.close, target) {
            out.push(Segment::Markup(close.to_string()));
        }
        out
    }
}

pub enum Rule {
    Inline(InlineRule),
    Line(LineRule),
}

impl Rule {
    fn inline(name: &'static str, pattern: &str, wrap: Wrap) -> Self {
        Self::Inline(InlineRule {
            name,
            pattern: compile(pattern),
            wrap,
        })
    }

    fn line(name: &'static str, pattern: &str, open: Wrap, close: Option<&'static str>) -> Self {
        Self::Line(LineRule {
            name,
            pattern: compile(pattern),
            open,
            close,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Inline(rule) => rule.name,
            Self::Line(rule) => rule.name,
        }
    }

    pub fn apply(&self, doc: Document) -> Document {
        self.apply_for(doc, Target::Html)
    }

    pub fn apply_for(&self, doc: Document, target: Target) -> Document {
        let lines = doc
            .lines
            .into_iter()
            .map(|line| match self {
                Self::Inline(rule) => rule.apply_line(line, target),
                Self::Line(rule) => rule.apply_line(line, target),
            })
            .collect();
        Document { lines }
    }

    /// Runs only this rule over `text`.
    pub fn apply_str(&self, text: &str) -> String {
        self.apply(Document::parse(text)).into_html()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in formatting pattern must compile")
}

const BOLD_CLASS: &str = "text-gray-800 font-semibold";
const BULLET_CLASS: &str = "ml-6 mb-2 text-gray-700 leading-relaxed";
const CITATION_CLASS: &str = "bg-blue-100 text-blue-800 px-2 py-1 rounded text-sm font-medium";
const TAX_SECTION_CLASS: &str =
    "bg-purple-100 text-purple-800 px-2 py-1 rounded text-sm font-medium";
const LEGAL_DOCUMENT_CLASS: &str = "text-green-700 font-medium bg-green-100 px-2 py-1 rounded";
const TAX_TERM_CLASS: &str = "text-purple-700 font-medium bg-purple-100 px-2 py-1 rounded";
const PHRASE_CLASS: &str = "text-indigo-600 font-medium italic";
const CURRENCY_CLASS: &str = "text-orange-600 font-semibold";
const DURATION_CLASS: &str = "text-red-600 font-medium";

struct CalloutStyle {
    glyph: char,
    block: &'static str,
    icon: &'static str,
    label: &'static str,
}

static CALLOUTS: [CalloutStyle; 5] = [
    CalloutStyle {
        glyph: '🎯',
        block: "mt-4 mb-3 p-3 bg-gradient-to-r from-blue-50 to-indigo-50 rounded-lg border-l-4 border-blue-400",
        icon: "text-xl",
        label: "text-blue-800 font-bold text-lg",
    },
    CalloutStyle {
        glyph: '⚖',
        block: "mt-4 mb-2 p-2 bg-green-50 rounded-lg border-l-3 border-green-400",
        icon: "text-lg",
        label: "text-green-700 font-semibold",
    },
    CalloutStyle {
        glyph: '📖',
        block: "mt-4 mb-2 p-2 bg-yellow-50 rounded-lg border-l-3 border-yellow-400",
        icon: "text-lg",
        label: "text-yellow-700 font-semibold",
    },
    CalloutStyle {
        glyph: '⚠',
        block: "mt-4 mb-2 p-2 bg-red-50 rounded-lg border-l-3 border-red-400",
        icon: "text-lg",
        label: "text-red-700 font-semibold",
    },
    CalloutStyle {
        glyph: '💡',
        block: "mt-4 mb-2 p-2 bg-purple-50 rounded-lg border-l-3 border-purple-400",
        icon: "text-lg",
        label: "text-purple-700 font-semibold",
    },
];

static TAX_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^Section\s+(?:80[A-Z]+|194[A-Z]*|24|17|28|37|54[A-Z]*)$")
});

type Paint = fn(StyledObject<&str>) -> StyledObject<&str>;

fn span(target: Target, class: &str, inner: &str, paint: Paint) -> String {
    match target {
        Target::Html => format!(r#"<span class="{class}">{inner}</span>"#),
        Target::Terminal => paint(style(inner)).to_string(),
    }
}

fn whole<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(0).map_or("", |m| m.as_str())
}

fn wrap_bold(caps: &Captures<'_>, target: Target) -> String {
    let inner = caps.get(1).map_or("", |m| m.as_str());
    match target {
        Target::Html => format!(r#"<strong class="{BOLD_CLASS}">{inner}</strong>"#),
        Target::Terminal => style(inner).bold().to_string(),
    }
}

fn open_callout(caps: &Captures<'_>, target: Target) -> String {
    let glyph = caps.get(1).map_or("", |m| m.as_str());
    let label = caps.get(2).map_or("", |m| m.as_str().trim_end());
    let style = glyph
        .chars()
        .next()
        .and_then(|c| CALLOUTS.iter().find(|s| s.glyph == c))
        .unwrap_or(&CALLOUTS[0]);
    if target == Target::Terminal {
        return format!("{glyph} {}", console::style(format!("{label}:")).bold().underlined());
    }
    format!(
        r#"<div class="{}"><span class="{}">{glyph}</span> <strong class="{}">{label}:</strong></div>"#,
        style.block, style.icon, style.label
    )
}

fn open_bullet(_: &Captures<'_>, target: Target) -> String {
    match target {
        Target::Html => format!(r#"<div class="{BULLET_CLASS}">• "#),
        Target::Terminal => format!("  {} ", style("•").cyan()),
    }
}

fn wrap_citation(caps: &Captures<'_>, target: Target) -> String {
    let text = whole(caps);
    if TAX_SECTION.is_match(text) {
        span(target, TAX_SECTION_CLASS, text, |s| s.magenta().bold())
    } else {
        span(target, CITATION_CLASS, text, |s| s.blue().bold())
    }
}

fn wrap_legal_document(caps: &Captures<'_>, target: Target) -> String {
    span(target, LEGAL_DOCUMENT_CLASS, whole(caps), |s| s.green())
}

fn wrap_tax_term(caps: &Captures<'_>, target: Target) -> String {
    span(target, TAX_TERM_CLASS, whole(caps), |s| s.magenta())
}

fn wrap_phrase(caps: &Captures<'_>, target: Target) -> String {
    span(target, PHRASE_CLASS, whole(caps), |s| s.italic())
}

fn wrap_currency(caps: &Captures<'_>, target: Target) -> String {
    span(target, CURRENCY_CLASS, whole(caps), |s| s.yellow().bold())
}

fn wrap_duration(caps: &Captures<'_>, target: Target) -> String {
    span(target, DURATION_CLASS, whole(caps), |s| s.red())
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::inline("bold", r"\*\*(.*?)\*\*", wrap_bold),
        Rule::line(
            "callout",
            "^(🎯|⚖\u{FE0F}?|📖|⚠\u{FE0F}?|💡)[ \t]*([^:\n]+):",
            open_callout,
            None,
        ),
        Rule::line("bullet", "^•[ \t]*", open_bullet, Some("</div>")),
        Rule::inline(
            "citation",
            r"(?i)\b(?:Article|Section)\s+\d+[A-Z]*\b",
            wrap_citation,
        ),
        Rule::inline(
            "legal_document",
            r"(?i)\b(?:Constitution|Bharatiya Nyaya Sanhita|BNS|IPC|Income Tax Act|Finance Act|Tax Rules)\b",
            wrap_legal_document,
        ),
        Rule::inline(
            "tax_term",
            r"(?i)\b(?:TDS|Assessment Year|Financial Year|PAN|Advance Tax|PPF|EPF|ELSS|NPS|HUF)\b",
            wrap_tax_term,
        ),
        Rule::inline(
            "phrase",
            r"(?i)\b(?:Here['’]s what happens when|The law steps in by|In practical terms|What makes this law special|The real impact|For ordinary citizens|Here['’]s the interesting part|What['’]s fascinating is|The law works like this)\b",
            wrap_phrase,
        ),
        Rule::inline(
            "currency",
            r"(?i)₹\s?\d(?:[\d,]*\d)?|\bRs\.?\s*\d(?:[\d,]*\d)?",
            wrap_currency,
        ),
        Rule::inline(
            "duration",
            r"(?i)\b\d+\s*(?:years?|months?)\b",
            wrap_duration,
        ),
    ]
});

/// The chain in application order; lines are joined with `<br>` afterwards.
pub fn rules() -> &'static [Rule] {
    &RULES
}

pub fn rule(name: &str) -> Option<&'static Rule> {
    rules().iter().find(|r| r.name() == name)
}

fn run_chain(text: &str, target: Target) -> Document {
    rules()
        .iter()
        .fold(Document::parse(text), |doc, rule| rule.apply_for(doc, target))
}

/// Runs the full chain over trusted assistant text.
pub fn format_answer(text: &str) -> String {
    run_chain(text, Target::Html).into_html()
}

/// The chain's terminal rendering: markers consumed, highlights as ANSI styles.
pub fn format_answer_terminal(text: &str) -> String {
    run_chain(text, Target::Terminal).into_text()
}
