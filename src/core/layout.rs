//! # Layout Engine
//!
//! Turns styled document lines into `DisplayLines` that fit a content width.
//!
//! Rules, in order:
//!
//! 1. Source lines are paragraphs. Empty lines survive as empty lines.
//! 2. A line that already fits is emitted unchanged, whitespace and all.
//! 3. A longer line is packed greedily (first fit) with whitespace-separated
//!    words. Whitespace is dropped only at the points where a line breaks.
//! 4. A word wider than the content width gets a row of its own and is never
//!    split.
//! 5. Indentation moves with the first word, unless together they overflow
//!    the width; then the indentation is dropped.
//!
//! Widths are display widths (`unicode-width`), so wide characters count as
//! two cells. Styles ride along on the words, so a heading span that wraps
//! stays a heading on every row.
//!
//! The packing itself is textwrap's `wrap_first_fit` running over our own
//! span-aware `Word` fragments.

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::UnicodeWidthStr;

use crate::core::document::{Highlight, Span, StyledLine};
use crate::core::viewport::ViewError;

/// Render-ready lines, each at most the content width wide (except
/// unbreakable words).
pub type DisplayLines = Vec<StyledLine>;

/// Wraps `lines` to `width` cells.
///
/// Deterministic: the same input always produces the same output.
/// A zero width is rejected with `ViewError::InvalidViewport`.
pub fn wrap(lines: &[StyledLine], width: usize) -> Result<DisplayLines, ViewError> {
    if width == 0 {
        return Err(ViewError::InvalidViewport {
            columns: 0,
            rows: 0,
        });
    }

    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        wrap_line(line, width, &mut out);
    }
    Ok(out)
}

/// Plain-text convenience wrapper around [`wrap`].
pub fn wrap_text(text: &str, width: usize) -> Result<Vec<String>, ViewError> {
    let lines: Vec<StyledLine> = text.split('\n').map(StyledLine::plain).collect();
    Ok(wrap(&lines, width)?.iter().map(StyledLine::text).collect())
}

fn wrap_line(line: &StyledLine, width: usize, out: &mut DisplayLines) {
    if line.width() <= width {
        out.push(line.clone());
        return;
    }

    let mut words = split_words(line);

    // Nothing but whitespace: there is no word to keep whole, so clip.
    if words.iter().all(|w| !w.has_visible) {
        out.push(clip_whitespace(line, width));
        return;
    }

    // Indentation that pushes the first word past the width is dropped,
    // like whitespace at any other break.
    if let Some(first) = words.first_mut()
        && first.width > width
    {
        strip_indent(first);
    }

    let rows = wrap_first_fit(&words, &[width as f64]);
    let last_row = rows.len().saturating_sub(1);
    for (index, row) in rows.into_iter().enumerate() {
        out.push(join_row(row, index == last_row, width));
    }
}

// ============================================================================
// Words
// ============================================================================

/// A visible word plus the whitespace that follows it.
///
/// Leading indentation of a line belongs to the first word, so it moves
/// with that word instead of being stranded on a row of its own.
#[derive(Debug, Default)]
struct Word {
    text: Vec<Span>,
    whitespace: Vec<Span>,
    width: usize,
    whitespace_width: usize,
    has_visible: bool,
}

impl Fragment for Word {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn whitespace_width(&self) -> f64 {
        self.whitespace_width as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

fn push_span(spans: &mut Vec<Span>, ch: char, style: Highlight) {
    match spans.last_mut() {
        Some(last) if last.style == style => last.text.push(ch),
        _ => spans.push(Span::new(ch.to_string(), style)),
    }
}

fn char_width(ch: char) -> usize {
    let mut buf = [0u8; 4];
    UnicodeWidthStr::width(&*ch.encode_utf8(&mut buf))
}

fn split_words(line: &StyledLine) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::default();

    for span in &line.spans {
        for ch in span.text.chars() {
            if ch.is_whitespace() {
                if current.has_visible {
                    push_span(&mut current.whitespace, ch, span.style);
                    current.whitespace_width += char_width(ch);
                } else {
                    push_span(&mut current.text, ch, span.style);
                    current.width += char_width(ch);
                }
            } else {
                if !current.whitespace.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                push_span(&mut current.text, ch, span.style);
                current.width += char_width(ch);
                current.has_visible = true;
            }
        }
    }

    if !current.text.is_empty() || !current.whitespace.is_empty() {
        words.push(current);
    }
    words
}

fn strip_indent(word: &mut Word) {
    let mut text: Vec<Span> = Vec::with_capacity(word.text.len());
    for span in &word.text {
        let kept = if text.is_empty() {
            span.text.trim_start()
        } else {
            span.text.as_str()
        };
        if !kept.is_empty() {
            text.push(Span::new(kept, span.style));
        }
    }
    word.width = text.iter().map(Span::width).sum();
    word.text = text;
}

fn join_row(row: &[Word], is_last_row: bool, width: usize) -> StyledLine {
    let mut line = StyledLine::default();
    let mut used = 0;
    for (index, word) in row.iter().enumerate() {
        line.extend(&word.text);
        used += word.width;
        let is_last_word = index + 1 == row.len();
        if !is_last_word {
            line.extend(&word.whitespace);
            used += word.whitespace_width;
        } else if is_last_row && used + word.whitespace_width <= width {
            // Trailing whitespace of the paragraph is kept when it fits.
            line.extend(&word.whitespace);
        }
    }
    line
}

fn clip_whitespace(line: &StyledLine, width: usize) -> StyledLine {
    let mut clipped = StyledLine::default();
    let mut used = 0;
    for span in &line.spans {
        for ch in span.text.chars() {
            let w = char_width(ch);
            if used + w > width {
                return clipped;
            }
            clipped.push_str(ch.encode_utf8(&mut [0u8; 4]), span.style);
            used += w;
        }
    }
    clipped
}
