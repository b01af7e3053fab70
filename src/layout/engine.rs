use crate::config::{CommaPosition, FormatOptions, ItemLayout};
use crate::dialect::DialectConfig;
use crate::lexer::TokenKind;

use super::indentation::Indentation;
use super::items::Item;
use super::writer::Writer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Paren,
    Case,
}

/// How the items of the current clause are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// One item per line.
    Expanded,
    /// All items on the line below the keyword.
    Inline,
    /// Everything on the keyword's line.
    Oneline,
}

/// Layout state of the root or of one expanded parenthesis / CASE block.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    mode: Mode,
    /// A `BETWEEN` is waiting for its `AND`.
    between: bool,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            mode: Mode::Expanded,
            between: false,
        }
    }
}

pub(crate) struct Engine<'a, 't> {
    items: &'a [Item<'t>],
    dialect: &'a DialectConfig,
    options: &'a FormatOptions,
    /// `offsets[k]` is the inline width of `items[..k]`, spaces included.
    offsets: Vec<usize>,
    /// `blockers[k]` counts blocker items in `items[..k]`.
    blockers: Vec<usize>,
    indent: Indentation,
    frames: Vec<Frame>,
    /// Open inline groups; everything inside them stays on the line.
    inline_depth: usize,
    indent_width: usize,
    out: Writer,
}

impl<'a, 't> Engine<'a, 't> {
    pub fn new(
        items: &'a [Item<'t>],
        dialect: &'a DialectConfig,
        options: &'a FormatOptions,
    ) -> Self {
        let mut offsets = Vec::with_capacity(items.len() + 1);
        let mut blockers = Vec::with_capacity(items.len() + 1);
        offsets.push(0);
        blockers.push(0);
        for item in items {
            offsets.push(offsets[offsets.len() - 1] + item.width + usize::from(item.space_before));
            blockers.push(blockers[blockers.len() - 1] + usize::from(item.is_blocker()));
        }

        let indent_width = if options.use_tabs {
            options.indent_size.max(1)
        } else {
            options.indent_size
        };
        Self {
            items,
            dialect,
            options,
            offsets,
            blockers,
            indent: Indentation::default(),
            frames: vec![Frame::new(FrameKind::Root)],
            inline_depth: 0,
            indent_width,
            out: Writer::new(options.indent_unit(), indent_width),
        }
    }

    pub fn run(mut self) -> String {
        for i in 0..self.items.len() {
            self.item(i);
        }
        self.out.finish()
    }

    fn item(&mut self, i: usize) {
        let items = self.items;
        let item = &items[i];
        match item.kind() {
            TokenKind::LineComment => self.line_comment(i),
            TokenKind::BlockComment => self.block_comment(i),
            TokenKind::ReservedSelect | TokenKind::ReservedClause => self.clause(i),
            TokenKind::ReservedSetOperation => self.set_operation(i),
            TokenKind::ReservedJoin => self.join(i),
            TokenKind::LogicalOperator => self.logical_operator(i),
            TokenKind::Comma => self.comma(i),
            TokenKind::Semicolon => self.semicolon(i),
            _ if item.is_opener(i) => self.open_group(i),
            _ if item.is_closer(i) => self.close_group(i),
            _ => self.plain(i),
        }
    }

    fn frame(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    fn frame_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Inside an inline group or a clause that is not laid out one item per
    /// line.
    fn inline_context(&self) -> bool {
        self.inline_depth > 0 || self.frame().mode != Mode::Expanded
    }

    fn write(&mut self, i: usize) {
        let items = self.items;
        let item = &items[i];
        self.out.write(&item.text, self.indent.depth(), item.space_before);
    }

    /// Width of `items[from..to]` written on one line.
    fn inline_width(&self, from: usize, to: usize) -> usize {
        if from >= to {
            return 0;
        }
        self.offsets[to] - self.offsets[from] - usize::from(self.items[from].space_before)
    }

    fn has_blockers(&self, from: usize, to: usize) -> bool {
        from < to && self.blockers[to] > self.blockers[from]
    }

    /// End (exclusive) of the clause whose keyword is at `i`: the next clause,
    /// set operation or statement end at the same nesting level, or the closer
    /// of the enclosing group.
    fn clause_end(&self, i: usize) -> usize {
        let mut j = i + 1;
        while j < self.items.len() {
            let item = &self.items[j];
            let kind = item.kind();
            if kind.is_clause()
                || kind == TokenKind::ReservedSetOperation
                || kind == TokenKind::Semicolon
                || kind == TokenKind::CloseParen
                || item.is_closer(j)
            {
                break;
            }
            j = match item.partner {
                Some(close) if close > j => close + 1,
                _ => j + 1,
            };
        }
        j
    }

    fn clause(&mut self, i: usize) {
        if self.inline_depth > 0 {
            self.write(i);
            return;
        }
        self.indent.decrease_top_level();
        self.out.newlines(1);
        self.write(i);
        self.indent.increase_top_level();

        let mode = if self.dialect.is_oneline_clause(&self.items[i].token.text) {
            Mode::Oneline
        } else if self.options.item_layout == ItemLayout::FitWidth && self.clause_fits(i) {
            Mode::Inline
        } else {
            Mode::Expanded
        };
        let frame = self.frame_mut();
        frame.mode = mode;
        frame.between = false;
        if mode != Mode::Oneline {
            self.out.newlines(1);
        }
    }

    fn clause_fits(&self, i: usize) -> bool {
        let end = self.clause_end(i);
        // Items go on the next line, one level below the keyword.
        let column = self.indent.depth() * self.indent_width;
        !self.has_blockers(i + 1, end)
            && !self.has_line_breakers(i + 1, end)
            && column + self.inline_width(i + 1, end) <= self.options.max_line_width
    }

    /// Joins and logical operators outside any group start their own line,
    /// except the `AND` of a `BETWEEN`.
    fn has_line_breakers(&self, from: usize, to: usize) -> bool {
        let mut between = false;
        let mut j = from;
        while j < to {
            let item = &self.items[j];
            match item.kind() {
                TokenKind::ReservedJoin => return true,
                TokenKind::LogicalOperator if between && item.is_word("AND") => between = false,
                TokenKind::LogicalOperator => return true,
                _ if item.starts_between() => between = true,
                _ => {}
            }
            j = match item.partner {
                Some(close) if close > j => close + 1,
                _ => j + 1,
            };
        }
        false
    }

    fn set_operation(&mut self, i: usize) {
        if self.inline_depth > 0 {
            self.write(i);
            return;
        }
        self.indent.decrease_top_level();
        self.out.newlines(2);
        self.write(i);
        self.out.newlines(1);
        self.frame_mut().mode = Mode::Expanded;
    }

    fn join(&mut self, i: usize) {
        if !self.inline_context() {
            self.out.newlines(1);
        }
        self.write(i);
    }

    fn logical_operator(&mut self, i: usize) {
        if self.frame().between && self.items[i].is_word("AND") {
            self.frame_mut().between = false;
        } else if !self.inline_context() {
            self.out.newlines(1);
        }
        self.write(i);
    }

    fn comma(&mut self, i: usize) {
        if self.inline_context() {
            self.write(i);
            return;
        }
        match self.options.comma_position {
            CommaPosition::After => {
                self.write(i);
                self.out.newlines(1);
            }
            CommaPosition::Before => {
                self.out.newlines(1);
                self.write(i);
            }
        }
    }

    fn semicolon(&mut self, i: usize) {
        self.indent.reset();
        self.frames.truncate(1);
        self.frames[0] = Frame::new(FrameKind::Root);
        self.inline_depth = 0;

        if self.options.newline_before_semicolon {
            self.out.newlines(1);
        }
        self.write(i);
        if i + 1 < self.items.len() {
            self.out.newlines(self.options.lines_between_statements + 1);
        }
    }

    fn open_group(&mut self, i: usize) {
        let items = self.items;
        let item = &items[i];
        let Some(close) = item.partner else {
            self.write(i);
            return;
        };
        if self.inline_context() {
            self.write(i);
            self.inline_depth += 1;
            return;
        }

        let column = self.out.next_column(self.indent.depth(), item.space_before);
        let fits = column + self.inline_width(i, close + 1) <= self.options.max_line_width;
        if fits && !self.has_blockers(i + 1, close) {
            self.write(i);
            self.inline_depth += 1;
            return;
        }

        let kind = if item.kind() == TokenKind::OpenParen {
            FrameKind::Paren
        } else {
            FrameKind::Case
        };
        self.write(i);
        self.indent.increase_block_level();
        self.frames.push(Frame::new(kind));
        // A CASE keeps its operand on its own line.
        if kind == FrameKind::Paren {
            self.out.newlines(1);
        }
    }

    fn close_group(&mut self, i: usize) {
        if self.inline_depth > 0 {
            self.write(i);
            self.inline_depth -= 1;
            return;
        }
        self.indent.decrease_block_level();
        if self.frames.len() > 1 {
            self.frames.pop();
        }
        self.out.newlines(1);
        self.write(i);
    }

    fn plain(&mut self, i: usize) {
        let items = self.items;
        let item = &items[i];
        let starts_branch = item.is_word("WHEN") || item.is_word("ELSE");
        if starts_branch
            && self.inline_depth == 0
            && self.frame().kind == FrameKind::Case
            && self.frame().mode == Mode::Expanded
        {
            self.out.newlines(1);
        }
        if item.starts_between() {
            self.frame_mut().between = true;
        }
        self.write(i);
    }

    /// A comment that started its own line keeps doing so; a trailing one
    /// stays at the end of the previous line. Either way the line ends after
    /// it.
    fn line_comment(&mut self, i: usize) {
        let breaks = if self.items[i].newline_before || self.out.is_empty() {
            self.out.newlines(1);
            self.write(i);
            1
        } else {
            let removed = self.out.pull_back();
            self.write(i);
            removed.max(1)
        };
        self.out.newlines(breaks);
    }

    fn block_comment(&mut self, i: usize) {
        if self.items[i].newline_before {
            self.out.newlines(1);
        }
        self.write(i);
        if self.items.get(i + 1).is_some_and(|next| next.newline_before) {
            self.out.newlines(1);
        }
    }
}
