#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    /// Items of a clause.
    TopLevel,
    /// Contents of an expanded parenthesis or CASE block.
    BlockLevel,
}

/// Indentation stack.
///
/// Clause keywords toggle a top-level entry; expanded blocks push a block
/// entry which, when popped, also drops any top-level entries opened inside
/// it.
#[derive(Debug, Default)]
pub(crate) struct Indentation {
    stack: Vec<Level>,
}

impl Indentation {
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn increase_top_level(&mut self) {
        self.stack.push(Level::TopLevel);
    }

    pub fn increase_block_level(&mut self) {
        self.stack.push(Level::BlockLevel);
    }

    /// Pop one level, but only a top-level one.
    pub fn decrease_top_level(&mut self) {
        if self.stack.last() == Some(&Level::TopLevel) {
            self.stack.pop();
        }
    }

    /// Pop up to and including the innermost block level.
    pub fn decrease_block_level(&mut self) {
        while let Some(level) = self.stack.pop() {
            if level == Level::BlockLevel {
                break;
            }
        }
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_toggles() {
        let mut indent = Indentation::default();
        indent.increase_top_level();
        assert_eq!(indent.depth(), 1);
        indent.decrease_top_level();
        indent.decrease_top_level();
        assert_eq!(indent.depth(), 0);
    }

    #[test]
    fn test_top_level_does_not_cross_block() {
        let mut indent = Indentation::default();
        indent.increase_top_level();
        indent.increase_block_level();
        indent.decrease_top_level();
        assert_eq!(indent.depth(), 2);
    }

    #[test]
    fn test_block_level_unwinds_clauses_inside() {
        let mut indent = Indentation::default();
        indent.increase_top_level();
        indent.increase_block_level();
        indent.increase_top_level();
        indent.decrease_block_level();
        assert_eq!(indent.depth(), 1);
    }

    #[test]
    fn test_block_level_on_empty_stack() {
        let mut indent = Indentation::default();
        indent.decrease_block_level();
        assert_eq!(indent.depth(), 0);
        indent.increase_top_level();
        indent.reset();
        assert_eq!(indent.depth(), 0);
    }
}
