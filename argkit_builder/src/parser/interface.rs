use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// Lays out a flags column and a description column, wrapping the description.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: usize,
    left: usize,
    middle: usize,
}

impl ColumnRenderer {
    /// Produce a renderer whose description column fits the total width where possible.
    /// The description column never drops below `MINIMUM_MIDDLE_WIDTH`.
    pub(crate) fn guided(padding: usize, left: usize, middle: usize, total_width: usize) -> Self {
        let non_middle = left + padding;
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle, MINIMUM_MIDDLE_WIDTH);

        let middle = if guided_middle + non_middle <= target_total_width {
            guided_middle
        } else if non_middle < total_width {
            std::cmp::max(total_width - non_middle, MINIMUM_MIDDLE_WIDTH)
        } else {
            MINIMUM_MIDDLE_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} within total {total_width}.  Selecting middle: {middle}.");
        }

        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding;
        let left_column_width = self.left;
        let middle_column_width = self.middle.saturating_sub(indent).max(2);
        let mut out = Vec::default();

        for (i, part) in chunk(middle, middle_column_width).iter().enumerate() {
            let line = if i == 0 {
                format!("{:indent$}{:left_column_width$}{:padding$}{part}", "", left, "")
            } else {
                format!("{:indent$}{:left_column_width$}{:padding$}{part}", "", "", "")
            };
            out.push(line);
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    // Each hyphenated piece is `width - 1` characters plus the hyphen.
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, message: String);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
