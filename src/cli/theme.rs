//! Presentation styling for terminal output: label and priority colors.
//!
//! Read-only decoration — nothing in the core consults these.

use indexmap::IndexMap;

use crate::model::Priority;

/// ANSI foreground escape, without the reset.
pub type Color = &'static str;

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";
pub const BOLD: &str = "\x1b[1m";
pub const STRIKE: &str = "\x1b[9m";

const RED: Color = "\x1b[31m";
const GREEN: Color = "\x1b[32m";
const YELLOW: Color = "\x1b[33m";
const BLUE: Color = "\x1b[34m";
const MAGENTA: Color = "\x1b[35m";
const CYAN: Color = "\x1b[36m";

/// Label colors: a few well-known labels get fixed colors, everything else
/// hashes into the palette so a label keeps its color between runs.
pub struct LabelPalette {
    named: IndexMap<&'static str, Color>,
    fallback: [Color; 4],
}

impl Default for LabelPalette {
    fn default() -> Self {
        let mut named = IndexMap::new();
        named.insert("work", BLUE);
        named.insert("home", GREEN);
        named.insert("errands", CYAN);
        named.insert("urgent", RED);
        named.insert("travel", MAGENTA);
        LabelPalette {
            named,
            fallback: [YELLOW, CYAN, MAGENTA, BLUE],
        }
    }
}

impl LabelPalette {
    pub fn color(&self, label: &str) -> Color {
        if let Some(color) = self.named.get(label) {
            return color;
        }
        let hash: usize = label.bytes().map(usize::from).sum();
        self.fallback[hash % self.fallback.len()]
    }
}

/// Priority flag color: 1 is hottest, 6 coldest.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::P1 => RED,
        Priority::P2 => YELLOW,
        Priority::P3 => GREEN,
        Priority::P4 => CYAN,
        Priority::P5 => BLUE,
        Priority::P6 => MAGENTA,
    }
}

/// Wrap `text` in a color escape, honoring NO_COLOR.
pub fn paint(color: Color, text: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        text.to_string()
    } else {
        format!("{color}{text}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_have_fixed_colors() {
        let palette = LabelPalette::default();
        assert_eq!(palette.color("urgent"), RED);
        assert_eq!(palette.color("home"), GREEN);
    }

    #[test]
    fn unknown_labels_are_stable() {
        let palette = LabelPalette::default();
        assert_eq!(palette.color("gardening"), palette.color("gardening"));
    }
}
