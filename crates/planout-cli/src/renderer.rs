//! Terminal output, rendered as markdown with termimad or printed verbatim.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// Renders the markdown produced by the core display types.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints `markdown` to stdout.
    ///
    /// Header lines keep their `#` markers so plan and chunk IDs stay easy to
    /// spot; the rest goes through the termimad skin.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match header_color(line) {
                Some(color) => println!("\x1b[{color}m{line}\x1b[0m"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

/// ANSI color code for a markdown header line, by level.
fn header_color(line: &str) -> Option<u8> {
    let level = line.chars().take_while(|c| *c == '#').count();
    match level {
        0 => None,
        1 => Some(36),
        2 => Some(34),
        _ => Some(35),
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# 1. Plan\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_header_colors_by_level() {
        assert_eq!(header_color("# 1. Guitar"), Some(36));
        assert_eq!(header_color("## Chunks"), Some(34));
        assert_eq!(header_color("### 4. Restring (○ Todo)"), Some(35));
        assert_eq!(header_color("- Deadline: none"), None);
    }
}
