use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_WARN};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HINTS: &str = " ←↑↓→: Move │ Enter: Favorite │ f: Filter │ y: Copy URL │ r: Refresh │ q: Quit";

#[derive(Default)]
pub struct Footer<'a> {
    notice: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(notice: Option<&'a str>) -> Self {
        Self { notice }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let (left, left_style) = match self.notice {
            Some(notice) => (format!(" {}", notice), Style::default().fg(STATUS_WARN)),
            None => (HINTS.to_string(), text_style),
        };
        let version = format!("v{} ", VERSION);

        // Char count, not byte count: the hints contain arrows and box chars.
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(left.chars().count())
            .saturating_sub(version.chars().count());

        let line = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
