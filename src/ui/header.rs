use std::time::Instant;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::store::ViewProps;
use crate::ui::app::FeedStatus;
use crate::ui::favorites_button::FavoritesButton;
use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK, STATUS_WARN,
};

pub struct Header<'a> {
    props: &'a ViewProps,
    status: &'a FeedStatus,
}

impl<'a> Header<'a> {
    pub fn new(props: &'a ViewProps, status: &'a FeedStatus) -> Self {
        Self { props, status }
    }

    pub fn widget(&self, now: Instant) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let button = FavoritesButton::new(self.props.favorites_toggle);

        let line = Line::from(vec![
            button.span(),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!(
                    "{} photos · {} favorites",
                    self.props.total_images, self.props.total_favorites
                ),
                text_style,
            ),
            Span::styled("  │  ", separator_style),
            status_span(self.status, now),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

pub fn status_span(status: &FeedStatus, now: Instant) -> Span<'static> {
    match status {
        FeedStatus::Idle => Span::styled("starting", Style::default().fg(MUTED_TEXT)),
        FeedStatus::Fetching => Span::styled("● fetching", Style::default().fg(STATUS_WARN)),
        FeedStatus::Updated { at, added } => {
            let ago = now.saturating_duration_since(*at).as_secs();
            Span::styled(
                format!("● updated {}s ago (+{})", ago, added),
                Style::default().fg(STATUS_OK),
            )
        }
        FeedStatus::Retrying { attempt, error } => Span::styled(
            format!("● retry {} ({})", attempt, error),
            Style::default().fg(STATUS_WARN),
        ),
        FeedStatus::Failed { error } => {
            Span::styled(format!("● {}", error), Style::default().fg(STATUS_ERROR))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn updated_status_shows_age_and_count() {
        let at = Instant::now();
        let span = status_span(&FeedStatus::Updated { at, added: 3 }, at + Duration::from_secs(7));
        assert_eq!(span.content, "● updated 7s ago (+3)");
    }

    #[test]
    fn failed_status_shows_error() {
        let span = status_span(
            &FeedStatus::Failed {
                error: "HTTP 503".to_string(),
            },
            Instant::now(),
        );
        assert_eq!(span.content, "● HTTP 503");
    }
}
