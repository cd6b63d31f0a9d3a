use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use crate::store::ImageListProps;
use crate::ui::layout::tile_rects;
use crate::ui::theme::MUTED_TEXT;
use crate::ui::tile::{ImageTile, ThumbnailState};

/// Renders one [`ImageTile`] per visible image. Tiles are keyed by image URL:
/// selection and thumbnails follow the URL, not the position.
pub struct ImageGrid<'a> {
    props: &'a ImageListProps,
    thumbnails: &'a HashMap<String, ThumbnailState>,
    selected: Option<&'a str>,
    scroll_row: usize,
    empty_message: &'a str,
}

impl<'a> ImageGrid<'a> {
    pub fn new(
        props: &'a ImageListProps,
        thumbnails: &'a HashMap<String, ThumbnailState>,
        selected: Option<&'a str>,
        scroll_row: usize,
    ) -> Self {
        Self {
            props,
            thumbnails,
            selected,
            scroll_row,
            empty_message: "Waiting for photos…",
        }
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }
}

impl Widget for ImageGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.props.images.is_empty() {
            if area.height == 0 {
                return;
            }
            let middle = Rect {
                y: area.y + area.height / 2,
                height: 1,
                ..area
            };
            Paragraph::new(Line::styled(self.empty_message, Style::default().fg(MUTED_TEXT)))
                .alignment(Alignment::Center)
                .render(middle, buf);
            return;
        }

        for (index, rect) in tile_rects(area, self.props.images.len(), self.scroll_row) {
            let image = &self.props.images[index];
            let selected = self.selected == Some(image.image_url.as_str());
            ImageTile::new(image, self.thumbnails.get(&image.image_url), selected)
                .render(rect, buf);
        }
    }
}
