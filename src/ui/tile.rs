use std::sync::Arc;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::feed::Thumbnail;
use crate::store::Image;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, FAVORITE, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, SELECTED_BORDER,
    STATUS_ERROR,
};

/// Thumbnail area inside a tile, in cells.
pub const THUMB_COLS: u16 = 24;
pub const THUMB_ROWS: u16 = 10;
/// Outer tile size: borders plus the author and source lines.
pub const TILE_WIDTH: u16 = THUMB_COLS + 2;
pub const TILE_HEIGHT: u16 = THUMB_ROWS + 4;

/// Download state of a tile's image.
#[derive(Debug, Clone)]
pub enum ThumbnailState {
    Loading,
    Ready(Arc<Thumbnail>),
    Failed(String),
}

/// One photo: thumbnail, author and a favorite marker.
pub struct ImageTile<'a> {
    image: &'a Image,
    thumbnail: Option<&'a ThumbnailState>,
    selected: bool,
}

impl<'a> ImageTile<'a> {
    pub fn new(image: &'a Image, thumbnail: Option<&'a ThumbnailState>, selected: bool) -> Self {
        Self {
            image,
            thumbnail,
            selected,
        }
    }

    fn border_style(&self) -> Style {
        match (self.selected, self.image.favorited) {
            (true, _) => Style::default()
                .fg(SELECTED_BORDER)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(ACCENT),
            (false, false) => Style::default().fg(GLOBAL_BORDER),
        }
    }

    fn title(&self) -> Line<'static> {
        if self.image.favorited {
            Line::from(Span::styled(" ★ ", Style::default().fg(FAVORITE)))
        } else {
            Line::from("")
        }
    }
}

impl Widget for ImageTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(self.title())
            .title_alignment(Alignment::Right);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let thumb_area = Rect {
            height: inner.height.saturating_sub(2).min(THUMB_ROWS),
            ..inner
        };
        match self.thumbnail {
            Some(ThumbnailState::Ready(thumbnail)) => {
                render_thumbnail(thumbnail, thumb_area, buf);
            }
            Some(ThumbnailState::Failed(reason)) => {
                render_placeholder(&format!("✕ {}", reason), STATUS_ERROR, thumb_area, buf);
            }
            Some(ThumbnailState::Loading) => {
                render_placeholder("loading…", MUTED_TEXT, thumb_area, buf);
            }
            None => render_placeholder("no preview", MUTED_TEXT, thumb_area, buf),
        }

        let text_area = Rect {
            y: inner.y + thumb_area.height,
            height: inner.height - thumb_area.height,
            ..inner
        };
        let mut author_style = Style::default().fg(HEADER_TEXT);
        if self.selected {
            author_style = author_style.bg(ACTIVE_HIGHLIGHT);
        }
        let lines = vec![
            Line::from(vec![
                Span::styled("Author: ", Style::default().fg(MUTED_TEXT)),
                Span::styled(self.image.author.clone(), author_style),
            ]),
            Line::from(Span::styled(
                short_source(&self.image.image_url, usize::from(inner.width)),
                Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM),
            )),
        ];
        Paragraph::new(lines).render(text_area, buf);
    }
}

/// Half-block rendering: `▀` with the top pixel as foreground and the
/// bottom pixel as background, centered in `area`.
fn render_thumbnail(thumbnail: &Thumbnail, area: Rect, buf: &mut Buffer) {
    let cols = thumbnail.width().min(area.width);
    let rows = thumbnail.rows().min(area.height);
    let x0 = area.x + (area.width - cols) / 2;
    let y0 = area.y + (area.height - rows) / 2;

    for row in 0..rows {
        for col in 0..cols {
            let top = thumbnail.pixel(col, row * 2);
            let bottom = thumbnail.pixel(col, row * 2 + 1);
            let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) else {
                continue;
            };
            match (top, bottom) {
                (Some(top), Some(bottom)) => {
                    cell.set_symbol("▀").set_fg(rgb(top)).set_bg(rgb(bottom));
                }
                (Some(top), None) => {
                    cell.set_symbol("▀").set_fg(rgb(top)).set_bg(Color::Reset);
                }
                _ => {}
            }
        }
    }
}

fn render_placeholder(text: &str, color: Color, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let middle = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    Paragraph::new(Line::from(Span::styled(text.to_string(), Style::default().fg(color))))
        .alignment(Alignment::Center)
        .render(middle, buf);
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Tail of the image URL that fits `width` cells.
pub fn short_source(url: &str, width: usize) -> String {
    let trimmed = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let count = trimmed.chars().count();
    if count <= width {
        return trimmed.to_string();
    }
    if width <= 1 {
        return "…".chars().take(width).collect();
    }
    let tail: String = trimmed.chars().skip(count - (width - 1)).collect();
    format!("…{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn short_source_keeps_tail() {
        assert_eq!(short_source("https://x.com/a.jpg", 20), "x.com/a.jpg");
        assert_eq!(short_source("https://example.com/photos/abc.jpg", 8), "…abc.jpg");
        assert_eq!(short_source("https://x", 0), "");
    }

    #[test]
    fn favorited_tile_shows_marker_and_author() {
        let mut image = Image::new("https://x/1.jpg", "Jane Doe");
        image.favorited = true;
        let area = Rect::new(0, 0, TILE_WIDTH, TILE_HEIGHT);
        let mut buf = Buffer::empty(area);
        ImageTile::new(&image, None, false).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("★"));
        assert!(text.contains("Author: Jane Doe"));
    }

    #[test]
    fn plain_tile_has_no_marker() {
        let image = Image::new("https://x/1.jpg", "Jane Doe");
        let area = Rect::new(0, 0, TILE_WIDTH, TILE_HEIGHT);
        let mut buf = Buffer::empty(area);
        ImageTile::new(&image, Some(&ThumbnailState::Loading), true).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(!text.contains("★"));
        assert!(text.contains("loading"));
    }
}
