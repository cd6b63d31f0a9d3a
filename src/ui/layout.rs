use ratatui::layout::Rect;

use crate::ui::tile::{TILE_HEIGHT, TILE_WIDTH};

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Clickable area of the favorites button inside the header.
pub fn favorites_button_rect(header: Rect, label: &str) -> Rect {
    let width = (label.chars().count() as u16 + 4).min(header.width.saturating_sub(2));
    Rect {
        x: header.x + 1.min(header.width),
        y: header.y + 1.min(header.height.saturating_sub(1)),
        width,
        height: 1.min(header.height),
    }
}

/// Tile grid dimensions for a body area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub visible_rows: usize,
}

impl GridGeometry {
    pub fn for_area(body: Rect) -> Self {
        Self {
            columns: usize::from(body.width / TILE_WIDTH).max(1),
            visible_rows: usize::from(body.height / TILE_HEIGHT).max(1),
        }
    }

    pub fn total_rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }

    /// Smallest scroll change that keeps `index` on screen.
    pub fn scroll_to_show(&self, index: usize, scroll_row: usize) -> usize {
        let row = index / self.columns;
        if row < scroll_row {
            row
        } else if row >= scroll_row + self.visible_rows {
            row + 1 - self.visible_rows
        } else {
            scroll_row
        }
    }

    /// Scroll offset clamped so the last row is not followed by empty rows.
    pub fn clamp_scroll(&self, count: usize, scroll_row: usize) -> usize {
        scroll_row.min(self.total_rows(count).saturating_sub(self.visible_rows))
    }
}

/// Tile rectangles for images `[scroll_row * columns ..]` that fit in `body`.
pub fn tile_rects(body: Rect, count: usize, scroll_row: usize) -> Vec<(usize, Rect)> {
    let geometry = GridGeometry::for_area(body);
    let first = scroll_row * geometry.columns;
    let mut rects = Vec::new();
    for index in first..count {
        let offset = index - first;
        let row = offset / geometry.columns;
        if row >= geometry.visible_rows {
            break;
        }
        let col = offset % geometry.columns;
        let rect = Rect {
            x: body.x + col as u16 * TILE_WIDTH,
            y: body.y + row as u16 * TILE_HEIGHT,
            width: TILE_WIDTH.min(body.width),
            height: TILE_HEIGHT.min(body.height),
        };
        rects.push((index, rect.intersection(body)));
    }
    rects
}

/// Index of the tile under a terminal cell.
pub fn tile_at(
    body: Rect,
    count: usize,
    scroll_row: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    tile_rects(body, count, scroll_row)
        .into_iter()
        .find(|(_, rect)| {
            column >= rect.x
                && column < rect.x + rect.width
                && row >= rect.y
                && row < rect.y + rect.height
        })
        .map(|(index, _)| index)
}
