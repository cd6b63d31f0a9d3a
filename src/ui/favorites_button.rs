use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::store::FavoritesToggleProps;
use crate::ui::theme::{ACCENT, FAVORITE};

pub const SHOW_ALL_LABEL: &str = "Show All Photos";
pub const SHOW_FAVORITES_LABEL: &str = "Show Only Favorites";

/// The filter toggle. Its label names what a click switches to.
pub struct FavoritesButton {
    props: FavoritesToggleProps,
}

impl FavoritesButton {
    pub fn new(props: FavoritesToggleProps) -> Self {
        Self { props }
    }

    pub fn label(&self) -> &'static str {
        if self.props.show_only_favorites {
            SHOW_ALL_LABEL
        } else {
            SHOW_FAVORITES_LABEL
        }
    }

    pub fn span(&self) -> Span<'static> {
        let color = if self.props.show_only_favorites {
            FAVORITE
        } else {
            ACCENT
        };
        Span::styled(
            format!("[ {} ]", self.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_depends_on_filter() {
        let off = FavoritesButton::new(FavoritesToggleProps {
            show_only_favorites: false,
        });
        let on = FavoritesButton::new(FavoritesToggleProps {
            show_only_favorites: true,
        });
        assert_eq!(off.label(), "Show Only Favorites");
        assert_eq!(on.label(), "Show All Photos");
        assert_eq!(on.span().content, "[ Show All Photos ]");
    }
}
