use std::time::Instant;

use ratatui::widgets::Clear;
use ratatui::Frame;

use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::grid::ImageGrid;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let props = app.props();

    let header_widget = Header::new(&props, app.feed_status());
    frame.render_widget(header_widget.widget(Instant::now()), header);

    frame.render_widget(Clear, body);
    frame.render_widget(
        ImageGrid::new(
            &props.image_list,
            app.thumbnails(),
            app.selected(),
            app.scroll_row(),
        )
        .empty_message(app.empty_message()),
        body,
    );

    let footer_widget = Footer::new(app.notice());
    frame.render_widget(footer_widget.widget(footer), footer);
}
