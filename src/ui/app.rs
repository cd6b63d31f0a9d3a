use std::cell::{Cell, Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::clipboard::ClipboardHandler;
use crate::feed::{FeedEvent, RefreshHandle, ThumbnailEvent, ThumbnailRequester};
use crate::store::{add_image, FavoritesToggle, Store, SubscriptionId, ViewProps, VisibleImageList};
use crate::ui::favorites_button::FavoritesButton;
use crate::ui::layout::{favorites_button_rect, layout_regions, tile_at, GridGeometry};
use crate::ui::tile::ThumbnailState;

const NOTICE_TTL: Duration = Duration::from_secs(3);

/// What the header says about the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Fetching,
    Updated { at: Instant, added: usize },
    Retrying { attempt: u32, error: String },
    Failed { error: String },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

/// UI-side state around the [`Store`].
///
/// Views never read the store directly: a store observer re-projects
/// [`ViewProps`] after every dispatch and bumps a revision counter when they
/// changed. Selection is tracked by image URL so it survives filter changes
/// and new arrivals.
pub struct App {
    should_quit: bool,
    store: Store,
    subscription: Option<SubscriptionId>,
    props: Rc<RefCell<ViewProps>>,
    props_revision: Rc<Cell<u64>>,
    seen_revision: u64,
    selected: Option<String>,
    /// Position of the selection when it was last visible.
    selected_index: usize,
    scroll_row: usize,
    thumbnails: HashMap<String, ThumbnailState>,
    thumbnail_requester: Option<ThumbnailRequester>,
    refresh: Option<RefreshHandle>,
    feed_status: FeedStatus,
    notice: Option<(String, Instant)>,
    clipboard: ClipboardHandler,
    area: Rect,
}

impl App {
    pub fn new(mut store: Store) -> Self {
        let props = Rc::new(RefCell::new(ViewProps::project(&store.state())));
        let props_revision = Rc::new(Cell::new(0));
        let subscription = {
            let props = Rc::clone(&props);
            let revision = Rc::clone(&props_revision);
            store.subscribe(move |state| {
                let next = ViewProps::project(state);
                let mut current = props.borrow_mut();
                if *current != next {
                    *current = next;
                    revision.set(revision.get() + 1);
                }
            })
        };

        let mut app = Self {
            should_quit: false,
            store,
            subscription: Some(subscription),
            props,
            props_revision,
            seen_revision: 0,
            selected: None,
            selected_index: 0,
            scroll_row: 0,
            thumbnails: HashMap::new(),
            thumbnail_requester: None,
            refresh: None,
            feed_status: FeedStatus::Idle,
            notice: None,
            clipboard: ClipboardHandler::new(),
            area: Rect::default(),
        };
        app.sync_selection();
        app
    }

    pub fn attach_thumbnails(&mut self, requester: ThumbnailRequester) {
        self.thumbnail_requester = Some(requester);
    }

    pub fn attach_refresh(&mut self, refresh: RefreshHandle) {
        self.refresh = Some(refresh);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn props(&self) -> Ref<'_, ViewProps> {
        self.props.borrow()
    }

    pub fn props_revision(&self) -> u64 {
        self.props_revision.get()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn thumbnails(&self) -> &HashMap<String, ThumbnailState> {
        &self.thumbnails
    }

    pub fn feed_status(&self) -> &FeedStatus {
        &self.feed_status
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn empty_message(&self) -> &'static str {
        if self.props().favorites_toggle.show_only_favorites {
            "No favorites yet. Press f to show all photos."
        } else {
            "Waiting for photos…"
        }
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.area = Rect::new(0, 0, cols, rows);
        self.reveal_selection();
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.notice {
            if now.saturating_duration_since(*shown_at) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    pub fn on_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Fetching => self.feed_status = FeedStatus::Fetching,
            FeedEvent::Batch {
                items,
                skipped,
                fetched_at,
            } => {
                let state = self.store.state();
                let mut seen = HashSet::new();
                let fresh: Vec<String> = items
                    .iter()
                    .filter(|item| !state.images.contains(&item.image_url))
                    .filter(|item| seen.insert(item.image_url.as_str()))
                    .map(|item| item.image_url.clone())
                    .collect();
                drop(seen);
                drop(state);

                for item in items {
                    self.store.dispatch(add_image(item.image_url, item.author));
                }
                for image_url in &fresh {
                    self.request_thumbnail(image_url);
                }
                tracing::debug!(added = fresh.len(), skipped, "feed batch applied");
                self.feed_status = FeedStatus::Updated {
                    at: fetched_at,
                    added: fresh.len(),
                };
                self.sync_selection();
            }
            FeedEvent::RetryScheduled { attempt, error, .. } => {
                self.feed_status = FeedStatus::Retrying { attempt, error };
            }
            FeedEvent::Failed { error } => self.feed_status = FeedStatus::Failed { error },
        }
    }

    pub fn on_thumbnail(&mut self, event: ThumbnailEvent) {
        let state = match event.result {
            Ok(thumbnail) => ThumbnailState::Ready(thumbnail),
            Err(reason) => ThumbnailState::Failed(reason),
        };
        self.thumbnails.insert(event.image_url, state);
    }

    fn request_thumbnail(&mut self, image_url: &str) {
        let Some(requester) = &self.thumbnail_requester else {
            return;
        };
        if self.thumbnails.contains_key(image_url) {
            return;
        }
        let state = if requester.request(image_url) {
            ThumbnailState::Loading
        } else {
            ThumbnailState::Failed("loader stopped".to_string())
        };
        self.thumbnails.insert(image_url.to_string(), state);
    }

    pub fn move_selection(&mut self, direction: Move) {
        let len = self.props().image_list.images.len();
        if len == 0 {
            return;
        }
        let columns = self.geometry().columns;
        let index = self.current_index().unwrap_or(0);
        let next = match direction {
            Move::Left => index.saturating_sub(1),
            Move::Right => (index + 1).min(len - 1),
            Move::Up if index >= columns => index - columns,
            Move::Down if index + columns < len => index + columns,
            Move::Up | Move::Down => index,
        };
        self.select_index(next);
    }

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(image_url) = self.selected.clone() {
            VisibleImageList::on_image_click(&mut self.store, &image_url);
            self.sync_selection();
        }
    }

    pub fn toggle_filter(&mut self) {
        FavoritesToggle::on_click(&mut self.store);
        self.sync_selection();
    }

    /// Button click toggles the filter; tile click selects and toggles
    /// that image's favorite.
    pub fn on_mouse_click(&mut self, column: u16, row: u16) {
        let (header, body, _) = layout_regions(self.area);
        let label = FavoritesButton::new(self.props().favorites_toggle).label();
        if favorites_button_rect(header, label).contains((column, row).into()) {
            self.toggle_filter();
            return;
        }
        let count = self.props().image_list.images.len();
        if let Some(index) = tile_at(body, count, self.scroll_row, column, row) {
            self.select_index(index);
            self.toggle_selected_favorite();
        }
    }

    pub fn scroll(&mut self, rows: isize) {
        let count = self.props().image_list.images.len();
        let geometry = self.geometry();
        let next = self.scroll_row.saturating_add_signed(rows);
        self.scroll_row = geometry.clamp_scroll(count, next);
    }

    pub fn copy_selected_url(&mut self) {
        let Some(image_url) = self.selected.clone() else {
            return;
        };
        match self.clipboard.set_text(&image_url) {
            Ok(()) => self.show_notice("Copied image URL"),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.show_notice(&err.to_string());
            }
        }
    }

    pub fn request_refresh(&mut self) {
        if let Some(refresh) = &self.refresh {
            refresh.request();
            self.show_notice("Refreshing…");
        }
    }

    /// Unsubscribes from the store and drops its observers.
    pub fn teardown(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
        self.store.teardown();
    }

    fn show_notice(&mut self, text: &str) {
        self.notice = Some((text.to_string(), Instant::now()));
    }

    fn geometry(&self) -> GridGeometry {
        GridGeometry::for_area(layout_regions(self.area).1)
    }

    fn current_index(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.props().image_list.position(selected)
    }

    fn select_index(&mut self, index: usize) {
        let url = self
            .props()
            .image_list
            .images
            .get(index)
            .map(|image| image.image_url.clone());
        if let Some(url) = url {
            self.selected = Some(url);
            self.selected_index = index;
            self.reveal_selection();
        }
    }

    /// Keeps the selection on its image when still visible, otherwise on the
    /// image now at the old position.
    fn sync_selection(&mut self) {
        let revision = self.props_revision.get();
        let changed = revision != self.seen_revision;
        self.seen_revision = revision;

        let len = self.props().image_list.images.len();
        if len == 0 {
            self.selected = None;
            self.selected_index = 0;
            self.scroll_row = 0;
            return;
        }
        match self.current_index() {
            Some(index) => self.selected_index = index,
            None => self.select_index(self.selected_index.min(len - 1)),
        }
        if changed {
            self.reveal_selection();
        }
    }

    fn reveal_selection(&mut self) {
        let count = self.props().image_list.images.len();
        let geometry = self.geometry();
        let scroll = match self.current_index() {
            Some(index) => geometry.scroll_to_show(index, self.scroll_row),
            None => self.scroll_row,
        };
        self.scroll_row = geometry.clamp_scroll(count, scroll);
    }
}
