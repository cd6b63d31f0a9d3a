//! Favorites filter reducer properties.

use photofeed::store::{
    add_image, toggle_display_favorites, toggle_favorite_image, FilterReducer, Reducer,
};

#[test]
fn test_initial_filter_is_off() {
    assert!(!FilterReducer::reduce_or_init(None, &add_image("u1", "x")));
}

#[test]
fn test_toggle_flips_and_twice_restores() {
    for start in [false, true] {
        let once = FilterReducer::reduce(start, &toggle_display_favorites());
        assert_eq!(once, !start);
        let twice = FilterReducer::reduce(once, &toggle_display_favorites());
        assert_eq!(twice, start);
    }
}

#[test]
fn test_image_actions_do_not_touch_filter() {
    for start in [false, true] {
        assert_eq!(FilterReducer::reduce(start, &add_image("u1", "x")), start);
        assert_eq!(FilterReducer::reduce(start, &toggle_favorite_image("u1")), start);
    }
}
