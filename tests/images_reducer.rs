//! Image collection reducer properties.

use photofeed::store::{
    add_image, toggle_display_favorites, toggle_favorite_image, ImageCollection, ImagesReducer,
    Reducer,
};

fn reduce_all(actions: &[photofeed::store::Action]) -> ImageCollection {
    actions
        .iter()
        .fold(ImageCollection::default(), |state, action| {
            ImagesReducer::reduce(state, action)
        })
}

#[test]
fn test_adds_keep_arrival_order_without_duplicates() {
    let urls = ["u1", "u2", "u1", "u3", "u2", "u2", "u4"];
    let actions: Vec<_> = urls.iter().map(|url| add_image(*url, "x")).collect();
    let state = reduce_all(&actions);

    assert_eq!(state.image_list, vec!["u1", "u2", "u3", "u4"]);
    assert_eq!(state.image_map.len(), 4);
    for url in &state.image_list {
        assert!(state.image_map.contains_key(url));
    }
}

#[test]
fn test_readding_present_url_changes_nothing() {
    let mut state = reduce_all(&[add_image("u1", "first"), toggle_favorite_image("u1")]);
    let before = state.clone();

    state = ImagesReducer::reduce(state, &add_image("u1", "second"));

    assert_eq!(state, before);
    let image = state.get("u1").unwrap();
    assert_eq!(image.author, "first");
    assert!(image.favorited);
}

#[test]
fn test_new_images_start_unfavorited() {
    let state = reduce_all(&[add_image("u1", "x")]);
    assert!(!state.get("u1").unwrap().favorited);
}

#[test]
fn test_toggle_twice_restores_favorited() {
    let state = reduce_all(&[add_image("u1", "x"), add_image("u2", "y")]);
    let once = ImagesReducer::reduce(state.clone(), &toggle_favorite_image("u2"));
    assert!(once.get("u2").unwrap().favorited);
    assert!(!once.get("u1").unwrap().favorited);

    let twice = ImagesReducer::reduce(once, &toggle_favorite_image("u2"));
    assert_eq!(twice, state);
}

#[test]
fn test_toggle_unknown_url_is_noop() {
    let state = reduce_all(&[add_image("u1", "x")]);
    let after = ImagesReducer::reduce(state.clone(), &toggle_favorite_image("missing"));
    assert_eq!(after, state);
}

#[test]
fn test_filter_action_leaves_collection_alone() {
    let state = reduce_all(&[add_image("u1", "x")]);
    let after = ImagesReducer::reduce(state.clone(), &toggle_display_favorites());
    assert_eq!(after, state);
}

#[test]
fn test_reduce_or_init_starts_empty() {
    let state = ImagesReducer::reduce_or_init(None, &add_image("u1", "x"));
    assert_eq!(state.len(), 1);
}
