//! Feed body decoding and author extraction.

mod common;

use common::mock_feed::feed_body;
use photofeed::feed::{decode_feed, extract_author, FeedError};

#[test]
fn test_extract_author_from_wrapping() {
    assert_eq!(extract_author("author(\"Jane Doe\")").unwrap(), "Jane Doe");
}

#[test]
fn test_extract_author_rejects_unwrapped() {
    for raw in ["Jane Doe", "nobody@flickr.com (\"Jane", "(\")", ""] {
        assert!(
            matches!(extract_author(raw), Err(FeedError::MalformedAuthor { .. })),
            "expected malformed author for {:?}",
            raw
        );
    }
}

#[test]
fn test_decode_keeps_response_order() {
    let body = feed_body(&[("https://x/1.jpg", "one"), ("https://x/2.jpg", "two")]);
    let page = decode_feed(&body).unwrap();

    let urls: Vec<_> = page.items.iter().map(|item| item.image_url.as_str()).collect();
    assert_eq!(urls, vec!["https://x/1.jpg", "https://x/2.jpg"]);
    assert_eq!(page.items[1].author, "two");
    assert_eq!(page.skipped, 0);
    assert_eq!(page.title.as_deref(), Some("Uploads from everyone"));
}

#[test]
fn test_decode_skips_bad_items() {
    let body = r#"{
        "items": [
            {"media": {"m": "https://x/1.jpg"}, "author": "nobody@flickr.com (\"ok\")"},
            {"media": {}, "author": "nobody@flickr.com (\"no media\")"},
            {"media": {"m": "https://x/3.jpg"}, "author": "no wrapping"}
        ]
    }"#;
    let page = decode_feed(body).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].author, "ok");
    assert_eq!(page.skipped, 2);
}

#[test]
fn test_decode_accepts_jsonp_and_quote_escapes() {
    let body = r#"jsonFlickrFeed({
        "title": "Uploads",
        "items": [{"media": {"m": "https://x/1.jpg"}, "author": "nobody@flickr.com (\"O\'Brien\")"}]
    })"#;
    let page = decode_feed(body).unwrap();
    assert_eq!(page.items[0].author, "O'Brien");
}

#[test]
fn test_decode_rejects_garbage() {
    let err = decode_feed("<html>rate limited</html>").unwrap_err();
    assert!(matches!(err, FeedError::Decode { .. }));
    assert!(err.is_retryable());
}
