//! Decoding of the public photo feed JSON.
//!
//! The feed answers with an object carrying an `items` array. Each item has an
//! `author` formatted as `nobody@flickr.com ("Name")` and the image URL under
//! `media.m`:
//!
//! ```json
//! {"title": "Uploads from everyone",
//!  "items": [{"author": "nobody@flickr.com (\"Jane Doe\")",
//!             "media": {"m": "https://live.staticflickr.com/1/2_m.jpg"}}]}
//! ```

use serde::Deserialize;

use crate::feed::error::FeedError;

const JSONP_PREFIX: &str = "jsonFlickrFeed(";

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    author: String,
    #[serde(default)]
    media: Option<RawMedia>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    #[serde(default)]
    m: Option<String>,
}

/// One usable feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub image_url: String,
    pub author: String,
}

/// Decoded feed, in response order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedPage {
    pub title: Option<String>,
    pub items: Vec<FeedItem>,
    /// Entries dropped for a missing URL or malformed author.
    pub skipped: usize,
}

/// Pulls `Name` out of `... ("Name")`.
pub fn extract_author(raw: &str) -> Result<String, FeedError> {
    let malformed = || FeedError::MalformedAuthor {
        raw: raw.to_string(),
    };
    let start = raw.find("(\"").ok_or_else(malformed)? + 2;
    let inner = raw
        .strip_suffix("\")")
        .filter(|trimmed| trimmed.len() >= start)
        .ok_or_else(malformed)?;
    Ok(inner[start..].to_string())
}

/// Strips a JSONP wrapper and Flickr's non-standard `\'` escapes.
fn normalize_body(body: &str) -> String {
    let trimmed = body.trim();
    let unwrapped = trimmed
        .strip_prefix(JSONP_PREFIX)
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    unwrapped.replace("\\'", "'")
}

/// Decodes a feed body. Malformed entries are skipped and logged.
pub fn decode_feed(body: &str) -> Result<FeedPage, FeedError> {
    let raw: RawFeed = serde_json::from_str(&normalize_body(body))
        .map_err(|source| FeedError::Decode { source })?;

    let mut page = FeedPage {
        title: raw.title,
        ..FeedPage::default()
    };

    for item in raw.items {
        let Some(image_url) = item.media.and_then(|media| media.m).filter(|m| !m.is_empty())
        else {
            tracing::warn!(author = %item.author, "skipping feed item without media url");
            page.skipped += 1;
            continue;
        };
        match extract_author(&item.author) {
            Ok(author) => page.items.push(FeedItem { image_url, author }),
            Err(err) => {
                tracing::warn!(image_url = %image_url, error = %err, "skipping feed item");
                page.skipped += 1;
            }
        }
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_wrapped_author() {
        assert_eq!(extract_author("author(\"Jane Doe\")").unwrap(), "Jane Doe");
        assert_eq!(
            extract_author("nobody@flickr.com (\"jd_photos\")").unwrap(),
            "jd_photos"
        );
    }

    #[test]
    fn keeps_inner_parentheses() {
        assert_eq!(
            extract_author("nobody@flickr.com (\"Jane (JD) Doe\")").unwrap(),
            "Jane (JD) Doe"
        );
    }

    #[test]
    fn empty_name_is_allowed() {
        assert_eq!(extract_author("x (\"\")").unwrap(), "");
    }

    #[test]
    fn rejects_missing_wrapping() {
        assert!(matches!(
            extract_author("nobody@flickr.com"),
            Err(FeedError::MalformedAuthor { .. })
        ));
        assert!(extract_author("nobody (\"unterminated").is_err());
        assert!(extract_author("(\")").is_err());
    }

    #[test]
    fn decodes_items_in_order() {
        let body = r#"{"title":"Uploads","items":[
            {"author":"nobody@flickr.com (\"a\")","media":{"m":"https://x/1.jpg"}},
            {"author":"nobody@flickr.com (\"b\")","media":{"m":"https://x/2.jpg"}}
        ]}"#;
        let page = decode_feed(body).unwrap();
        assert_eq!(page.title.as_deref(), Some("Uploads"));
        assert_eq!(
            page.items,
            vec![
                FeedItem {
                    image_url: "https://x/1.jpg".into(),
                    author: "a".into()
                },
                FeedItem {
                    image_url: "https://x/2.jpg".into(),
                    author: "b".into()
                },
            ]
        );
        assert_eq!(page.skipped, 0);
    }

    #[test]
    fn accepts_jsonp_wrapper_and_bad_escapes() {
        let body = "jsonFlickrFeed({\"items\":[{\"author\":\"n (\\\"O\\'Neil\\\")\",\"media\":{\"m\":\"u\"}}]})";
        let page = decode_feed(body).unwrap();
        assert_eq!(page.items[0].author, "O'Neil");
    }

    #[test]
    fn skips_bad_entries() {
        let body = r#"{"items":[
            {"author":"plain","media":{"m":"https://x/1.jpg"}},
            {"author":"n (\"ok\")"},
            {"author":"n (\"ok\")","media":{"m":"https://x/3.jpg"}}
        ]}"#;
        let page = decode_feed(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.skipped, 2);
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            decode_feed("<html>"),
            Err(FeedError::Decode { .. })
        ));
    }
}
