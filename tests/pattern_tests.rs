use chainrouter::pattern::{path_of, PathMatcher, WILDCARD_KEY};
use chainrouter::RouterError;

fn assert_captures(pattern: &str, path: &str, expected: &[(&str, &str)]) {
    let matcher = PathMatcher::compile(pattern).unwrap();
    match matcher.match_path(path) {
        Some(m) => {
            println!("✅ {pattern} ~ {path} → {:?}", m.captures());
            let got: Vec<(String, String)> = m
                .captures()
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect();
            let want: Vec<(String, String)> = expected
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            assert_eq!(got, want, "Capture mismatch for {pattern} ~ {path}");
        }
        None => panic!("Expected {pattern} to match {path}"),
    }
}

fn assert_no_match(pattern: &str, path: &str) {
    let matcher = PathMatcher::compile(pattern).unwrap();
    assert!(
        matcher.match_path(path).is_none(),
        "Expected {pattern} not to match {path}"
    );
}

#[test]
fn test_static() {
    assert_captures("/hello", "/hello", &[]);
    assert_no_match("/hello", "/hello/world");
    assert_no_match("/hello", "/hell");
}

#[test]
fn test_params() {
    assert_captures("/:name", "/rod", &[("name", "rod")]);
    assert_no_match("/:name", "/");
}

#[test]
fn test_multiple_params() {
    assert_captures(
        "/:name/:id/:oa/:di",
        "/hello/1/2/3",
        &[("name", "hello"), ("id", "1"), ("oa", "2"), ("di", "3")],
    );
}

#[test]
fn test_wildcard() {
    assert_captures("/:name/*", "/hello/world", &[("name", "hello"), ("0", "world")]);
    assert_captures("/:name/*", "/hello/a/b/c", &[("name", "hello"), ("0", "a/b/c")]);
    assert_captures("/:name/*", "/hello/", &[("name", "hello"), ("0", "")]);
    assert_eq!(WILDCARD_KEY, "0");
}

#[test]
fn test_url_and_query() {
    assert_captures("/hello", "http://localhost/hello", &[]);
    assert_captures("/hello", "http://localhost/hello?name=world", &[]);
    assert_captures("/:name", "https://example.com:8443/rod?x=1#frag", &[("name", "rod")]);
}

#[test]
fn test_path_of() {
    assert_eq!(path_of("/a/b?c=d"), "/a/b");
    assert_eq!(path_of("http://localhost"), "/");
    assert_eq!(path_of(""), "/");
    assert_eq!(path_of("?q=1"), "/");
}

#[test]
fn test_optional_segment() {
    assert_captures("/files/:id?", "/files/42", &[("id", "42")]);
    assert_captures("/files/:id?", "/files", &[]);
    assert_no_match("/files/:id?", "/files/42/extra");
}

#[test]
fn test_percent_encoded_segments_are_not_decoded() {
    assert_captures("/users/:name", "/users/j%C3%B6rg", &[("name", "j%C3%B6rg")]);
}

#[test]
fn test_conflict_detection() {
    let mut matcher = PathMatcher::compile("/:a").unwrap();
    match matcher.add("/:b") {
        Err(RouterError::ParameterNameConflict {
            existing,
            requested,
            ..
        }) => {
            assert_eq!(existing, "a");
            assert_eq!(requested, "b");
        }
        other => panic!("Expected ParameterNameConflict, got {other:?}"),
    }
}

#[test]
fn test_conflict_message_names_both_parameters() {
    let mut matcher = PathMatcher::compile("/users/:id").unwrap();
    let err = matcher.add("/users/:name/posts").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("\"name\""), "{message}");
    assert!(message.contains("\"id\""), "{message}");
    assert!(message.contains("/users/:name/posts"), "{message}");
}

#[test]
fn test_invalid_pattern_message() {
    let err = PathMatcher::compile("/a/*/b").unwrap_err();
    assert!(err.to_string().starts_with("invalid route pattern \"/a/*/b\""));
}
