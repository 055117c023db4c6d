/// Join a base path and a route path
///
/// - a `next` of exactly `/` returns `base` unchanged
/// - otherwise one leading `/` is stripped from `next`, and the two are joined
///   with exactly one `/` between them
///
/// ```
/// use chainrouter::router::join_path;
///
/// assert_eq!(join_path("/api/", "v1"), "/api/v1");
/// assert_eq!(join_path("/api", "/v1"), "/api/v1");
/// assert_eq!(join_path("/api", "/"), "/api");
/// ```
#[must_use]
pub fn join_path(base: &str, next: &str) -> String {
    if next == "/" {
        return base.to_string();
    }
    let rest = next.strip_prefix('/').unwrap_or(next);
    if base.ends_with('/') {
        format!("{base}{rest}")
    } else {
        format!("{base}/{rest}")
    }
}
