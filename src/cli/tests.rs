//! Unit tests for CLI commands

use crate::cli::{demo_router, Cli, Commands};
use crate::runtime_config::RuntimeConfig;
use crate::server::Request;
use clap::Parser;
use http::Method;

#[test]
fn test_match_command_parses() {
    let cli = Cli::try_parse_from(["chainr", "match", "/users/:id", "/users/7"]).unwrap();
    match cli.command {
        Commands::Match { pattern, path } => {
            assert_eq!(pattern, "/users/:id");
            assert_eq!(path, "/users/7");
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_demo_command_with_headers() {
    let cli = Cli::try_parse_from([
        "chainr",
        "demo",
        "get",
        "/search?q=a",
        "-H",
        "accept: text/plain",
        "--header",
        "x-request-id: abc",
        "--routes",
    ])
    .unwrap();
    match cli.command {
        Commands::Demo {
            method,
            target,
            headers,
            routes,
        } => {
            assert_eq!(method, "get");
            assert_eq!(target, "/search?q=a");
            assert_eq!(headers, vec!["accept: text/plain", "x-request-id: abc"]);
            assert!(routes);
        }
        _ => panic!("Expected Demo command"),
    }
}

#[test]
fn test_missing_arguments_rejected() {
    assert!(Cli::try_parse_from(["chainr", "join", "/api"]).is_err());
    assert!(Cli::try_parse_from(["chainr", "bogus"]).is_err());
}

#[test]
fn test_demo_router_layout() {
    let router = demo_router().unwrap();
    let patterns: Vec<&str> = router.routes().map(|r| r.pattern()).collect();
    assert_eq!(
        patterns,
        vec!["/*", "/", "/users/:name", "/search", "/files/*", "/sub"]
    );
}

#[tokio::test]
async fn test_demo_router_middleware_stamps_headers() {
    let dispatcher = demo_router()
        .unwrap()
        .into_dispatcher_with(RuntimeConfig::default());

    let response = dispatcher
        .dispatch(Request::new(Method::GET, "/users/rod"))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body_text(), "Hello rod!");
    assert_eq!(response.header("x-powered-by"), Some("chainrouter"));
    assert!(response.header("x-request-id").is_some());

    let sub = dispatcher
        .dispatch(Request::new(Method::GET, "/sub"))
        .await
        .unwrap();
    assert_eq!(sub.body_text(), "Hello World from sub app!");

    let missing = dispatcher
        .dispatch(Request::new(Method::GET, "/nope"))
        .await
        .unwrap();
    assert_eq!(missing.status, 404);
    assert!(missing.header("x-powered-by").is_none());
}

#[tokio::test]
async fn test_demo_search_joins_repeated_values() {
    let dispatcher = demo_router()
        .unwrap()
        .into_dispatcher_with(RuntimeConfig::default());
    let response = dispatcher
        .dispatch(Request::new(Method::GET, "/search?q=a&q=b"))
        .await
        .unwrap();
    assert_eq!(response.body_text(), "Search query: a, b");
}
