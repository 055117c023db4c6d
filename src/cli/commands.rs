use anyhow::{anyhow, Context as _};
use clap::{Parser, Subcommand};
use http::Method;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::RouterError;
use crate::pattern::PathMatcher;
use crate::router::{join_path, Router};
use crate::runtime_config::RuntimeConfig;
use crate::server::{Request, Response};

/// Command-line probe for chainrouter patterns and dispatch
#[derive(Parser)]
#[command(name = "chainr")]
#[command(about = "Inspect route patterns and dispatch requests", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Match a path against a pattern and print the captures as JSON
    Match {
        /// Route pattern, e.g. `/users/:id`
        pattern: String,
        /// Path, path with query string, or absolute URL
        path: String,
    },
    /// Join a base path and a route path
    Join {
        base: String,
        path: String,
    },
    /// Dispatch one request through the built-in demo router
    Demo {
        /// HTTP method, e.g. GET
        method: String,
        /// Request target, e.g. `/users/rod?x=1`
        target: String,
        /// Extra request header as `name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Print the demo route table before dispatching
        #[arg(long, default_value_t = false)]
        routes: bool,
    },
}

/// Run a parsed command
///
/// `match` exits with failure when the path does not match.
///
/// # Errors
///
/// Invalid patterns, invalid methods or headers, and handler errors.
pub async fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Match { pattern, path } => {
            let matcher = PathMatcher::compile(&pattern)?;
            match matcher.match_path(&path) {
                Some(m) => {
                    debug!(variant = m.variant(), "Pattern matched");
                    println!("{}", serde_json::to_string(&m.to_map())?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no match: {path} does not match {}", matcher.pattern());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Join { base, path } => {
            println!("{}", join_path(&base, &path));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Demo {
            method,
            target,
            headers,
            routes,
        } => {
            let method = Method::from_str(&method.to_ascii_uppercase())
                .with_context(|| format!("invalid method: {method}"))?;
            let mut request = Request::new(method, target);
            for header in &headers {
                let (name, value) = header
                    .split_once(':')
                    .ok_or_else(|| anyhow!("header must be `name: value`, got {header:?}"))?;
                request = request.with_header(name.trim(), value.trim());
            }

            let router = demo_router()?;
            if routes {
                router.dump_routes();
            }
            let dispatcher = router.into_dispatcher_with(RuntimeConfig::from_env());
            let response = dispatcher.dispatch(request).await?;
            info!(status = response.status, "Demo request dispatched");
            print_response(&response);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_response(response: &Response) {
    println!("{}", response.status);
    for (name, value) in &response.headers {
        println!("{name}: {value}");
    }
    println!();
    println!("{}", response.body_text());
}

/// The router behind `chainr demo`
///
/// - `ALL *` middleware that stamps `x-request-id` and `x-powered-by` on
///   whatever response the rest of the chain commits
/// - `GET /`, `GET /users/:name`, `GET /search` (echoes `q`, possibly
///   repeated), `GET /files/*`
/// - a sub-router composed under `/sub`
///
/// # Errors
///
/// Never in practice; every pattern is fixed.
pub fn demo_router() -> Result<Router, RouterError> {
    let mut sub = Router::new();
    sub.get("/", |_cx| {
        Box::pin(async move { Ok(Some(Response::text("Hello World from sub app!"))) })
    })?;

    let mut app = Router::new();
    app.all("*", |mut cx| {
        Box::pin(async move {
            cx.next().await?;
            let request_id = cx.request_id().to_string();
            let response = cx.response_mut();
            response.set_header("x-request-id", request_id);
            response.set_header("x-powered-by", "chainrouter");
            Ok(None)
        })
    })?
    .get("/", |_cx| {
        Box::pin(async move { Ok(Some(Response::text("Hello World!"))) })
    })?
    .get("/users/:name", |cx| {
        Box::pin(async move {
            let name = cx.param("name").unwrap_or_default();
            Ok(Some(Response::text(format!("Hello {name}!"))))
        })
    })?
    .get("/search", |cx| {
        Box::pin(async move {
            let query = cx
                .query()
                .get("q")
                .map(|q| q.all().join(", "))
                .unwrap_or_default();
            Ok(Some(Response::text(format!("Search query: {query}"))))
        })
    })?
    .get("/files/*", |cx| {
        Box::pin(async move {
            let rest = cx.param("0").unwrap_or_default();
            Ok(Some(Response::text(format!("File: {rest}"))))
        })
    })?
    .compose("/sub", &sub)?;

    Ok(app)
}
