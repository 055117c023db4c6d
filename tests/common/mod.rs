#![allow(dead_code)]

use chainrouter::{Context, Dispatcher, HandlerResult, Request, Response};
use futures::future::BoxFuture;
use http::Method;
use std::sync::{Arc, Mutex};

pub mod handlers {
    use super::*;
    use chainrouter::Handler;

    /// Commits a fixed plain-text body
    pub struct Fixed(pub &'static str);

    impl Handler for Fixed {
        fn call<'a>(&'a self, _cx: Context<'a>) -> BoxFuture<'a, HandlerResult> {
            Box::pin(async move { Ok(Some(Response::text(self.0))) })
        }
    }

    pub fn hello(_cx: Context<'_>) -> BoxFuture<'_, HandlerResult> {
        Box::pin(async move { Ok(Some(Response::text("Hello World!"))) })
    }

    pub fn pass(_cx: Context<'_>) -> BoxFuture<'_, HandlerResult> {
        Box::pin(async move { Ok(None) })
    }
}

/// Records the order in which handlers run
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub async fn send(dispatcher: &Dispatcher, method: Method, target: &str) -> Response {
    dispatcher
        .dispatch(Request::new(method, target))
        .await
        .unwrap()
}

pub async fn get_text(dispatcher: &Dispatcher, target: &str) -> (u16, String) {
    let response = send(dispatcher, Method::GET, target).await;
    (response.status, response.body_text().into_owned())
}
