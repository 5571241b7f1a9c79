//! Routes a few fake requests through a chain with a selector and a fault
//! trap.
//!
//! RUST_LOG=handler_chain=debug cargo run --example error_traps

use anyhow::{anyhow, Result};
use handler_chain::{compose, select_if, ChainConfig, Handler};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Request {
    url: String,
}

#[derive(Debug, Default)]
struct Response {
    status: u16,
    body: String,
}

fn respond(status: u16, body: &'static str) -> Handler<Request, Response> {
    Handler::normal_sync(move |_: &mut Request, res: &mut Response| {
        res.status = status;
        res.body = body.to_string();
        Ok(())
    })
}

/// Picks a handler set per request, then runs it as part of a larger chain.
fn route() -> Handler<Request, Response> {
    Handler::normal(|req: &mut Request, res: &mut Response| {
        Box::pin(async move {
            let url = req.url.as_str();
            let chain = compose([
                Handler::normal_sync(|req: &mut Request, _: &mut Response| {
                    if req.url.contains("..") {
                        return Err(anyhow!("path traversal in {}", req.url));
                    }
                    Ok(())
                }),
                select_if!(
                    url == "/", vec![respond(200, "homepage")],
                    url == "/error500", respond(500, "weird"),
                    respond(404, "no idea"),
                )
                .into(),
                Handler::trap_sync(|err, _: &mut Request, res: &mut Response| {
                    tracing::warn!(error = %err, "request rejected");
                    res.status = 400;
                    res.body = "bad request".to_string();
                    Ok(())
                }),
            ]);
            chain.run(req, res).await
        })
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("handler_chain=info".parse()?))
        .init();

    ChainConfig::from_env()?.apply();

    let app = compose([
        route(),
        Handler::normal_sync(|req: &mut Request, res: &mut Response| {
            tracing::info!(url = %req.url, status = res.status, body = %res.body, "served");
            Ok(())
        }),
    ]);

    for url in ["/", "/error500", "/something", "/../etc/passwd"] {
        let mut req = Request { url: url.to_string() };
        let mut res = Response::default();
        app.call(&mut req, &mut res, |fault| {
            if let Some(err) = fault {
                tracing::error!(error = %err, "unhandled fault");
            }
        })
        .await;
    }

    Ok(())
}
