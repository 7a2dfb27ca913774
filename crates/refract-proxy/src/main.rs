//! Sample wiring: a proxy that announces each HTML page's title.
//!
//! Triggers on `text/html` responses and injects a
//! `<script>alert("<title text>")</script>` right after the document head,
//! logging every rewritten exchange with its elapsed time.

use aho_corasick::AhoCorasick;
use anyhow::Context as _;
use bytes::Bytes;
use clap::Parser;
use once_cell::sync::Lazy;
use refract_proxy::{ProxyConfig, ProxyServer};
use regex::Regex;
use tracing::info;

/// Case-insensitive scanner for the opening head tag.
static HEAD_OPEN: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["<head>"])
        .expect("static pattern set")
});

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("static regex"));

#[derive(Parser, Debug)]
#[command(
    name = "refract-proxy",
    about = "Forward HTTP proxy that rewrites triggered response bodies"
)]
struct Args {
    #[arg(short, long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ProxyConfig::new();
    config
        .set_port(args.port)
        .set_trigger(|_req, res| {
            res.headers
                .get("content-type")
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_ascii_lowercase().contains("text/html"))
                .unwrap_or(false)
        })
        .set_inject(|body| Ok(inject_title_alert(body)))
        .set_logger(|req, start, end| {
            let elapsed_ms = (end - start).num_milliseconds();
            info!("{} {} rewritten in {}ms", req.method, req.uri, elapsed_ms);
        });

    let server = ProxyServer::new(config);
    let addr = server.start().context("failed to start proxy")?;
    info!("Proxy server running on {}", addr);

    tokio::signal::ctrl_c().await?;
    Ok(())
}

/// Insert a `<script>alert("<title text>")</script>` right after the
/// document's `<head>`. Non-UTF-8 payloads and documents without a head
/// pass through unchanged.
fn inject_title_alert(body: Bytes) -> Bytes {
    let Ok(html) = std::str::from_utf8(&body) else {
        return body;
    };
    let Some(head) = HEAD_OPEN.find(html) else {
        return body;
    };

    let title = TITLE
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    // Debug formatting doubles as JS string escaping for quotes and newlines.
    let script = format!("<script>alert({title:?})</script>");

    let mut rewritten = String::with_capacity(html.len() + script.len());
    rewritten.push_str(&html[..head.end()]);
    rewritten.push_str(&script);
    rewritten.push_str(&html[head.end()..]);
    Bytes::from(rewritten)
}
