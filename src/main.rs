//! tiklink - short-video link resolver
//!
//! Resolves TikTok and Douyin share links into normalized download variants
//! plus author metadata, either as an HTTP service or as a one-shot CLI.

use anyhow::Result;
use clap::Parser;
use tiklink::normalize::proxied_download_url;
use tiklink::resolver::ResolveService;
use tiklink::server;
use tiklink::utils::clipboard;
use tiklink::utils::config::AppSettings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Resolve a single link and print the result instead of serving
    #[arg(long)]
    resolve: Option<String>,

    /// Resolve the link currently on the clipboard
    #[arg(long)]
    paste: bool,

    /// Bind address override
    #[arg(long)]
    bind: Option<String>,

    /// Port override
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut settings = AppSettings::default();
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    if args.paste {
        let url = match clipboard::get_clipboard_content() {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Clipboard read failed: {}", e);
                return Ok(());
            }
        };
        resolve_cli(&settings, url.trim()).await;
        return Ok(());
    }

    if let Some(url) = args.resolve {
        resolve_cli(&settings, &url).await;
        return Ok(());
    }

    server::serve(settings).await
}

async fn resolve_cli(settings: &AppSettings, url: &str) {
    println!("Resolving: {}", url);

    let service = match ResolveService::from_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize resolver: {}", e);
            return;
        }
    };

    let result = match service.resolve(url).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Resolution failed: {}", e);
            return;
        }
    };

    println!("Author: {}", result.author.nickname);
    if !result.description.is_empty() {
        println!("Description: {}", result.description);
    }
    if let Some(uploaded) = result.uploaded_at {
        println!("Uploaded: {}", uploaded);
    }

    if result.variants.is_empty() {
        println!("Nothing downloadable was found for this link.");
        return;
    }

    for variant in &result.variants {
        println!("{:?}: {}", variant.kind, variant.url);
        if let Some(proxy) = &settings.download_proxy {
            println!(
                "  save-as: {}",
                proxied_download_url(proxy, variant, &result.author.nickname)
            );
        }
    }
}
