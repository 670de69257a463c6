use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use movne_chat_widget::config::{ServerArgs, WidgetArgs};
use movne_chat_widget::routes::{self, embed_routes};
use movne_chat_widget::{terminal, ChatRelayWidget, HttpChatBackend};

#[derive(Parser)]
#[command(name = "movne-chat-widget", version, about = "Floating chat bubble relaying to the Movne chat backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the embed snippet, a demo host page and the widget bundle
    Serve {
        #[command(flatten)]
        widget: WidgetArgs,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Print the embed snippet for a CMS footer
    Snippet {
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Chat with the backend from the terminal
    Chat {
        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Check the backend's /health endpoint
    Health {
        #[command(flatten)]
        widget: WidgetArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialise tracing; stderr keeps stdout clean for `snippet` and `chat`
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movne_chat_widget=debug,tower_http=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { widget, server } => {
            let config = Arc::new(widget.resolve()?);
            info!(backend = %config.backend_base_url(), "Widget configuration loaded");

            let app = routes::app(Arc::clone(&config), &server.dist_dir, server.stub_backend);
            if server.stub_backend {
                info!("Stub backend mounted at /api/chat and /health");
            }

            let addr = format!("0.0.0.0:{}", server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!("Listening on http://{addr}/");

            axum::serve(listener, app).await?;
        }
        Command::Snippet { widget } => {
            let config = widget.resolve()?;
            println!("{}", embed_routes::render_snippet(&config)?);
        }
        Command::Chat { widget } => {
            let config = widget.resolve()?;
            let backend = HttpChatBackend::new(config.backend_url.clone());
            let mut chat = ChatRelayWidget::new(backend, &config);

            let stdin = BufReader::new(tokio::io::stdin());
            terminal::run(&mut chat, &config.title, stdin, tokio::io::stdout()).await?;
        }
        Command::Health { widget } => {
            let config = widget.resolve()?;
            let backend = HttpChatBackend::new(config.backend_url.clone());
            let status = backend
                .health()
                .await
                .with_context(|| format!("backend at {} is unhealthy", config.backend_base_url()))?;
            println!("{} healthy ({status})", config.backend_base_url());
        }
    }

    Ok(())
}
