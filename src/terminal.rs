//! Line-oriented rendition of the chat bubble: the first line opens the
//! panel and is submitted if it has text; every following line is submitted
//! as if Enter was pressed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::models::Message;
use crate::relay::ChatBackend;
use crate::widget::ChatRelayWidget;

const TRIGGER: &str = "💬  (press Enter, or type a message, to open the chat)";
const CLOSE_COMMAND: &str = "/close";
const QUIT_COMMAND: &str = "/quit";

pub async fn run<B, R, W>(
    widget: &mut ChatRelayWidget<B>,
    title: &str,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    B: ChatBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write_line(&mut output, TRIGGER).await?;

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            QUIT_COMMAND => break,
            CLOSE_COMMAND if widget.is_open() => {
                widget.close();
                write_line(&mut output, TRIGGER).await?;
                continue;
            }
            CLOSE_COMMAND => continue,
            _ => {}
        }

        if !widget.is_open() {
            widget.open();
            write_line(&mut output, &format!("── {title} ──")).await?;
        }

        let Some(exchange) = widget.begin_submit(&line) else {
            continue;
        };
        if let Some(user) = widget.transcript().last() {
            render(&mut output, user).await?;
        }
        let outcome = widget.backend().send(exchange.request()).await;
        let reply = widget.complete(exchange, outcome).clone();
        render(&mut output, &reply).await?;
    }

    output.flush().await
}

async fn render<W: AsyncWrite + Unpin>(output: &mut W, message: &Message) -> std::io::Result<()> {
    write_line(output, &format!("[{}] {}", message.sender, message.text)).await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> std::io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
