pub mod config;
pub mod event;
pub mod handler;
mod util;

pub use config::Config;
pub use event::{Event, InputError};
pub use handler::{process, respond, PingResponder, Reply, Responder};
use serde_json as json;
use spdlog::prelude::*;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub handled: u64,
    pub replied: u64,
    pub rejected: u64,
}

/// Answers one JSON event per input line with one JSON line: the reply, or
/// `null` when there is none or the event could not be decoded.
pub async fn serve<R, W>(cfg: &Config, mut reader: R, mut writer: W) -> anyhow::Result<Stats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = Stats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        // lines are raw bytes, not necessarily UTF-8
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        stats.handled += 1;

        let reply = match json::from_slice::<json::Value>(&line)
            .map_err(InputError::from)
            .and_then(|raw| process(cfg, &raw))
        {
            Ok(reply) => reply,
            Err(err) => {
                warn!("rejected event #{}: {err}", stats.handled);
                stats.rejected += 1;
                None
            }
        };
        if reply.is_some() {
            stats.replied += 1;
        }

        let mut out = json::to_vec(&reply)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    Ok(stats)
}

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    if cfg.is_absent() {
        debug!("running without config");
    }

    let stats = serve(&cfg, BufReader::new(io::stdin()), io::stdout()).await?;

    info!(
        "input closed. handled {} events, replied {}, rejected {}",
        stats.handled, stats.replied, stats.rejected
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PONG: &str = r#"{"confidence":10,"text":"pong!","why":["They pinged so I ponged!"]}"#;

    async fn serve_bytes(input: &[u8]) -> (String, Stats) {
        let mut out = Vec::new();
        let stats = serve(&Config::default(), input, &mut out).await.unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    async fn serve_str(input: &str) -> (String, Stats) {
        serve_bytes(input.as_bytes()).await
    }

    #[tokio::test]
    async fn one_line_per_event() {
        let input = concat!(
            r#"{"body":"ping python"}"#,
            "\n",
            r#"{"body":"ping"}"#,
            "\n",
            r#"{"body":[112,105,110,103,32,112,121,116,104,111,110]}"#,
            "\n",
        );

        let (out, stats) = serve_str(input).await;
        assert_eq!(out, format!("{PONG}\nnull\n{PONG}\n"));
        assert_eq!(
            stats,
            Stats {
                handled: 3,
                replied: 2,
                rejected: 0,
            }
        );
    }

    #[tokio::test]
    async fn rejected_lines_stay_aligned() {
        let input = "{\"nobody\":1}\nnot json\n{\"body\":\"ping python\"}\n{\"body\":7}";

        let (out, stats) = serve_str(input).await;
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "null");
        assert_eq!(lines[1], "null");
        assert!(lines[2].contains("pong!"));
        assert_eq!(lines[3], "null");
        assert_eq!(
            stats,
            Stats {
                handled: 4,
                replied: 1,
                rejected: 3,
            }
        );
    }

    #[tokio::test]
    async fn blank_lines_skipped() {
        let (out, stats) = serve_str("\n   \n{\"body\":\"x\"}\n\n").await;
        assert_eq!(out, "null\n");
        assert_eq!(stats.handled, 1);

        let (out, stats) = serve_str("\r\n\t\n").await;
        assert!(out.is_empty());
        assert_eq!(stats, Stats::default());

        let (out, stats) = serve_str("").await;
        assert!(out.is_empty());
        assert_eq!(stats, Stats::default());
    }

    #[tokio::test]
    async fn non_utf8_line_rejected() {
        let input = b"{\"body\":\"ping python\"}\n\xff\xfe\n{\"body\":\"ping python\"}\n";

        let (out, stats) = serve_bytes(input).await;
        assert_eq!(out, format!("{PONG}\nnull\n{PONG}\n"));
        assert_eq!(
            stats,
            Stats {
                handled: 3,
                replied: 2,
                rejected: 1,
            }
        );
    }

    #[tokio::test]
    async fn crlf_lines() {
        let input = "{\"body\":\"ping python\"}\r\n{\"body\":\"ping\"}\r\n{\"body\":\"ping python\"}";

        let (out, stats) = serve_str(input).await;
        assert_eq!(out, format!("{PONG}\nnull\n{PONG}\n"));
        assert_eq!(
            stats,
            Stats {
                handled: 3,
                replied: 2,
                rejected: 0,
            }
        );
    }
}
