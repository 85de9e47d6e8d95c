//! A simple program demonstrates how to use `chat-widget` as a library.

#[macro_use]
extern crate tracing;

mod terminal;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use chat_widget::SessionBuilder;
use tokio::io::{self, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::terminal::TerminalView;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let view = TerminalView::new();
    let (idle_tx, mut idle_rx) = mpsc::unbounded_channel();

    let mut builder = SessionBuilder::new(view.clone()).on_idle(move || {
        idle_tx.send(()).ok();
    });
    if let Ok(endpoint) = env::var("CHAT_WIDGET_ENDPOINT") {
        builder = builder.with_endpoint(endpoint);
    }
    if let Ok(secs) = env::var("CHAT_WIDGET_TIMEOUT_SECS") {
        let Ok(secs) = secs.parse::<u64>() else {
            eprintln!("CHAT_WIDGET_TIMEOUT_SECS must be a number of seconds");
            return;
        };
        builder = builder.with_timeout(Duration::from_secs(secs));
    }

    let session = match builder.build() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("failed to start the widget: {err}");
            return;
        }
    };

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        if !view.submit_prompt(prompt_of(&line)) {
            warn!("the submission was not picked up");
            continue;
        }

        // Nothing to wait for if the widget could not start a submission,
        // the reason has been logged already.
        if session.widget().in_flight() == 0 {
            continue;
        }
        if idle_rx.recv().await.is_none() {
            break;
        }
        view.flush();
    }
}

/// Strips the line break, the rest of the line is the prompt as typed.
fn prompt_of(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_keeps_spaces() {
        assert_eq!(prompt_of("  hello world  \n"), "  hello world  ");
        assert_eq!(prompt_of("hi\r\n"), "hi");
        assert_eq!(prompt_of(""), "");
    }
}
