//! Reading picker commands from a line-oriented input such as stdin.
use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::{info, warn};
use shares_common::Symbol;

use crate::coordinator::Event;

/// Turn one input line into an event.
///
/// A number selects that 1-based row, `l`/`list` prints the directory,
/// `r`/`refresh` refetches it, `q`/`quit` exits, anything else is read as a
/// ticker. Commands win over one-letter tickers.
pub fn parse_command(line: &str) -> Option<Event> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Some(Event::Shutdown),
        "l" | "list" => return Some(Event::ShowDirectory),
        "r" | "refresh" => return Some(Event::RefreshDirectory),
        _ => {}
    }

    if let Ok(row) = trimmed.parse::<usize>() {
        if row == 0 {
            warn!("Rows are numbered from 1");
            return None;
        }
        return Some(Event::SelectRow(row - 1));
    }

    match Symbol::parse(trimmed) {
        Ok(symbol) => Some(Event::SelectSymbol(symbol)),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Background reader that forwards parsed commands to the coordinator.
pub struct InputReader;

impl InputReader {
    /// Spawn the reader thread. End of input posts `Shutdown`.
    pub fn spawn<R: BufRead + Send + 'static>(reader: R, events: Sender<Event>) -> JoinHandle<()> {
        thread::spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Input error: {}", e);
                        break;
                    }
                };
                if let Some(event) = parse_command(&line) {
                    let stop = matches!(event, Event::Shutdown);
                    if events.send(event).is_err() || stop {
                        return;
                    }
                }
            }
            info!("Input closed.");
            let _ = events.send(Event::Shutdown);
        })
    }
}
