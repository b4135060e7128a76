//! stdin reader thread.
//!
//! Reads one command line at a time, reads the message body of a `show`,
//! and posts the parsed command to the event loop. It never touches display
//! state. While a body is being read no other command can be parsed; if the
//! end-mark never arrives the reader simply stays blocked.

use std::io::{self, BufRead, ErrorKind};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};
use wlosd_protocol::{parse_line, read_body, Command};

use super::daemon::Event;

/// Start the reader on the process's stdin.
pub fn spawn(events: UnboundedSender<Event>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            read_commands(stdin.lock(), &events);
        })
}

/// Read and post commands until EOF, `exit`/`quit`, or the loop is gone.
pub fn read_commands<R: BufRead>(mut input: R, events: &UnboundedSender<Event>) {
    let mut line = String::new();

    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                info!("stdin reached end of file");
                let _ = events.send(Event::Closed);
                return;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("skipping line that is not valid UTF-8");
                continue;
            }
            Err(e) => {
                error!("failed to read stdin: {e}");
                let _ = events.send(Event::Closed);
                return;
            }
        }

        let text = line.strip_suffix('\n').unwrap_or(&line);
        let mut command = match parse_line(text) {
            Ok(command) => command,
            Err(e) => {
                warn!("parsing error: {e}");
                continue;
            }
        };

        if let Command::Show(show) = &mut command {
            match read_body(&mut input, &show.end_mark) {
                Ok(body) => show.text = body,
                Err(e) => {
                    warn!("dropping show {}: failed to read message: {e}", show.address);
                    continue;
                }
            }
        }

        let exiting = matches!(command, Command::Exit);
        if events.send(Event::Command(command)).is_err() {
            debug!("event loop is gone; reader stopping");
            return;
        }
        if exiting {
            return;
        }
    }
}
