//! Integration tests for the command pipeline.
//!
//! Raw protocol text goes through the stdin reader into the event loop,
//! which drives the headless renderer. No display is needed.

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use wlosd::osd::{reader, Event, Osd, TimerManager};
use wlosd::render::headless::HeadlessRenderer;
use wlosd_protocol::parse_line;

/// Shared stdout buffer
#[derive(Clone, Default)]
struct Output(Rc<RefCell<Vec<u8>>>);

impl Output {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Feed `input` through the reader and run the loop until it stops.
async fn run_script(input: &str) -> (Osd<HeadlessRenderer>, String) {
    let (tx, rx) = mpsc::unbounded_channel();
    let out = Output::default();
    let osd = Osd::new(
        HeadlessRenderer::new(),
        TimerManager::new(tx.clone()),
        None,
        Box::new(out.clone()),
    );

    reader::read_commands(Cursor::new(input.to_string()), &tx);
    let osd = osd.run(rx).await;
    (osd, out.text())
}

// ── Whole sessions ──

#[tokio::test]
async fn hide_one_of_two_items() {
    let script = "show a.1\nx\n\nshow a.2\ny\n\nhide a.1\nlist-uids\n";
    let (osd, out) = run_script(script).await;

    assert_eq!(out, "a\na.2\n");
    assert_eq!(osd.list_uids(), ["a", "a.2"]);
    assert_eq!(osd.renderer().surface("a").unwrap().labels, ["y"]);
}

#[tokio::test]
async fn bad_line_does_not_stop_the_session() {
    let script = "show\nshow b\nstill here\n\nlist-uids\n";
    let (osd, out) = run_script(script).await;

    assert_eq!(out, "b\n");
    assert_eq!(osd.renderer().surface("b").unwrap().labels, ["still here"]);
}

#[tokio::test]
async fn reload_css_without_stylesheet_keeps_running() {
    let (osd, out) = run_script("show a\nx\n\nreload-css\nlist-uids\nexit\nhide a\n").await;

    assert_eq!(out, "a\n");
    assert_eq!(osd.list_uids(), ["a"]);
}

#[tokio::test]
async fn multiline_body_with_custom_end_mark() {
    let script = "show -m -e END -c warn alert.disk\n<b>disk</b>\n\n95% full\nEND\nlist-uids\n";
    let (osd, out) = run_script(script).await;

    assert_eq!(out, "alert\nalert.disk\n");
    let item = osd.store().window("alert").unwrap().item("disk").unwrap();
    assert_eq!(item.text, "<b>disk</b>\n\n95% full");
    assert!(item.markup);
    assert_eq!(item.classes, ["warn"]);
}

#[tokio::test]
async fn regex_hide_over_a_session() {
    let script = "\
show vol.level
40%

show vol.mute
muted

show bright
80%

hide -r mute$ ^bright
list-uids
";
    let (osd, out) = run_script(script).await;

    assert_eq!(out, "vol\nvol.level\n");
    assert_eq!(osd.renderer().surface_count(), 1);
}

#[tokio::test]
async fn help_is_written_to_stdout() {
    let (_, out) = run_script("help show\n").await;
    assert!(out.contains("--end-mark"));
    assert!(out.contains("--sec"));
}

// ── Timers ──

#[tokio::test(start_paused = true)]
async fn message_disappears_after_timeout() {
    let (tx, rx) = mpsc::unbounded_channel();
    let out = Output::default();
    let osd = Osd::new(
        HeadlessRenderer::new(),
        TimerManager::new(tx.clone()),
        None,
        Box::new(out.clone()),
    );

    // No EOF: the session stays open while the timer runs
    for line in ["show -s 2 a.1", "list-uids"] {
        let mut command = parse_line(line).unwrap();
        if let wlosd_protocol::Command::Show(show) = &mut command {
            show.text = "hello".to_string();
        }
        tx.send(Event::Command(command)).unwrap();
    }

    let driver = async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        tx.send(Event::Command(parse_line("list-uids").unwrap()))
            .unwrap();
        tx.send(Event::Command(parse_line("exit").unwrap())).unwrap();
    };

    let (osd, ()) = tokio::join!(osd.run(rx), driver);

    // Listed once before expiry; the second listing is empty
    assert_eq!(out.text(), "a\na.1\n");
    assert!(osd.list_uids().is_empty());
    assert_eq!(osd.renderer().surface_count(), 0);
    assert!(osd.timers().is_empty());
}
