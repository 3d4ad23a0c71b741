//! Keyboard, resize and signal input, forwarded into the session queue.

use crossterm::event::{
    Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use studyroom_core::Event;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct InputTasks {
    keys: JoinHandle<()>,
    interrupt: JoinHandle<()>,
}

impl InputTasks {
    pub fn abort(&self) {
        self.keys.abort();
        self.interrupt.abort();
    }
}

/// Start forwarding terminal and signal input to `events`.
pub fn spawn(events: mpsc::Sender<Event>) -> InputTasks {
    InputTasks {
        keys: tokio::spawn(forward_terminal(events.clone())),
        interrupt: tokio::spawn(forward_interrupt(events)),
    }
}

async fn forward_terminal(events: mpsc::Sender<Event>) {
    let mut stream = EventStream::new();
    while let Some(next) = stream.next().await {
        let event = match next {
            Ok(term_event) => match map_terminal_event(&term_event) {
                Some(event) => event,
                None => continue,
            },
            Err(err) => {
                // Without input the session could never be quit.
                warn!(%err, "terminal input failed, quitting");
                Event::Quit
            }
        };
        let quit = event == Event::Quit;
        if events.send(event).await.is_err() || quit {
            break;
        }
    }
}

/// SIGINT outside raw mode, or delivered by `kill -INT`.
async fn forward_interrupt(events: mpsc::Sender<Event>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("interrupt received");
        let _ = events.send(Event::Quit).await;
    }
}

pub fn map_terminal_event(event: &TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        TermEvent::Resize(cols, rows) => Some(Event::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Event> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Event::Quit),
        KeyCode::Char('s') => Some(Event::Start),
        KeyCode::Char('q') => Some(Event::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> TermEvent {
        TermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn maps_commands() {
        assert_eq!(
            map_terminal_event(&key(KeyCode::Char('s'), KeyModifiers::NONE)),
            Some(Event::Start)
        );
        assert_eq!(
            map_terminal_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Event::Quit)
        );
        assert_eq!(
            map_terminal_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Quit)
        );
    }

    #[test]
    fn ignores_other_keys() {
        assert_eq!(
            map_terminal_event(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(map_terminal_event(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn ignores_key_release() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_terminal_event(&TermEvent::Key(release)), None);
    }

    #[test]
    fn forwards_resize() {
        assert_eq!(
            map_terminal_event(&TermEvent::Resize(100, 40)),
            Some(Event::Resize { cols: 100, rows: 40 })
        );
    }
}
