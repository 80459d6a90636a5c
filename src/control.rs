//! Remote control via Unix socket
//!
//! Accepts commands over a Unix socket to control the player
//! as if keyboard keys were pressed.

use std::io::{BufRead, BufReader};
use std::os::unix::net::{UnixListener, UnixStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

const SOCKET_PATH: &str = "/tmp/tessera.sock";

/// Commands that can be sent over the socket or the MQTT topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    ToggleFps,
    Quit,
    Demo(usize),
}

/// Parse one command line of the remote grammar
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "left" | "prev" => Some(Command::Left),
        "right" | "next" => Some(Command::Right),
        "f" | "fps" => Some(Command::ToggleFps),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => {
            // Try to parse "demo N" or just a number
            if let Some(rest) = line.strip_prefix("demo ") {
                rest.trim().parse().ok().map(Command::Demo)
            } else {
                line.parse().ok().map(Command::Demo)
            }
        }
    }
}

/// Controller that listens for commands on a Unix socket
pub struct Controller {
    receiver: Receiver<Command>,
    _listener_thread: thread::JoinHandle<()>,
}

impl Controller {
    /// Create a new controller listening on the Unix socket
    pub fn new() -> Result<Self, String> {
        // Remove existing socket if present
        let _ = std::fs::remove_file(SOCKET_PATH);

        let listener = UnixListener::bind(SOCKET_PATH)
            .map_err(|e| format!("Failed to bind socket: {}", e))?;

        // Set non-blocking so we can check for new connections
        listener
            .set_nonblocking(true)
            .map_err(|e| format!("Failed to set non-blocking: {}", e))?;

        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::listener_loop(listener, sender);
        });

        Ok(Self {
            receiver,
            _listener_thread: handle,
        })
    }

    fn listener_loop(listener: UnixListener, sender: Sender<Command>) {
        loop {
            match listener.accept() {
                Ok((stream, _)) => {
                    let sender = sender.clone();
                    thread::spawn(move || {
                        Self::handle_client(stream, sender);
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    // No connection ready, sleep briefly
                    thread::sleep(std::time::Duration::from_millis(50));
                }
                Err(_) => {
                    // Socket closed or error, exit loop
                    break;
                }
            }
        }
    }

    fn handle_client(stream: UnixStream, sender: Sender<Command>) {
        let reader = BufReader::new(stream);
        for line in reader.lines().flatten() {
            if let Some(cmd) = parse_command(&line) {
                if sender.send(cmd).is_err() {
                    break;
                }
            }
        }
    }

    /// Get any pending commands (non-blocking)
    pub fn poll(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Ok(cmd) = self.receiver.try_recv() {
            commands.push(cmd);
        }
        commands
    }

    /// Get the socket path
    pub fn socket_path() -> &'static str {
        SOCKET_PATH
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // Clean up the socket file
        let _ = std::fs::remove_file(SOCKET_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("left"), Some(Command::Left));
        assert_eq!(parse_command("prev"), Some(Command::Left));
        assert_eq!(parse_command("  NEXT "), Some(Command::Right));
        assert_eq!(parse_command("right"), Some(Command::Right));
    }

    #[test]
    fn test_parse_toggles_and_quit() {
        assert_eq!(parse_command("fps"), Some(Command::ToggleFps));
        assert_eq!(parse_command("f"), Some(Command::ToggleFps));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_demo_selection() {
        assert_eq!(parse_command("demo 2"), Some(Command::Demo(2)));
        assert_eq!(parse_command("1"), Some(Command::Demo(1)));
        assert_eq!(parse_command("demo x"), None);
        assert_eq!(parse_command("bogus"), None);
    }
}
