//! MQTT client for remote demo control
//!
//! Connects to an MQTT broker and subscribes to a topic. Payloads use the
//! same command grammar as the Unix socket ("next", "demo 2", ...) or a
//! small JSON form; parsed commands are forwarded to the main loop.

use crate::control::{parse_command, Command};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const DEFAULT_PORT: u16 = 1883;
const DEFAULT_TOPIC: &str = "tessera";

/// JSON form for incoming messages: {"demo": 2}
#[derive(Deserialize)]
struct JsonCommand {
    demo: usize,
}

/// Parse one payload: JSON first, plain command text as fallback
fn parse_payload(payload: &str) -> Option<Command> {
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<JsonCommand>(payload) {
        return Some(Command::Demo(json.demo));
    }
    parse_command(payload)
}

/// MQTT client that receives commands in a background thread
pub struct MqttClient {
    receiver: Receiver<Command>,
    _thread: thread::JoinHandle<()>,
}

impl MqttClient {
    /// Create a new MQTT client and connect to the broker.
    /// Fails immediately if connection cannot be established.
    pub fn new(host: &str, topic: &str) -> Result<Self, String> {
        let topic = if topic.is_empty() { DEFAULT_TOPIC } else { topic };

        let mut options = MqttOptions::new("tessera", host, DEFAULT_PORT);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut connection) = Client::new(options, 10);

        // Subscribe to topic
        client
            .subscribe(topic, QoS::AtMostOnce)
            .map_err(|e| format!("Failed to subscribe to topic '{}': {}", topic, e))?;

        // Test connection by polling once - fail fast if broker unreachable
        let first_event = connection.iter().next();
        match first_event {
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - {}",
                    host, DEFAULT_PORT, e
                ));
            }
            None => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - connection closed",
                    host, DEFAULT_PORT
                ));
            }
        }

        let (sender, receiver) = mpsc::channel();
        let topic_owned = topic.to_string();

        let handle = thread::spawn(move || {
            Self::message_loop(connection, sender, &topic_owned);
        });

        eprintln!(
            "MQTT: Connected to {}:{}, subscribed to '{}'",
            host, DEFAULT_PORT, topic
        );

        Ok(Self {
            receiver,
            _thread: handle,
        })
    }

    fn message_loop(mut connection: rumqttc::Connection, sender: Sender<Command>, topic: &str) {
        for event in connection.iter() {
            match event {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if publish.topic == topic {
                        if let Ok(text) = String::from_utf8(publish.payload.to_vec()) {
                            if let Some(cmd) = parse_payload(&text) {
                                if sender.send(cmd).is_err() {
                                    // Main thread gone, exit
                                    break;
                                }
                            }
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("MQTT error: {}", e);
                    // Continue trying - connection may recover
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

    /// Default MQTT topic
    pub fn default_topic() -> &'static str {
        DEFAULT_TOPIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_payload() {
        assert_eq!(parse_payload("next"), Some(Command::Right));
        assert_eq!(parse_payload(" quit \n"), Some(Command::Quit));
        assert_eq!(parse_payload("demo 1"), Some(Command::Demo(1)));
    }

    #[test]
    fn test_parse_json_payload() {
        assert_eq!(parse_payload(r#"{"demo": 2}"#), Some(Command::Demo(2)));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(parse_payload(""), None);
        assert_eq!(parse_payload("{\"nope\": 1}"), None);
        assert_eq!(parse_payload("garbage"), None);
    }
}
