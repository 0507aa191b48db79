//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages sent to connected browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// Full page reload
    Reload,

    /// The topic document no longer parses; the page keeps its navigation
    TopicsInvalid {
        /// Parse error
        message: String,
    },

    /// Connection established
    Connected,
}

/// Hub for broadcasting reload messages to all connected clients.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: ReloadMessage) {
        // No receivers is fine
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side live reload script.
///
/// Connects to `path` on the page's own host, so it works behind any
/// bind address.
pub fn reload_client_script(path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '{}');
  let reconnectAttempts = 0;
  const maxReconnectAttempts = 10;

  ws.onopen = function() {{
    console.log('[reload] Connected');
    reconnectAttempts = 0;
  }};

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);

    switch (msg.type) {{
      case 'reload':
        location.reload();
        break;

      case 'topics_invalid':
        console.error('[reload] topics.json is invalid:', msg.message);
        break;

      case 'connected':
        console.log('[reload] Server acknowledged connection');
        break;
    }}
  }};

  ws.onclose = function() {{
    console.log('[reload] Disconnected');
    if (reconnectAttempts < maxReconnectAttempts) {{
      reconnectAttempts++;
      setTimeout(function() {{
        location.reload();
      }}, 1000 * reconnectAttempts);
    }}
  }};
}})();
"#,
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_broadcasts_messages() {
        let hub = ReloadHub::new();
        let mut rx = hub.subscribe();

        hub.send(ReloadMessage::Reload);

        match rx.try_recv() {
            Ok(ReloadMessage::Reload) => {}
            other => panic!("Expected Reload message, got {:?}", other),
        }
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn send_without_subscribers_is_ignored() {
        let hub = ReloadHub::new();
        hub.send(ReloadMessage::Connected);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn serializes_messages() {
        let msg = ReloadMessage::TopicsInvalid {
            message: "expected `,` at line 3".to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains(r#""type":"topics_invalid""#));
        assert!(json.contains("line 3"));
        assert_eq!(serde_json::from_str::<ReloadMessage>(&json).unwrap(), msg);
    }

    #[test]
    fn client_script_uses_page_host() {
        let script = reload_client_script("/__reload");
        assert!(script.contains("location.host + '/__reload'"));
        assert!(script.contains("topics_invalid"));
    }
}
