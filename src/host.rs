use anyhow::{Context as _, Result};
use log::{debug, info};

use crate::message::Message;
use crate::utils::ResultExt as _;

type ReadyCallback = Box<dyn Fn() + Send + Sync>;
type ChatCallback = Box<dyn Fn(&Message) -> Result<()> + Send + Sync>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logs the one-line startup notice. Meant to be registered with
/// [`EventHost::on_ready`].
pub fn announce_version() {
    info!("{}", version_line());
}

pub fn version_line() -> String {
    format!("[API Router] v{VERSION} loaded.")
}

/// Minimal chat event loop: lifecycle and chat message subscriptions,
/// delivered synchronously in registration order.
#[derive(Default)]
pub struct EventHost {
    ready: Vec<ReadyCallback>,
    chat: Vec<ChatCallback>,
    delivered: usize,
}

impl EventHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_ready(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.ready.push(Box::new(callback));
    }

    pub fn on_chat_message(
        &mut self,
        callback: impl Fn(&Message) -> Result<()> + Send + Sync + 'static,
    ) {
        self.chat.push(Box::new(callback));
    }

    pub fn ready(&self) {
        debug!("Host ready, notifying {} subscriber(s)", self.ready.len());
        for callback in &self.ready {
            callback();
        }
    }

    /// Passes the message to every chat subscriber. A failing subscriber is
    /// logged and does not keep the message from the others.
    pub fn deliver(&mut self, message: &Message) {
        self.delivered += 1;
        for callback in &self.chat {
            callback(message)
                .with_context(|| {
                    format!("Handling {} message {:?}", message.kind, message.content)
                })
                .print_err();
        }
    }

    /// Parses a JSON encoded message and delivers it.
    pub fn deliver_json(&mut self, line: &str) -> Result<()> {
        let message: Message =
            serde_json::from_str(line).with_context(|| format!("Malformed message: {line}"))?;
        self.deliver(&message);
        Ok(())
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use anyhow::bail;

    use super::*;
    use crate::router::{self, RouteTable};

    #[test]
    fn version_line_uses_package_version() {
        assert_eq!(
            version_line(),
            format!("[API Router] v{} loaded.", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn ready_runs_every_subscriber() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut host = EventHost::new();
        for _ in 0..2 {
            let count = count.clone();
            host.on_ready(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        host.ready();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_subscriber_does_not_stop_delivery() {
        let _ = env_logger::builder().is_test(true).try_init();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut host = EventHost::new();
        host.on_chat_message(|_: &Message| -> Result<()> { bail!("subscriber failed") });
        host.on_chat_message({
            let seen = seen.clone();
            move |m: &Message| -> Result<()> {
                seen.lock().unwrap().push(m.content.clone());
                Ok(())
            }
        });

        host.deliver(&Message::api("!alal-gather"));

        assert_eq!(*seen.lock().unwrap(), vec!["!alal-gather".to_string()]);
        assert_eq!(host.delivered(), 1);
    }

    #[test]
    fn routes_json_messages_through_router() {
        let harvested = Arc::new(Mutex::new(Vec::new()));
        let routes = RouteTable::new().with_route("harvest", {
            let harvested = harvested.clone();
            move |args: &[&str]| -> Result<()> {
                harvested
                    .lock()
                    .unwrap()
                    .extend(args.iter().map(|a| a.to_string()));
                Ok(())
            }
        });
        let mut host = EventHost::new();
        host.on_chat_message(router::configure("!alal-", routes));

        host.deliver_json(r#"{"type": "api", "content": "!alal-harvest herb1 herb2"}"#)
            .unwrap();
        host.deliver_json(r#"{"type": "general", "content": "!alal-harvest herb3"}"#)
            .unwrap();

        assert_eq!(*harvested.lock().unwrap(), vec!["herb1", "herb2"]);
        assert_eq!(host.delivered(), 2);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let mut host = EventHost::new();
        assert!(host.deliver_json("{not json").is_err());
        assert_eq!(host.delivered(), 0);
    }
}
