use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;

use crate::message::{Message, MessageType};


/// Something a chat command can be routed to.
pub trait Route: Send + Sync {
    fn call(&self, args: &[&str]) -> Result<()>;

    /// Routes that report `false` are skipped by dispatch without an error.
    fn is_invocable(&self) -> bool {
        true
    }
}

impl<F> Route for F
where
    F: Fn(&[&str]) -> Result<()> + Send + Sync,
{
    fn call(&self, args: &[&str]) -> Result<()> {
        self(args)
    }
}

/// Command name -> route mapping shared between its owner and any routers
/// configured with it. Clones are handles to the same table, so changes made
/// by the owner are visible to the routers on their next dispatch.
#[derive(Clone, Default)]
pub struct RouteTable(Arc<RwLock<HashMap<String, Arc<dyn Route>>>>);

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(self, name: impl Into<String>, route: impl Route + 'static) -> Self {
        self.insert(name, route);
        self
    }

    pub fn insert(&self, name: impl Into<String>, route: impl Route + 'static) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), Arc::new(route));
    }

    pub fn remove(&self, name: &str) -> bool {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Route>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
pub struct Router {
    prefix: String,
    routes: RouteTable,
}

impl Router {
    pub fn configure(prefix: impl Into<String>, routes: RouteTable) -> Self {
        Self {
            prefix: prefix.into(),
            routes,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Routes a single chat message.
    ///
    /// Messages that are not commands for this router, unknown commands and
    /// routes that cannot be invoked all end in `Ok(())` without side effects.
    /// Only a failing route produces an error.
    pub fn handle(&self, message: &Message) -> Result<()> {
        if !is_command(&self.prefix, message) {
            return Ok(());
        }
        let command = parse_command(&self.prefix, message);
        let args = parse_input(message);
        self.execute(&command, &args)
    }

    fn execute(&self, command: &str, args: &[&str]) -> Result<()> {
        match self.routes.get(command) {
            Some(route) if route.is_invocable() => route.call(args),
            _ => Ok(()),
        }
    }

    /// Turns the router into a callback suitable for host event registration.
    pub fn into_handler(self) -> impl Fn(&Message) -> Result<()> + Send + Sync + 'static {
        move |message: &Message| self.handle(message)
    }
}

pub fn configure(
    prefix: impl Into<String>,
    routes: RouteTable,
) -> impl Fn(&Message) -> Result<()> + Send + Sync + 'static {
    Router::configure(prefix, routes).into_handler()
}

/// True for API messages starting with `prefix`, compared case-sensitively.
pub fn is_command(prefix: &str, message: &Message) -> bool {
    message.kind == MessageType::Api && message.content.starts_with(prefix)
}

/// Command word of a message already accepted by [`is_command`], without the
/// prefix and lowercased.
pub fn parse_command(prefix: &str, message: &Message) -> String {
    let token = message.content.split(' ').next().unwrap_or_default();
    token
        .strip_prefix(prefix)
        .unwrap_or(token)
        .to_lowercase()
}

/// Everything after the first whitespace-separated token.
///
/// Runs of whitespace count as one separator. Content ending in whitespace
/// yields a trailing empty argument.
pub fn parse_input(message: &Message) -> Vec<&str> {
    let pieces: Vec<&str> = message.content.split(char::is_whitespace).collect();
    let last = pieces.len() - 1;
    pieces
        .into_iter()
        .enumerate()
        .filter(|(i, piece)| !piece.is_empty() || *i == 0 || *i == last)
        .skip(1)
        .map(|(_, piece)| piece)
        .collect()
}
