pub mod config;
pub mod host;
pub mod logging;
pub mod message;
pub mod program_route;
pub mod router;
pub mod store;
pub mod utils;

pub use host::EventHost;
pub use message::{Message, MessageType};
pub use router::{configure, Route, RouteTable, Router};
