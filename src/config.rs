use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;
use crate::program_route::ProgramRoute;
use crate::router::RouteTable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Marks a chat message as a command for this router. Matched
    /// case-sensitively at the start of the message.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Command name (without prefix, lowercase) -> program to run.
    #[serde(default = "default_routes")]
    pub routes: HashMap<String, ProgramRoute>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_prefix() -> String {
    "!alal-".into()
}

fn default_routes() -> HashMap<String, ProgramRoute> {
    [(
        String::from("gather"),
        ProgramRoute::new("echo", ["gathering"]),
    )]
    .into_iter()
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            routes: default_routes(),
            logging: Default::default(),
        }
    }
}

impl Config {
    pub fn route_table(&self) -> RouteTable {
        let table = RouteTable::new();
        for (name, route) in &self.routes {
            table.insert(name.clone(), route.clone());
        }
        table
    }
}
