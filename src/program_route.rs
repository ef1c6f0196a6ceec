use anyhow::{bail, Context as _, Result};
use itertools::Itertools as _;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::router::Route;

/// Route that runs an external program. Arguments from the chat message are
/// appended after the configured ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRoute {
    #[serde(default)]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl ProgramRoute {
    pub fn new<S: Into<String>>(
        program: impl Into<String>,
        args: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command_line<'a>(&'a self, args: &'a [&'a str]) -> Vec<&'a str> {
        self.args
            .iter()
            .map(String::as_str)
            .chain(args.iter().copied())
            .collect()
    }
}

impl Route for ProgramRoute {
    fn call(&self, args: &[&str]) -> Result<()> {
        let command_line = self.command_line(args);
        info!("Running: {} {}", self.program, command_line.iter().join(" "));
        let output = duct::cmd(self.program.as_str(), command_line)
            .unchecked()
            .run()
            .with_context(|| format!("Failed to start {}", self.program))?;
        debug!("{} exited with {}", self.program, output.status);
        if !output.status.success() {
            bail!("{} exited with {}", self.program, output.status);
        }
        Ok(())
    }

    fn is_invocable(&self) -> bool {
        !self.program.trim().is_empty()
    }
}
