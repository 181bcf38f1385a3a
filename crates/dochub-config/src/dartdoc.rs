//! `[dartdoc]` section: the optional external generator command.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DartdocConfig {
    /// Generator argv, run with the repository root as working directory.
    /// Empty means the docs are produced outside dochub.
    #[serde(default)]
    pub command: Vec<String>,
}

impl DartdocConfig {
    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }

    /// Program and arguments, if a command is configured.
    pub fn program(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(program, args)| (program.as_str(), args))
    }
}
