//! Command line interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::RedirectorConfig;

/// Redirect requests according to a spreadsheet of rules
#[derive(Parser, Debug)]
#[command(name = "redirector", version, about)]
pub struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Socket address to listen on, e.g. 0.0.0.0:3000
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Spreadsheet holding the redirect rules
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Sheet holding the rules (defaults to the first sheet)
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply command line overrides on top of file configuration.
    pub fn apply(&self, config: &mut RedirectorConfig) {
        if let Some(listen) = &self.listen {
            config.listener.bind_address = listen.clone();
        }
        if let Some(rules) = &self.rules {
            config.source.path = rules.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.source.sheet = Some(sheet.clone());
        }
        match self.verbose {
            0 => {}
            1 => config.observability.log_level = "debug".to_string(),
            _ => config.observability.log_level = "trace".to_string(),
        }
    }
}
