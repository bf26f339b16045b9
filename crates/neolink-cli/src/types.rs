//! Command types shared between main and library

use clap::{Args, Parser, Subcommand};
use neolink_core::driver::DriverConfig;

#[derive(Parser, Debug)]
#[command(name = "neolink")]
#[command(author, version, about = "Neo4j client over the Bolt protocol", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a Cypher statement and print its records
    Run {
        /// Cypher statement to execute
        statement: String,

        /// Statement parameter as name=<json>
        #[arg(long = "param", value_name = "NAME=JSON")]
        params: Vec<String>,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Create a node and print it
    CreateNode {
        /// Label to give the node
        #[arg(long = "label")]
        labels: Vec<String>,

        /// Property as name=<json>
        #[arg(long = "prop", value_name = "NAME=JSON")]
        props: Vec<String>,

        /// Print the created node as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Show release and compatibility information
    About,
}

/// Server connection flags
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Bolt connection URI
    #[arg(long, default_value = "bolt://localhost:7687")]
    pub uri: String,

    /// Username
    #[arg(long, default_value = "neo4j")]
    pub user: String,

    /// Password; no credentials are sent when omitted
    #[arg(long)]
    pub password: Option<String>,

    /// Request an encrypted connection
    #[arg(long)]
    pub secure: bool,
}

impl ConnectionArgs {
    #[must_use]
    pub fn config(&self) -> DriverConfig {
        let config = DriverConfig::new(&self.uri).with_secure(self.secure);
        match &self.password {
            Some(password) => config.with_auth(&self.user, password),
            None => config,
        }
    }
}
