//! Documentation index page

use super::compat::{SUPPORTED_RUNTIMES, SUPPORTED_SERVER_VERSIONS};

pub const PRODUCT: &str = "py2neo";

pub const RELEASE_VERSION: &str = "3.0.3";

pub const INSTALL_COMMAND: &str = "pip install py2neo";

pub const DESCRIPTION: &str = "A client library and comprehensive toolkit for working with Neo4j \
from within applications and from the command line.";

/// The one environment the release is tested on
pub const TESTED_ENVIRONMENT: &str = "Ubuntu Linux with the reference CPython interpreter";

/// Documentation chapters, in reading order
pub const CONTENTS: [&str; 16] = [
    "intro",
    "essentials",
    "cypher",
    "schema",
    "internals",
    "server",
    "store",
    "batch",
    "legacy",
    "ext/calendar",
    "ext/geoff",
    "ext/gremlin",
    "ext/neobox",
    "ext/ogm",
    "ext/spatial",
    "cookbook",
];

/// Render the index page as markdown
#[must_use]
pub fn render_index() -> String {
    let runtimes = SUPPORTED_RUNTIMES.join(", ");
    let servers = SUPPORTED_SERVER_VERSIONS
        .iter()
        .map(|(major, minor)| format!("{major}.{minor}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("# {PRODUCT} {RELEASE_VERSION}"),
        String::new(),
        DESCRIPTION.to_string(),
        String::new(),
        "## Installation".to_string(),
        String::new(),
        format!("    {INSTALL_COMMAND}"),
        String::new(),
        "## Requirements".to_string(),
        String::new(),
        format!("- Python {runtimes}"),
        format!("- Neo4j {servers} (the latest point release of each version is recommended)"),
        String::new(),
        format!(
            "Release {RELEASE_VERSION} is tested on {TESTED_ENVIRONMENT}. \
             Other environments may work but are not supported."
        ),
        String::new(),
        "## Contents".to_string(),
        String::new(),
    ];
    lines.extend(
        CONTENTS
            .iter()
            .map(|chapter| format!("- [{chapter}]({chapter}.md)")),
    );

    let mut page = lines.join("\n");
    page.push('\n');
    page
}
