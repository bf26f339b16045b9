//! About module: release facts and the documentation index
//!
//! Holds the documented release number, install command, compatibility
//! matrix and table of contents, and renders them as the index page checked
//! in at `docs/index.md`.

mod compat;
mod index;

pub use compat::{ServerVersion, VersionError, SUPPORTED_RUNTIMES, SUPPORTED_SERVER_VERSIONS};
pub use index::{
    render_index, CONTENTS, DESCRIPTION, INSTALL_COMMAND, PRODUCT, RELEASE_VERSION,
    TESTED_ENVIRONMENT,
};

#[cfg(test)]
mod tests;
