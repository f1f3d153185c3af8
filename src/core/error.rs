//! Error taxonomy for the listing pipeline.
//!
//! Every fallible pipeline step returns a [ListError]. The renderer is the only place
//! that turns these into messages on the error stream; nothing here is fatal on its own.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    /// The directory could not be opened for enumeration.
    #[error("cannot open directory '{}': {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stat of a single entry failed (vanished, broken, or no permission).
    #[error("cannot access '{}': {source}", .path.display())]
    MetadataFetch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
