//! Aged-file cleanup for dirsift.
//!
//! Composes the walker and the age partition into a best-effort
//! delete: enumerate, filter by age, delete each candidate, report
//! counts. One failed deletion never stops the rest, and nothing is
//! retried.

mod cleanup;

pub use cleanup::{CleanupConfig, CleanupConfigBuilder, CleanupReport, cleanup, old_files};
