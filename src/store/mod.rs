pub mod sqlite;

use crate::app::Result;
use crate::domain::Status;

pub use sqlite::SqliteStore;

/// Process-wide status cache shared by every feed.
///
/// Entries are keyed by `(status id, instance)`; saving the same status twice
/// replaces the stored copy.
pub trait StatusStore: Send + Sync {
    fn save_status(&self, status: &Status, instance: &str) -> Result<()>;
    fn get_status(&self, id: &str, instance: &str) -> Result<Option<Status>>;
    fn status_count(&self) -> Result<usize>;
}
