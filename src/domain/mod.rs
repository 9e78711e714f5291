pub mod conversation;
pub mod item;
pub mod notification;
pub mod status;

pub use conversation::Conversation;
pub use item::{Item, RawEntry, SourceKind};
pub use notification::{Notification, NotificationType};
pub use status::{Account, Status, Visibility};
