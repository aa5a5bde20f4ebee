pub mod defs;
pub mod timestamp;

pub use defs::Category;
pub use defs::Institution;
pub use defs::ItemType;
pub use defs::NormalizedItem;
pub use defs::Status;
pub use defs::VoteResult;
