// Career-sheet profiles: storage of the career history the timeline renders.
// Edits are copy-on-write so layout always sees a consistent snapshot.

pub mod handlers;
pub mod store;

pub use store::{InMemoryProfileStore, ProfileStore};
