//! Data models for the preprint source, Semantic Scholar and SeeChat.
//!
//! Wire models use `#[serde(default)]` for optional fields and rename
//! to match each API's naming.

mod author;
mod hypothesis;
mod preprint;

pub use author::{AuthorInfluence, AuthorRef, PaperAuthors};
pub use hypothesis::{CreateHypothesis, EditHypothesis, StreamEvent};
pub use preprint::{DateRange, DetailsPage, FetchCursor, PageMessage, Pagination, PaperRecord};
