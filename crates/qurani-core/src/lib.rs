pub mod category;
pub mod error;
pub mod navigator;
pub mod position;
pub mod reference;
pub mod render;
pub mod state;
pub mod store;
pub mod verse;

// Re-export main types for convenience
pub use category::Category;
pub use error::{LookupMiss, NavError, Result};
pub use navigator::{Located, NavigationState, Navigator, RangeBound, Restored, Selection};
pub use position::{PositionIndex, Span};
pub use reference::{parse_reference, Reference};
pub use render::{render, RenderOptions, Rendered, INVOCATION};
pub use state::SavedPosition;
pub use store::{ChapterSpan, SqliteStore, VerseStore};
pub use verse::{Verse, VerseMetadata};
