//! Turns loosely structured story submissions into an ordered chapter model
//! and renders any page of it on demand.
//!
//! The engine is a set of pure functions: [`process`] builds a
//! [`ProcessedContent`] from raw text, [`get_page`] slices one page out of it
//! and [`to_markup`] renders the whole thing. None of them keep state.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use models::{Chapter, ContentFormat, PageSlice, ProcessedContent};
pub use services::chapterizer::process;
pub use services::markup::to_markup;
pub use services::paginator::{DEFAULT_WORDS_PER_PAGE, ParagraphMode, get_page, get_page_with};
