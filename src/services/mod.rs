pub mod chapterizer;
pub mod cleaner;
pub mod markup;
pub mod noise;
pub mod paginator;
