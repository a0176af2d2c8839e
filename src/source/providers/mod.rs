pub mod wikipedia;

pub use wikipedia::WikipediaSource;
