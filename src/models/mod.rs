pub mod movie;
pub mod records;

pub use movie::{Genre, Movie, MovieSummary, ProductionCompany};
pub use records::{SavedRecord, SavedRecordData, SearchRecord, SearchRecordData};
