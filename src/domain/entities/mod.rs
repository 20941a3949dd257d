pub mod mapping;

pub use mapping::{NewMapping, UrlMapping};
