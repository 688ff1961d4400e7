pub mod client;
pub mod enchere;
pub mod image;
pub mod lot;
pub mod participation;
