pub mod companies;
pub mod documents;
pub mod links;
pub mod orders;
pub mod professions;
pub mod users;
