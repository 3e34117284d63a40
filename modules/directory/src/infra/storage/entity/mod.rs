pub mod companies;
pub mod documents;
pub mod orders;
pub mod professions;
pub mod user_company_links;
pub mod users;
