pub mod companies;
pub mod company_domains;
pub mod domains;
pub mod dynamic_tables;
mod enums;
pub mod questions;
pub mod submissions;
pub mod table_info_links;
pub mod table_infos;
pub mod topics;
pub mod users;

pub use enums::*;
