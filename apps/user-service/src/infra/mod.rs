pub mod db;
pub mod db_errors;
pub mod schema;

pub use db::connect_db;
pub use schema::ensure_schema;
