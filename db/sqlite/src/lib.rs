pub mod db;
pub mod model;
mod query;
