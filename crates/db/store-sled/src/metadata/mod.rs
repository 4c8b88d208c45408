mod db;
mod schemas;

pub use db::MetadataDBSled;
