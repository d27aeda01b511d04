pub mod db;
pub mod file;

pub use db::DbBlobAdapter;
pub use file::FileBlobAdapter;
