pub mod locate;
pub mod table;

pub use table::default_district;
