pub mod list;

pub use list::list_routes;
