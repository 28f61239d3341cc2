mod route;
mod search;

pub use route::route;
pub use search::search;
