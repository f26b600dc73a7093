pub mod pages;

pub use pages::{Page, PageLoad, PageLoader};
