mod filter;

pub use filter::AttributeFilter;
