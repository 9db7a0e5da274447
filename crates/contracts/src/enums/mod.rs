pub mod month;

pub use month::Month;
