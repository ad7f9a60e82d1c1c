pub mod adapter;
pub mod lifi;
pub mod one_inch;
pub mod proxy;
