pub mod audit;
pub mod case;
pub mod consultation;
pub mod dispatch;
pub mod document;
pub mod party;
pub mod shared;
