pub mod collection;
pub mod storage;
