pub mod cipher;
pub mod storage;
