pub mod dto;
pub mod password;
pub mod storage;
