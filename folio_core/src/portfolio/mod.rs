pub mod dto;
pub mod storage;
pub mod valuation;
