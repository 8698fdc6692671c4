pub mod dto;
pub mod jwt;
