//! Browser-side implementations of the domain ports.

pub mod broadcast;
pub mod dto;
pub mod http;
pub mod services;
pub mod spawn;
pub mod storage;
