#![allow(dead_code)]

pub mod fakes;
pub mod http_stub;
pub mod sheetdigest_env;
