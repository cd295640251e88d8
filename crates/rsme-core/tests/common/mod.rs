#![allow(dead_code)]

pub mod static_server;
