#![no_std]

pub mod config;
pub mod console;
pub mod devices;
