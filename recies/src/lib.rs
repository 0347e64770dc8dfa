#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]

pub mod aead;
pub mod crypto;
pub mod hybrid;
pub mod key_manager;
pub mod key_template;
pub mod utilities;
