//! Core functionality for documents, hashing, storage and configuration

pub mod config;
pub mod document;
pub mod file_system;
pub mod hash;
pub mod registry;
pub mod storage;
