mod common;
mod forensic;
mod service;
