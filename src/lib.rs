//! Job Search Library
//!
//! Collects job postings from French listing sites, scores them against
//! keyword and contract rules, and ranks the survivors.

pub mod delay_manager;
pub mod filter;
pub mod js_detector;
pub mod logger;
pub mod normalize;
pub mod patterns;
pub mod rules;
pub mod run_log;
pub mod scrapers;
pub mod search;
pub mod sorter;
pub mod storage;
pub mod types;

pub use rules::{RuleConfig, RuleSet};
pub use search::run_search;
pub use types::*;
