pub mod checklist;
pub mod config;
pub mod extraction;
pub mod oracle;
pub mod report;
pub mod resolve;
pub mod suggest;
