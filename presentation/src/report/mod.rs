//! Benchmark report rendering

pub mod html;

pub use html::HtmlDashboard;
