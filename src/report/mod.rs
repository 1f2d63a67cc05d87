//! Top-word selection and chart rendering.

mod chart;
mod render;

pub use chart::{top_words, Bar, ChartSpec};
pub use render::{ChartRenderer, SvgRenderer, TerminalRenderer};
