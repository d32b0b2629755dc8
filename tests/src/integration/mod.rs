//! Cross-tier integration flows.

mod persistence;
mod relay_flows;
