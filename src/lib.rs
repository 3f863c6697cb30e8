// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod bank;
pub mod quiz;
pub mod runtime;
pub mod share;
pub mod sign;
