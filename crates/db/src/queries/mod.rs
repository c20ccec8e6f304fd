// crates/db/src/queries/mod.rs
// Write-side helpers for seeding the option table. The audit itself never calls these.

mod options;
