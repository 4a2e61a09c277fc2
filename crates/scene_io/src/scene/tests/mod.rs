//! Scenario tests across paths, handles, backends and the registry

mod navigation;
mod mode_gating;
mod end_to_end;
