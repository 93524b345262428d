//! Proximity linking and flow compensation for overlapping 2D wall toolpaths.
//!
//! When two wall lines of a sliced model lie closer together than one line
//! width, extruding the nominal amount of material on both produces a visible
//! blob of over-extrusion. This crate detects such close approaches between
//! polygon edges ([ProximityLinker][linker::ProximityLinker]) and computes,
//! for each directed wall edge, a flow multiplier in `[0, 1]` that compensates
//! for the locally overlapping material ([OverlapFlow][flow::OverlapFlow]).
//!
//! Coordinates are 64-bit fixed point (micrometres in the slicing context).

#[macro_use]
mod macros;
pub mod core;
pub mod error;
pub mod flow;
pub mod linker;
pub mod polygon;
