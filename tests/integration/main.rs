//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a behaviour profile
//! against mock adapters.  All tests run on the host with no real
//! hardware required.

mod mock_hw;
mod roam_tests;
mod seek_tests;
mod sim_tests;
