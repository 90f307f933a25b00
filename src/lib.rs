//! Core library for the takeoff-export command line application.
//!
//! The library exposes the pieces that power the command-line interface as
//! well as the tests. The modules are structured to keep responsibilities
//! narrow and composable: the schedule source abstraction lives in
//! [`document`], the in-memory workbook model in [`grid`], the "Dim - "
//! quantity-takeoff transformation in [`transform`], the summary sheet
//! builder in [`aggregate`], the IO adapters under [`io`], and the export
//! orchestration in [`export`].

pub mod aggregate;
pub mod columns;
pub mod document;
pub mod error;
pub mod export;
pub mod grid;
pub mod io;
pub mod naming;
pub mod transform;

pub use error::{ExportError, Result};
