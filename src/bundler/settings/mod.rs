//! Configuration structures for packaging operations.
//!
//! This module provides the two immutable inputs of a packaging run: the
//! per-destination [`Target`] and the application-level
//! [`PackagingRequest`], plus the closed OS/architecture/format enums they
//! are built from.

mod arch;
mod builder;
mod os;
mod package;
mod package_type;
mod target;

// Re-export all public types
pub use arch::Arch;
pub use builder::PackagingRequestBuilder;
pub use os::OperatingSystem;
pub use package::PackagingRequest;
pub use package_type::PackageType;
pub use target::{Target, TargetBuilder};
pub(crate) use target::is_path_segment;
