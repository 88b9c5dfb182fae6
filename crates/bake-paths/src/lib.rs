//! Output path handling for baked particle assets.
//!
//! Saving a bake never overwrites an earlier one. Before a mesh or image is
//! written, the desired path is passed through a [`UniquePathResolver`], which
//! returns the path unchanged when it is free, or the first free variant with
//! a parenthesized counter inserted before the extension:
//!
//! ```text
//! Assets/Tex.png        (free)          -> Assets/Tex.png
//! Assets/Tex.png        (taken)         -> Assets/Tex (1).png
//! Assets/Tex (1).png    (also taken)    -> Assets/Tex (2).png
//! ```
//!
//! Existence checks go through the [`FileSystem`] trait so the resolver can run
//! against the real disk ([`StdFileSystem`]) or an in-memory set of paths
//! ([`MemoryFileSystem`]).
//!
//! # Examples
//!
//! ```
//! use bake_paths::{MemoryFileSystem, UniquePathResolver};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::with_files(["Assets/Tex.png"]);
//! let resolver = UniquePathResolver::new(fs);
//!
//! let path = resolver.resolve(Path::new("Assets/Tex.png")).unwrap();
//! assert_eq!(path, Path::new("Assets/Tex (1).png"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod dirs;
pub mod error;
pub mod fs;
pub mod resolver;

pub use dirs::ensure_directory_exists;
pub use error::{PathError, Result};
pub use fs::{FileSystem, MemoryFileSystem, StdFileSystem};
pub use resolver::{UniquePathResolver, unique_path};
