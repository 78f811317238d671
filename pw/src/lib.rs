//! promptwild - wildcard placeholder resolution
//!
//! Replaces `{...}` placeholders in a template with values drawn from files
//! under a data root:
//!
//! - `{animals}` - a random non-empty line of `animals.txt`
//! - `{csv:monster:color}` - the `color` column of a random row of `monster.csv`
//!
//! All columns of one table file come from the same row within a single call,
//! so `{csv:monster:color}` and `{csv:monster:size}` always describe one
//! record. Placeholders that cannot be resolved are left untouched.
//!
//! # Layout
//!
//! ```text
//! data/
//! ├── animals.txt          # {animals}
//! ├── monster.csv          # {csv:monster:<column>}
//! └── beasts/
//!     └── dragon.csv       # {csv:beasts/dragon:<column>}
//! ```
//!
//! # Example
//!
//! ```ignore
//! use promptwild::{PathResolver, Resolver};
//!
//! let resolver = Resolver::new(PathResolver::new("data"));
//! let prompt = resolver.resolve("The {csv:monster:color} {animals} is {csv:monster:size}.");
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod lines;
pub mod paths;
pub mod placeholder;
pub mod table;

pub use catalog::Wildcard;
pub use config::Config;
pub use display::display;
pub use engine::{Resolution, ResolutionContext, Resolver, Unresolved};
pub use error::SourceError;
pub use lines::LineSample;
pub use paths::{PathResolver, ResolvedPath, SourceKind};
pub use placeholder::Placeholder;
pub use table::{SampledRow, TableSample};
