mod resolver;

pub use resolver::{PathError, PathResolver, ResolvedPath};
