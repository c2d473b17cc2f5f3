mod loader;

pub use loader::{LoadError, builtin_questions, builtin_supporters, load_questions};
