//! C++ source emission shared by every generator.

pub mod cpp;

pub use cpp::{join_lines, CppWriter, Escaped};
