pub mod cell;
pub mod notebook_file;

pub use cell::{Cell, CellKind};
pub use notebook_file::NotebookFile;
