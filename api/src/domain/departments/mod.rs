pub mod department;

pub use department::{DepartmentNode, DepartmentRow, build_tree};
