pub mod get_tree;
