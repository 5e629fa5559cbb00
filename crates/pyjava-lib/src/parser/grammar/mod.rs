//! Grammar productions for PyJava.
//!
//! Every `parse_*` method is an extension of `Parser`. Productions return owned
//! syntax tree nodes; option-driven alternatives are ordinary conditionals on
//! `self.options`.

mod atoms;
mod blocks;
mod compound;
mod expressions;
mod headers;
mod lambdas;
mod patterns;
mod statements;
