extern crate bincode;
extern crate bitvec;
extern crate kdam;
extern crate petgraph;
extern crate serde;
extern crate serde_json;
extern crate substring;
extern crate tempfile;

pub mod dawg;
pub mod evaluator;
pub mod graph;
pub mod lms;
pub mod stat_utils;
pub mod tokenize;
pub mod weight;
