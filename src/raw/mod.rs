mod node;
mod raw_treap;
mod size;

pub(crate) use node::Node;
pub(crate) use raw_treap::RawTreap;
