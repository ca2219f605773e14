pub(crate) mod key;
pub(crate) mod store;
pub(crate) mod write_back;
