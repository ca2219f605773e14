pub(crate) mod borders;
pub(crate) mod metrics;
pub(crate) mod store;
pub(crate) mod variant;
