pub(crate) mod compositor;
pub(crate) mod mask;
pub(crate) mod overlay;
pub(crate) mod pixmap;
