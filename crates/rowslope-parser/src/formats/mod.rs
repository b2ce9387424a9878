mod auxiliaries;
mod common;
mod originals;

pub use auxiliaries::AuxiliariesLoader;
pub use originals::OriginalsLoader;

pub(crate) use common::{read_rows, RawRow};
