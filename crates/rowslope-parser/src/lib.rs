pub mod errors;
pub mod formats;
pub mod model;
pub mod naming;
mod registry;

pub use errors::LoadError;
pub use model::{AuxiliaryPoint, OriginalPoint, ParsedTable};
pub use naming::{
    is_pile_code, parse_auxiliary_name, parse_original_name, pile_index, ParsedName,
    DEFAULT_NAME_DELIMITER,
};
pub use registry::{load_auxiliaries, load_originals, LoaderOptions, TableLoader};

#[cfg(test)]
mod tests;
