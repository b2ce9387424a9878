use crate::errors::LoadError;
use crate::formats::{AuxiliariesLoader, OriginalsLoader};
use crate::model::{AuxiliaryPoint, OriginalPoint, ParsedTable};
use crate::naming::DEFAULT_NAME_DELIMITER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    pub name_delimiter: char,
    pub field_delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            name_delimiter: DEFAULT_NAME_DELIMITER,
            field_delimiter: b',',
        }
    }
}

pub trait TableLoader {
    type Row;

    fn name(&self) -> &'static str;
    fn parse(&self, content: &[u8]) -> Result<ParsedTable<Self::Row>, LoadError>;
}

pub fn load_originals(
    content: &[u8],
    options: LoaderOptions,
) -> Result<ParsedTable<OriginalPoint>, LoadError> {
    OriginalsLoader::new(options).parse(content)
}

pub fn load_auxiliaries(
    content: &[u8],
    options: LoaderOptions,
) -> Result<ParsedTable<AuxiliaryPoint>, LoadError> {
    AuxiliariesLoader::new(options).parse(content)
}
