pub mod map;
pub mod reader;

pub use map::{DocumentError, TmxDocumentLoader, TmxLoaderError, document_from_map, load_tmx_document};
pub use reader::{ParseStep, PreloadedFiles, parse_preloaded};
