//! Structural editing of Jenkins `config.xml` documents.
//!
//! Everything here is synchronous and free of I/O: parse the text, run
//! editors against the tree, serialize it back. `encoding` converts between
//! raw bytes and text in the charset the declaration names.

pub mod document;
pub mod editors;
pub mod encoding;
pub mod error;
pub mod job_builder;
pub mod locator;
pub mod plugin_settings;
pub mod serializer;

pub use document::{ConfigDocument, NodeId, NodeKind, XmlDeclaration};
pub use error::ConfigEditError;
pub use locator::ConfigPath;
pub use serializer::to_xml_string;
