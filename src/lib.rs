//! Convert glTF documents into self-contained GLB containers.
//!
//! All buffer, image and shader payloads (external files or base64 data
//! URIs) are consolidated into the GLB's single binary chunk, with the
//! document's buffer views rewritten to point at their new offsets.

pub mod convert;
pub mod document;
pub mod error;
pub mod fs;
pub mod mime;

pub use convert::{convert_gltf_to_glb, convert_to_glb, pack_glb};
pub use error::ConvertError;
pub use fs::{FileSystem, MemoryFs, StdFs};

pub mod prelude {
    pub use crate::convert::{convert_gltf_to_glb, convert_to_glb, pack_glb};
    pub use crate::fs::{FileSystem, StdFs};
}
