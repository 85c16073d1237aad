//! Typed view of a glTF document.
//!
//! Only the fields the packer touches are modelled; everything else in
//! the document (and inside each record) is carried through untouched in
//! a flattened map, so the rewritten JSON keeps meshes, accessors,
//! materials and any extensions byte-for-byte equivalent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The document root. `buffers` and `bufferViews` are required; parsing
/// fails fast when either array is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gltf {
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shaders: Option<Vec<Shader>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub byte_length: u64,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A window (offset + length) into one of the document's buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<u64>,
    pub byte_length: u64,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl BufferView {
    /// A view over the consolidated buffer, as created for embedded
    /// images and shaders.
    pub fn embedded(byte_offset: u64, byte_length: u64) -> Self {
        Self {
            buffer: 0,
            byte_offset: Some(byte_offset),
            byte_length,
            rest: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}
