//! glTF to GLB conversion.
//!
//! Resolves every buffer, image and shader reference (external file or
//! base64 data URI) to raw bytes, consolidates the bytes into a single
//! binary region, rewrites the document's buffer views to point into
//! that region, and emits the result as one GLB container.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;

use crate::document::{Buffer, BufferView, Gltf};
use crate::error::{ConvertError, Result};
use crate::fs::FileSystem;
use crate::mime::guess_mime_type;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// Raw payload bytes plus the content type they resolved with.
#[derive(Debug)]
struct ResolvedResource {
    bytes: Vec<u8>,
    mime_type: String,
}

/// Round `n` up to the next multiple of 4.
fn aligned_length(n: usize) -> usize {
    match n % 4 {
        0 => n,
        rem => n + (4 - rem),
    }
}

/// Resolve a relative resource uri against the source document's path by
/// replacing the source's final path segment.
fn resolve_path(base: &Path, uri: &str) -> PathBuf {
    match base.parent() {
        Some(parent) => parent.join(uri),
        None => PathBuf::from(uri),
    }
}

/// Resolve a resource reference to its raw bytes and content type.
///
/// Returns `Ok(None)` when there is no `uri` at all: the resource has no
/// embeddable data. A `data:` uri must carry a `;`-delimited content
/// type before its payload; one without it is rejected rather than
/// guessed at.
fn resolve(
    uri: Option<&str>,
    base_path: &Path,
    fs: &dyn FileSystem,
) -> Result<Option<ResolvedResource>> {
    let Some(uri) = uri else {
        return Ok(None);
    };

    if let Some(rest) = uri.strip_prefix("data:") {
        let malformed = || ConvertError::MalformedDataUri {
            uri: uri.to_string(),
        };
        let comma = rest.find(',').ok_or_else(malformed)?;
        let semi = rest.find(';').filter(|semi| *semi < comma).ok_or_else(malformed)?;

        let bytes = STANDARD
            .decode(&rest[comma + 1..])
            .map_err(|source| ConvertError::Base64 {
                uri: uri.to_string(),
                source,
            })?;
        return Ok(Some(ResolvedResource {
            bytes,
            mime_type: rest[..semi].to_string(),
        }));
    }

    let full_path = resolve_path(base_path, uri);
    let bytes = fs
        .read(&full_path)
        .map_err(|source| ConvertError::ResourceNotFound {
            uri: uri.to_string(),
            source,
        })?;
    Ok(Some(ResolvedResource {
        mime_type: guess_mime_type(&full_path.to_string_lossy()).to_string(),
        bytes,
    }))
}

/// A payload placed in the consolidated region at a fixed offset.
struct Segment {
    offset: usize,
    bytes: Vec<u8>,
}

/// Offset bookkeeping for one packing run.
///
/// Original buffers keep their index; each subsequently embedded image
/// or shader takes the next synthetic index. Gaps between segments are
/// alignment padding and stay zero in the output.
struct Packer {
    cursor: usize,
    segments: Vec<Segment>,
    offsets: HashMap<usize, usize>,
    next_index: usize,
}

impl Packer {
    fn new() -> Self {
        Self {
            cursor: 0,
            segments: Vec::new(),
            offsets: HashMap::new(),
            next_index: 0,
        }
    }

    /// Place `bytes` at the current cursor under `index` and advance the
    /// cursor by the aligned length.
    fn place(&mut self, index: usize, bytes: Vec<u8>) -> usize {
        let offset = self.cursor;
        self.offsets.insert(index, offset);
        self.cursor += aligned_length(bytes.len());
        self.segments.push(Segment { offset, bytes });
        offset
    }

    /// Place an image or shader payload under the next synthetic index
    /// and append a view over it to `views`, returning the view's index.
    fn embed(&mut self, bytes: Vec<u8>, views: &mut Vec<BufferView>) -> usize {
        let length = bytes.len() as u64;
        let offset = self.place(self.next_index, bytes);
        self.next_index += 1;
        views.push(BufferView::embedded(offset as u64, length));
        views.len() - 1
    }
}

/// Consolidate all resolvable resources of `gltf` and assemble the GLB
/// container in memory. The document is rewritten in place.
pub fn pack_glb(gltf: &mut Gltf, source_path: &Path, fs: &dyn FileSystem) -> Result<Vec<u8>> {
    let mut packer = Packer::new();

    for (index, buffer) in gltf.buffers.iter_mut().enumerate() {
        let Some(data) = resolve(buffer.uri.as_deref(), source_path, fs)? else {
            continue;
        };
        debug!(index, len = data.bytes.len(), "embedding buffer");
        buffer.uri = None;
        buffer.byte_length = data.bytes.len() as u64;
        packer.place(index, data.bytes);
    }
    packer.next_index = gltf.buffers.len();

    for view in &mut gltf.buffer_views {
        let base = *packer
            .offsets
            .get(&view.buffer)
            .ok_or(ConvertError::UnresolvedBuffer {
                buffer: view.buffer,
            })?;
        view.byte_offset = Some(view.byte_offset.unwrap_or(0) + base as u64);
        view.buffer = 0;
    }

    if let Some(images) = gltf.images.as_mut() {
        for image in images {
            match resolve(image.uri.as_deref(), source_path, fs)? {
                None => image.uri = None,
                Some(data) => {
                    debug!(
                        mime_type = %data.mime_type,
                        len = data.bytes.len(),
                        "embedding image"
                    );
                    image.buffer_view = Some(packer.embed(data.bytes, &mut gltf.buffer_views));
                    image.mime_type = Some(data.mime_type);
                    image.uri = None;
                }
            }
        }
    }

    if let Some(shaders) = gltf.shaders.as_mut() {
        for shader in shaders {
            match resolve(shader.uri.as_deref(), source_path, fs)? {
                None => shader.uri = None,
                Some(data) => {
                    debug!(
                        mime_type = %data.mime_type,
                        len = data.bytes.len(),
                        "embedding shader"
                    );
                    shader.buffer_view = Some(packer.embed(data.bytes, &mut gltf.buffer_views));
                    shader.mime_type = Some(data.mime_type);
                    shader.uri = None;
                }
            }
        }
    }

    // All original buffers collapse into the one consolidated buffer.
    let bin_length = packer.cursor;
    gltf.buffers = vec![Buffer {
        uri: None,
        byte_length: bin_length as u64,
        rest: Default::default(),
    }];

    let json = serde_json::to_vec(&gltf).map_err(ConvertError::Serialize)?;
    let aligned_json = aligned_length(json.len());
    let total = 12 + 8 + aligned_json + 8 + bin_length;

    let mut out = vec![0u8; total];
    put_u32(&mut out, 0, GLB_MAGIC);
    put_u32(&mut out, 4, GLB_VERSION);
    put_u32(&mut out, 8, total as u32);

    put_u32(&mut out, 12, aligned_json as u32);
    put_u32(&mut out, 16, CHUNK_JSON);
    out[20..20 + json.len()].copy_from_slice(&json);
    // Trailing whitespace keeps the padded chunk valid JSON.
    out[20 + json.len()..20 + aligned_json].fill(b' ');

    let bin_header = 20 + aligned_json;
    put_u32(&mut out, bin_header, bin_length as u32);
    put_u32(&mut out, bin_header + 4, CHUNK_BIN);

    let bin_start = bin_header + 8;
    for segment in &packer.segments {
        let start = bin_start + segment.offset;
        out[start..start + segment.bytes.len()].copy_from_slice(&segment.bytes);
    }

    Ok(out)
}

/// Pack `gltf` and write the container to `output_path` in one write.
/// On any failure nothing is written.
pub fn convert_to_glb(
    gltf: &mut Gltf,
    source_path: &Path,
    output_path: &Path,
    fs: &dyn FileSystem,
) -> Result<()> {
    let glb = pack_glb(gltf, source_path, fs)?;
    fs.write(output_path, &glb)?;
    Ok(())
}

/// Read and parse the glTF at `source_path`, then convert it.
pub fn convert_gltf_to_glb(
    source_path: &Path,
    output_path: &Path,
    fs: &dyn FileSystem,
) -> Result<()> {
    let text = fs.read_to_string(source_path)?;
    let mut gltf: Gltf = serde_json::from_str(&text)?;
    convert_to_glb(&mut gltf, source_path, output_path, fs)
}

fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}
