//! End-to-end conversion over real files, validated with the `gltf`
//! crate as an independent GLB reader.

use std::fs;
use std::path::Path;

use gltf2glb::{ConvertError, StdFs, convert_gltf_to_glb};

const GEOMETRY: &[u8] = &[
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
];

// Payload bytes are opaque to the converter; this only has to look like
// a file, not decode as one.
const TEXTURE: &[u8] = b"not actually a png";

fn write_scene(dir: &Path) -> std::path::PathBuf {
    fs::write(dir.join("geometry.bin"), GEOMETRY).unwrap();
    fs::write(dir.join("tex.png"), TEXTURE).unwrap();

    let scene = serde_json::json!({
        "asset": {"version": "2.0"},
        "buffers": [{"uri": "geometry.bin", "byteLength": GEOMETRY.len()}],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 6},
            {"buffer": 0, "byteOffset": 6, "byteLength": 6},
        ],
        "images": [{"uri": "tex.png"}],
    });
    let path = dir.join("scene.gltf");
    fs::write(&path, serde_json::to_vec(&scene).unwrap()).unwrap();
    path
}

#[test]
fn converts_external_resources_to_glb() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());
    let output = dir.path().join("scene.glb");

    convert_gltf_to_glb(&scene, &output, &StdFs).unwrap();

    let bytes = fs::read(&output).unwrap();
    let glb = gltf::binary::Glb::from_slice(&bytes).unwrap();
    assert_eq!(&glb.header.magic, b"glTF");
    assert_eq!(glb.header.version, 2);
    assert_eq!(glb.header.length as usize, bytes.len());

    // The container must parse and validate as glTF on its own.
    let document = gltf::Gltf::from_slice(&bytes).unwrap();
    assert_eq!(document.buffers().count(), 1);

    let bin = glb.bin.as_deref().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&glb.json).unwrap();

    // Original geometry is recoverable through the rewritten views.
    for (view, expected) in json["bufferViews"]
        .as_array()
        .unwrap()
        .iter()
        .take(2)
        .zip(GEOMETRY.chunks(6))
    {
        let offset = view["byteOffset"].as_u64().unwrap() as usize;
        let length = view["byteLength"].as_u64().unwrap() as usize;
        assert_eq!(&bin[offset..offset + length], expected);
    }

    // The image was embedded behind a fresh view with its guessed type.
    let image = &json["images"][0];
    assert_eq!(image["mimeType"], "image/png");
    assert_eq!(image.get("uri"), None);
    let view = &json["bufferViews"][image["bufferView"].as_u64().unwrap() as usize];
    let offset = view["byteOffset"].as_u64().unwrap() as usize;
    let length = view["byteLength"].as_u64().unwrap() as usize;
    assert_eq!(&bin[offset..offset + length], TEXTURE);
}

#[test]
fn missing_resource_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let scene = serde_json::json!({
        "asset": {"version": "2.0"},
        "buffers": [{"uri": "nope.bin", "byteLength": 4}],
        "bufferViews": [{"buffer": 0, "byteLength": 4}],
    });
    let path = dir.path().join("scene.gltf");
    fs::write(&path, serde_json::to_vec(&scene).unwrap()).unwrap();
    let output = dir.path().join("scene.glb");

    let err = convert_gltf_to_glb(&path, &output, &StdFs).unwrap_err();
    assert!(matches!(err, ConvertError::ResourceNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn invalid_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.gltf");
    fs::write(&path, b"{ not json").unwrap();

    let err = convert_gltf_to_glb(&path, &dir.path().join("out.glb"), &StdFs).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedJson(_)));
}
