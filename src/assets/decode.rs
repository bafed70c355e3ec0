use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::store::Texture,
    foundation::error::SceneResult,
    foundation::math::premul_rgba8,
};

/// Decode an encoded image (PNG, JPEG, ...) into a premultiplied RGBA8 texture.
pub fn decode_texture(bytes: &[u8]) -> SceneResult<Texture> {
    let rgba = image::load_from_memory(bytes)
        .context("decode texture from memory")?
        .into_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    for px in pixels.chunks_exact_mut(4) {
        let premul = premul_rgba8(px[0], px[1], px[2], px[3]);
        px.copy_from_slice(&premul);
    }

    Ok(Texture {
        width,
        height,
        rgba8_premul: Arc::new(pixels),
    })
}

/// Read and decode a texture file.
pub fn decode_texture_file(path: &Path) -> SceneResult<Texture> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read texture '{}'", path.display()))?;
    decode_texture(&bytes).map_err(|e| {
        anyhow::anyhow!("{e}")
            .context(format!("decode texture '{}'", path.display()))
            .into()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
