use std::collections::HashMap;

use crate::{
    assets::store::{AssetStore, Texture},
    foundation::core::Affine,
    foundation::error::{SceneError, SceneResult},
    render::{FrameRGBA, RenderBackend, RenderSettings},
    scene::graph::SceneGraph,
};

pub struct CpuBackend {
    settings: RenderSettings,
    image_cache: HashMap<String, vello_cpu::Image>,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            image_cache: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn image_paint_for(&mut self, name: &str, texture: &Texture) -> SceneResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(name) {
            return Ok(paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(
            texture.rgba8_premul.as_slice(),
            texture.width,
            texture.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.image_cache.insert(name.to_string(), paint.clone());
        Ok(paint)
    }
}

impl RenderBackend for CpuBackend {
    fn render(&mut self, graph: &SceneGraph, assets: &AssetStore) -> SceneResult<FrameRGBA> {
        let canvas = self.settings.canvas;
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SceneError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SceneError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        let [r, g, b, a] = self.settings.clear_rgba;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        for draw in graph.sprite_draws()? {
            let texture = assets.get(draw.texture)?;
            if texture.width == 0 || texture.height == 0 {
                continue;
            }
            if draw.size.width == 0.0 || draw.size.height == 0.0 {
                continue;
            }
            let paint = self.image_paint_for(draw.texture, texture)?;
            let (tw, th) = (f64::from(texture.width), f64::from(texture.height));
            let stretch =
                Affine::scale_non_uniform(draw.size.width / tw, draw.size.height / th);

            ctx.set_transform(affine_to_cpu(draw.transform * stretch));
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint);

            let opacity = draw.alpha as f32;
            if opacity < 1.0 {
                ctx.push_opacity_layer(opacity);
            }
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, tw, th));
            if opacity < 1.0 {
                ctx.pop_layer();
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SceneResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SceneError::render("texture width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SceneError::render("texture height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SceneError::render("texture byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
