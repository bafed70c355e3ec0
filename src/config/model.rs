use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{SceneError, SceneResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Every literal the scene is built from.
///
/// All positions and sizes are virtual units of the design canvas unless noted.
/// `SceneConfig::default()` is the stock scene.
pub struct SceneConfig {
    /// Design canvas and viewport padding.
    pub design: DesignSpec,
    /// Renderer clear colour (straight RGBA8).
    pub clear_rgba: [u8; 4],
    /// Full-bleed sky image.
    pub background: ImageSpec,
    /// Back parallax groups and front cloud set.
    pub clouds: CloudsConfig,
    /// Camera pan-down speeds.
    pub pan: PanConfig,
    /// Ground layers and their settle timing.
    pub ground: GroundConfig,
    /// Leaf manifest and shared wind parameters.
    pub leaves: LeavesConfig,
    /// Info overlay revealed once the ground settles.
    pub overlay: OverlayConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DesignSpec {
    pub width: f64,
    pub height: f64,
    /// Multiplier on the fitted scale factor; keeps the canvas off the display edges.
    pub padding: f64,
}

impl DesignSpec {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Stretch to the viewport width, height follows the image aspect ratio.
    Width,
    /// Convert `width`/`height` through the viewport scale.
    #[default]
    Scaled,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageSpec {
    pub texture: String,
    /// Registry name for the created sprite.
    pub key: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fit: ImageFit,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CloudSpec {
    pub texture: String,
    /// Device pixels per frame.
    pub speed: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackGroupSpec {
    /// Drift speed of each group, device pixels per frame.
    pub speed: f64,
    /// Horizontal start of the second group, as a fraction of the viewport width.
    pub second_offset: f64,
    /// Group width after fitting, as a fraction of the viewport width.
    pub fit_width: f64,
    /// Mirror the second group's sprites horizontally.
    pub mirror_second: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CloudsConfig {
    pub back_groups: BackGroupSpec,
    /// Cloud set placed inside each back group.
    pub back: Vec<CloudSpec>,
    /// Foreground clouds; each is doubled end-to-end.
    pub front: Vec<CloudSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanConfig {
    /// Background rise per frame, device pixels.
    pub back_speed: f64,
    pub cloud_speed_front: f64,
    pub cloud_speed_back: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroundLayerSpec {
    pub image: ImageSpec,
    /// Resting y once settled.
    pub rest_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroundConfig {
    /// Ordered back to front; the last entry is drawn on top.
    pub layers: Vec<GroundLayerSpec>,
    /// Offset of the first layer below its resting y.
    pub initial_offset: f64,
    /// Extra offset per layer index.
    pub offset_stagger: f64,
    /// Frames every layer takes to settle.
    pub settle_frames: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LeafSpec {
    pub texture: String,
    /// Orbit radius in device pixels.
    pub radius: f64,
    /// Frames per orbit period.
    pub speed_bound: u32,
    /// Rotation advance per frame, radians.
    pub rotation_step: f64,
    pub x: f64,
    pub y: f64,
    /// Initial vertical scale (negative is flipped).
    pub scale_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindSpec {
    /// Leftward drift per frame, device pixels.
    pub drift_x: f64,
    /// Downward drift per frame, device pixels.
    pub fall_y: f64,
    /// `scale.y` change per frame while fluttering.
    pub flutter_step: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LeavesConfig {
    pub wind: WindSpec,
    pub manifest: Vec<LeafSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayConfig {
    pub title: String,
    pub lines: Vec<String>,
}

fn cloud(texture: &str, speed: f64, x: f64, y: f64, width: f64, height: f64) -> CloudSpec {
    CloudSpec {
        texture: texture.to_string(),
        speed,
        x,
        y,
        width,
        height,
        alpha: None,
    }
}

fn back_cloud(texture: &str, y: f64, width: f64, height: f64) -> CloudSpec {
    CloudSpec {
        alpha: Some(0.8),
        ..cloud(texture, 0.01, 0.0, y, width, height)
    }
}

fn image(texture: &str, key: &str, width: f64, height: f64, fit: ImageFit) -> ImageSpec {
    ImageSpec {
        texture: texture.to_string(),
        key: key.to_string(),
        width,
        height,
        fit,
    }
}

fn leaf(texture: &str, radius: f64, speed_bound: u32, rotation_step: f64, x: f64, y: f64, scale_y: f64) -> LeafSpec {
    LeafSpec {
        texture: texture.to_string(),
        radius,
        speed_bound,
        rotation_step,
        x,
        y,
        scale_y,
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        const LEAF: &str = "assets/leaf.png";
        const LEAF2: &str = "assets/leaf2.png";
        const LEAF3: &str = "assets/leaf3.png";

        let land = |key: &str| GroundLayerSpec {
            image: image("assets/land.png", key, 1000.0, 185.0, ImageFit::Width),
            rest_y: 817.0,
        };

        Self {
            design: DesignSpec {
                width: 1000.0,
                height: 1000.0,
                padding: 1.01,
            },
            clear_rgba: [0xff, 0x16, 0x39, 0xff],
            background: image("assets/back.jpg", "back1", 1000.0, 1375.0, ImageFit::Width),
            clouds: CloudsConfig {
                back_groups: BackGroupSpec {
                    speed: 0.01,
                    second_offset: 1.3,
                    fit_width: 1.5,
                    mirror_second: true,
                },
                back: vec![
                    back_cloud("assets/cloud1.png", 950.0, 2000.0, 377.0),
                    back_cloud("assets/cloud2.png", 680.0, 2000.0, 480.0),
                    back_cloud("assets/cloud3.png", 850.0, 1500.0, 332.0),
                    back_cloud("assets/cloud4.png", 310.0, 1400.0, 550.0),
                    back_cloud("assets/cloud5.png", 50.0, 1400.0, 600.0),
                    back_cloud("assets/cloud6.png", 0.0, 1500.0, 520.0),
                ],
                front: vec![
                    cloud("assets/cloud1.png", 0.09, 0.0, 970.0, 1000.0, 277.0),
                    cloud("assets/cloud2.png", 0.06, 0.0, 820.0, 1000.0, 323.0),
                    cloud("assets/cloud3.png", 0.05, 0.0, 750.0, 922.0, 232.0),
                    cloud("assets/cloud4.png", 0.04, 0.0, 320.0, 1000.0, 523.0),
                    cloud("assets/cloud5.png", 0.03, 10.0, 225.0, 921.0, 467.0),
                    cloud("assets/cloud6.png", 0.02, 0.0, 0.0, 1000.0, 420.0),
                ],
            },
            pan: PanConfig {
                back_speed: 0.9,
                cloud_speed_front: 1.0,
                cloud_speed_back: 0.8,
            },
            ground: GroundConfig {
                layers: vec![
                    land("land"),
                    GroundLayerSpec {
                        image: image("assets/layer1.png", "layer1", 776.0, 219.0, ImageFit::Scaled),
                        rest_y: 695.0,
                    },
                    GroundLayerSpec {
                        image: image("assets/layer2.png", "layer2", 1000.0, 459.0, ImageFit::Scaled),
                        rest_y: 465.0,
                    },
                    GroundLayerSpec {
                        image: image("assets/layer3.png", "layer3", 1000.0, 672.0, ImageFit::Scaled),
                        rest_y: 260.0,
                    },
                    land("land2"),
                ],
                initial_offset: 750.0,
                offset_stagger: 100.0,
                settle_frames: 420,
            },
            leaves: LeavesConfig {
                wind: WindSpec {
                    drift_x: 2.0,
                    fall_y: 0.5,
                    flutter_step: 0.02,
                },
                manifest: vec![
                    leaf(LEAF3, 10.0, 100, 0.02, 800.0, 200.0, 0.3),
                    leaf(LEAF3, 8.0, 200, 0.02, 820.0, 200.0, -0.8),
                    leaf(LEAF3, 11.0, 300, 0.02, 750.0, 200.0, 1.0),
                    leaf(LEAF3, 110.0, 1100, 0.03, 1200.0, 0.0, 0.3),
                    leaf(LEAF3, 18.0, 1300, 0.03, 1100.0, 10.0, -0.8),
                    leaf(LEAF3, 111.0, 1100, 0.03, 700.0, -10.0, 1.0),
                    leaf(LEAF3, 12.0, 250, 0.02, 200.0, -200.0, -0.8),
                    leaf(LEAF3, 130.0, 350, 0.03, 520.0, 550.0, 0.4),
                    leaf(LEAF, 150.0, 1010, 0.03, 120.0, 120.0, 1.0),
                    leaf(LEAF, 100.0, 990, 0.03, 800.0, 500.0, 0.4),
                    leaf(LEAF, 80.0, 800, 0.03, 500.0, -120.0, -0.9),
                    leaf(LEAF, 120.0, 1200, 0.03, 100.0, 520.0, -0.7),
                    leaf(LEAF2, 110.0, 1000, 0.03, 1000.0, 400.0, 0.2),
                    leaf(LEAF2, 12.0, 110, 0.02, 203.0, 300.0, -0.5),
                    leaf(LEAF2, 10.0, 105, 0.02, 1210.0, 200.0, 0.3),
                    leaf(LEAF2, 8.0, 100, 0.02, 510.0, 510.0, 1.0),
                    leaf(LEAF2, 50.0, 200, 0.02, 105.0, 0.0, 0.6),
                    leaf(LEAF2, 40.0, 150, 0.02, 508.0, 505.0, 0.2),
                    leaf(LEAF2, 18.0, 100, 0.02, 810.0, 608.0, -0.3),
                ],
            },
            overlay: OverlayConfig {
                title: "Simple parallax demo".to_string(),
                lines: vec![
                    "Art belongs to Sakimori".to_string(),
                    "Music: \"June\" by Kai Engel".to_string(),
                ],
            },
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| SceneError::serde(format!("scene config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> SceneResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::serde(e.to_string()))
    }

    /// Every texture the builders will reference, deduplicated in first-use order.
    pub fn asset_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        };
        push(&self.background.texture);
        for c in self.clouds.back.iter().chain(&self.clouds.front) {
            push(&c.texture);
        }
        for l in &self.ground.layers {
            push(&l.image.texture);
        }
        for l in &self.leaves.manifest {
            push(&l.texture);
        }
        out
    }

    pub fn validate(&self) -> SceneResult<()> {
        let d = &self.design;
        if !(d.width > 0.0 && d.height > 0.0) {
            return Err(SceneError::validation("design size must be positive"));
        }
        if !(d.padding.is_finite() && d.padding >= 1.0) {
            return Err(SceneError::validation("design padding must be >= 1"));
        }

        validate_image("background", &self.background)?;

        let g = &self.clouds.back_groups;
        check_speed("back group speed", g.speed)?;
        if !(g.fit_width > 0.0) {
            return Err(SceneError::validation("back group fit_width must be > 0"));
        }
        if !g.second_offset.is_finite() {
            return Err(SceneError::validation("back group second_offset must be finite"));
        }
        for (idx, c) in self.clouds.back.iter().chain(&self.clouds.front).enumerate() {
            validate_cloud(idx, c)?;
        }

        let p = &self.pan;
        check_speed("pan back_speed", p.back_speed)?;
        check_speed("pan cloud_speed_front", p.cloud_speed_front)?;
        check_speed("pan cloud_speed_back", p.cloud_speed_back)?;
        if p.back_speed == 0.0 {
            return Err(SceneError::validation("pan back_speed must be > 0"));
        }

        let ground = &self.ground;
        if ground.settle_frames == 0 {
            return Err(SceneError::validation("ground settle_frames must be > 0"));
        }
        if !(ground.initial_offset >= 0.0 && ground.offset_stagger >= 0.0) {
            return Err(SceneError::validation(
                "ground offsets must be non-negative",
            ));
        }
        for l in &ground.layers {
            validate_image("ground layer", &l.image)?;
            if !l.rest_y.is_finite() {
                return Err(SceneError::validation(format!(
                    "ground layer '{}' rest_y must be finite",
                    l.image.key
                )));
            }
        }

        let w = &self.leaves.wind;
        check_speed("wind drift_x", w.drift_x)?;
        check_speed("wind fall_y", w.fall_y)?;
        if !(w.flutter_step > 0.0 && w.flutter_step.is_finite()) {
            return Err(SceneError::validation("wind flutter_step must be > 0"));
        }
        for (idx, l) in self.leaves.manifest.iter().enumerate() {
            if l.speed_bound == 0 {
                return Err(SceneError::validation(format!(
                    "leaf {idx}: speed_bound must be > 0"
                )));
            }
            if !(l.radius.is_finite() && l.rotation_step.is_finite() && l.scale_y.is_finite()) {
                return Err(SceneError::validation(format!(
                    "leaf {idx}: radius, rotation_step and scale_y must be finite"
                )));
            }
            if !(l.x.is_finite() && l.y.is_finite()) {
                return Err(SceneError::validation(format!(
                    "leaf {idx}: position must be finite"
                )));
            }
        }
        Ok(())
    }
}

fn check_speed(what: &str, v: f64) -> SceneResult<()> {
    if !(v.is_finite() && v >= 0.0) {
        return Err(SceneError::validation(format!(
            "{what} must be a non-negative number, got {v}"
        )));
    }
    Ok(())
}

fn validate_image(what: &str, img: &ImageSpec) -> SceneResult<()> {
    if img.texture.is_empty() || img.key.is_empty() {
        return Err(SceneError::validation(format!(
            "{what}: texture and key must be non-empty"
        )));
    }
    if !(img.width > 0.0 && img.height > 0.0) {
        return Err(SceneError::validation(format!(
            "{what} '{}': size must be positive",
            img.key
        )));
    }
    Ok(())
}

fn validate_cloud(idx: usize, c: &CloudSpec) -> SceneResult<()> {
    check_speed(&format!("cloud {idx} speed"), c.speed)?;
    if !(c.width.is_finite() && c.height.is_finite() && c.x.is_finite() && c.y.is_finite()) {
        return Err(SceneError::validation(format!(
            "cloud {idx}: geometry must be finite"
        )));
    }
    if let Some(a) = c.alpha
        && !(0.0..=1.0).contains(&a)
    {
        return Err(SceneError::validation(format!(
            "cloud {idx}: alpha must be in [0, 1]"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
