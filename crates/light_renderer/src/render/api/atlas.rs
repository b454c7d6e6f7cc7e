//! Texture atlas lookups

/// Handle to a texture page owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u64);

/// Named sub-rectangle of a texture page
///
/// `u`/`v` is the top-left corner and `u2`/`v2` the bottom-right corner in
/// normalized texture coordinates. `width`/`height` are the region's natural
/// size in world units, used when a sprite is drawn without explicit size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureRegion {
    /// Texture page backing this region
    pub texture: TextureId,
    /// Left texture coordinate
    pub u: f32,
    /// Top texture coordinate
    pub v: f32,
    /// Right texture coordinate
    pub u2: f32,
    /// Bottom texture coordinate
    pub v2: f32,
    /// Natural width
    pub width: f32,
    /// Natural height
    pub height: f32,
}

impl TextureRegion {
    /// Create a region on `texture` spanning the given texture coordinates
    pub const fn new(texture: TextureId, u: f32, v: f32, u2: f32, v2: f32) -> Self {
        Self { texture, u, v, u2, v2, width: 0.0, height: 0.0 }
    }

    /// Set the natural size
    #[must_use]
    pub const fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Source of named texture regions
///
/// Regions used together by one light shape must live on the same texture
/// page; the renderer does not check this.
pub trait TextureAtlas {
    /// Look up a region by name
    fn find_region(&self, name: &str) -> Option<TextureRegion>;
}
