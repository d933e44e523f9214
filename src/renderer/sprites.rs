//! Sprite lookup with an explicit, renderer-owned cache
//!
//! Sprites are keyed by file name and target size. The first request for a
//! key goes to the loader; the result is kept for the rest of the session,
//! including misses, so an absent file is probed once and the entity falls
//! back to procedural shapes from then on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::sim::{EnemyKind, PickupKind};

pub const PLAYER_SPRITE: &str = "player.png";

pub fn enemy_sprite(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Normal => "enemy_normal.png",
        EnemyKind::Level2 => "enemy_level2.png",
        EnemyKind::Special => "enemy_special.png",
    }
}

pub fn pickup_sprite(kind: PickupKind) -> &'static str {
    match kind {
        PickupKind::Ammo => "pickup_ammo.png",
        PickupKind::Hp => "pickup_hp.png",
        PickupKind::Coin => "pickup_coin.png",
    }
}

/// Produces a drawable sprite for a file scaled to `width` x `height`
pub trait SpriteLoader {
    type Sprite;

    fn load(&mut self, name: &str, width: u32, height: u32) -> anyhow::Result<Self::Sprite>;
}

/// Loader with no assets; everything draws procedurally
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteLoader for NoSprites {
    type Sprite = ();

    fn load(&mut self, name: &str, _width: u32, _height: u32) -> anyhow::Result<()> {
        anyhow::bail!("no sprite assets available for {name}")
    }
}

/// Resolves sprites to files in an asset directory. Decoding is left to
/// the presenting backend, which receives the resolved path.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SpriteLoader for AssetDir {
    type Sprite = PathBuf;

    fn load(&mut self, name: &str, _width: u32, _height: u32) -> anyhow::Result<PathBuf> {
        let path = self.root.join(name);
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("sprite {} not found", path.display()))?;
        anyhow::ensure!(meta.is_file(), "sprite {} is not a file", path.display());
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SpriteKey {
    name: String,
    width: u32,
    height: u32,
}

/// Loaded sprites by (name, width, height), never invalidated mid-session
pub struct SpriteCache<L: SpriteLoader> {
    loader: L,
    entries: HashMap<SpriteKey, Option<L::Sprite>>,
}

impl<L: SpriteLoader> SpriteCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
        }
    }

    /// Fetch a sprite, loading it on first use
    pub fn get(&mut self, name: &str, width: u32, height: u32) -> Option<&L::Sprite> {
        let key = SpriteKey {
            name: name.to_string(),
            width,
            height,
        };
        let loader = &mut self.loader;
        self.entries
            .entry(key)
            .or_insert_with(|| match loader.load(name, width, height) {
                Ok(sprite) => Some(sprite),
                Err(err) => {
                    log::debug!("Falling back to shapes: {err:#}");
                    None
                }
            })
            .as_ref()
    }

    /// True if the sprite is (or can be) loaded
    pub fn has(&mut self, name: &str, width: u32, height: u32) -> bool {
        self.get(name, width, height).is_some()
    }

    /// Number of keys probed so far, hits and misses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
