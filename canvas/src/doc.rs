//! Document model: the mandala aggregate, its entities, and the in-memory store.
//!
//! This module defines what sits on a mandala (`Postit`, `MandalaImage`,
//! `Character`, `Tag`), the mandala's own configuration (`MandalaConfig`),
//! and the runtime store that owns all live entities (`DocStore`).
//!
//! Post-its form a forest through `parent_id`. The store keeps every post-it
//! in one flat table and resolves parent/child links through it. Inserts and
//! reparents that would make a post-it its own ancestor are rejected. A
//! post-it whose parent has been removed is treated as a root; deletion does
//! not cascade here.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;
use std::num::NonZeroUsize;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a post-it.
pub type PostitId = Uuid;
/// Unique identifier for a mandala image.
pub type ImageId = Uuid;
/// Unique identifier for a character.
pub type CharacterId = Uuid;
/// Unique identifier for a mandala.
pub type MandalaId = Uuid;

/// Errors raised by document construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    /// A mandala configuration was built without any dimension.
    #[error("mandala configuration has no dimensions")]
    EmptyDimensions,
    /// A mandala configuration was built without any scale.
    #[error("mandala configuration has no scales")]
    EmptyScales,
    /// The requested parent link would make a post-it its own ancestor.
    #[error("post-it {id} would become its own ancestor")]
    Cycle { id: PostitId },
    /// No post-it with this id is in the store.
    #[error("unknown post-it: {0}")]
    UnknownPostit(PostitId),
    /// The dimension name is not part of the mandala configuration.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),
    /// The scale name is not part of the mandala configuration.
    #[error("unknown scale: {0}")]
    UnknownScale(String),
}

impl DocError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDimensions => "E_EMPTY_DIMENSIONS",
            Self::EmptyScales => "E_EMPTY_SCALES",
            Self::Cycle { .. } => "E_POSTIT_CYCLE",
            Self::UnknownPostit(_) => "E_UNKNOWN_POSTIT",
            Self::UnknownDimension(_) => "E_UNKNOWN_DIMENSION",
            Self::UnknownScale(_) => "E_UNKNOWN_SCALE",
        }
    }
}

// =============================================================
// Mandala
// =============================================================

/// An angular sector category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    /// CSS color used to tint the sector.
    pub color: String,
}

#[derive(Deserialize)]
struct RawMandalaConfig {
    dimensions: Vec<Dimension>,
    scales: Vec<String>,
}

/// Dimensions and scales of a mandala. Never empty on either axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMandalaConfig")]
pub struct MandalaConfig {
    dimensions: Vec<Dimension>,
    scales: Vec<String>,
}

impl TryFrom<RawMandalaConfig> for MandalaConfig {
    type Error = DocError;

    fn try_from(raw: RawMandalaConfig) -> Result<Self, Self::Error> {
        Self::new(raw.dimensions, raw.scales)
    }
}

impl MandalaConfig {
    /// Build a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::EmptyDimensions`] or [`DocError::EmptyScales`] when
    /// either list is empty.
    pub fn new(dimensions: Vec<Dimension>, scales: Vec<String>) -> Result<Self, DocError> {
        if dimensions.is_empty() {
            return Err(DocError::EmptyDimensions);
        }
        if scales.is_empty() {
            return Err(DocError::EmptyScales);
        }
        Ok(Self { dimensions, scales })
    }

    /// Dimensions in sector order (sector 0 starts on the +x axis).
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Scales from the innermost ring outward.
    #[must_use]
    pub fn scales(&self) -> &[String] {
        &self.scales
    }

    #[must_use]
    pub fn dimension_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.dimensions.len()).unwrap_or(NonZeroUsize::MIN)
    }

    #[must_use]
    pub fn scale_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.scales.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Case-insensitive dimension lookup.
    #[must_use]
    pub fn resolve_dimension(&self, name: &str) -> Option<&Dimension> {
        let wanted = name.to_lowercase();
        self.dimensions.iter().find(|d| d.name.to_lowercase() == wanted)
    }

    /// Case-insensitive scale lookup.
    #[must_use]
    pub fn resolve_scale(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.scales
            .iter()
            .find(|s| s.to_lowercase() == wanted)
            .map(String::as_str)
    }

    /// Check a post-it's dimension and section against this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnknownDimension`] or [`DocError::UnknownScale`].
    pub fn validate_postit(&self, postit: &Postit) -> Result<(), DocError> {
        if self.resolve_dimension(&postit.dimension).is_none() {
            return Err(DocError::UnknownDimension(postit.dimension.clone()));
        }
        if self.resolve_scale(&postit.section).is_none() {
            return Err(DocError::UnknownScale(postit.section.clone()));
        }
        Ok(())
    }
}

/// A circular worldbuilding diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mandala {
    pub id: MandalaId,
    pub name: String,
    /// Pixel radius of the mandala at zoom 1.
    pub radius: f64,
    pub configuration: MandalaConfig,
}

// =============================================================
// Entities
// =============================================================

/// A display label with a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

impl Tag {
    /// Lowercased name with spaces replaced by hyphens.
    #[must_use]
    pub fn normalize_id(name: &str) -> String {
        name.trim().to_lowercase().replace(' ', "-")
    }

    #[must_use]
    pub fn id(&self) -> String {
        Self::normalize_id(&self.name)
    }
}

/// Tags held by one editor, unique by normalized id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns `false` when a tag with the same normalized id
    /// already exists or the name is blank.
    pub fn add(&mut self, tag: Tag) -> bool {
        let id = tag.id();
        if id.is_empty() || self.contains(&id) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag by (normalized) id.
    pub fn remove(&mut self, id: &str) -> Option<Tag> {
        let id = Tag::normalize_id(id);
        let index = self.tags.iter().position(|t| t.id() == id)?;
        Some(self.tags.remove(index))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        let id = Tag::normalize_id(id);
        self.tags.iter().any(|t| t.id() == id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Tag> {
        self.tags
    }
}

/// A content note placed on the mandala.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Postit {
    pub id: PostitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PostitId>,
    pub dimension: String,
    /// Scale name.
    pub section: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Logical position in `[-1, 1]`.
    pub coordinates: Point,
}

/// An image placed on the mandala.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandalaImage {
    pub id: ImageId,
    pub url: String,
    /// Logical position in `[-1, 1]`.
    pub coordinates: Point,
}

/// A tagged character, optionally pinned to a dimension and scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A mandala together with everything placed on it, as fetched from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandalaSnapshot {
    pub mandala: Mandala,
    #[serde(default)]
    pub postits: Vec<Postit>,
    #[serde(default)]
    pub images: Vec<MandalaImage>,
    #[serde(default)]
    pub characters: Vec<Character>,
}

// =============================================================
// Store
// =============================================================

/// In-memory store of mandala entities, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    postits: IndexMap<PostitId, Postit>,
    images: IndexMap<ImageId, MandalaImage>,
    characters: IndexMap<CharacterId, Character>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entities with a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Cycle`] if the snapshot's parent links contain a
    /// cycle; the store is left unchanged in that case.
    pub fn load_snapshot(
        &mut self,
        postits: Vec<Postit>,
        images: Vec<MandalaImage>,
        characters: Vec<Character>,
    ) -> Result<(), DocError> {
        let next = Self {
            postits: postits.into_iter().map(|p| (p.id, p)).collect(),
            images: images.into_iter().map(|i| (i.id, i)).collect(),
            characters: characters.into_iter().map(|c| (c.id, c)).collect(),
        };
        for id in next.postits.keys() {
            let parent = next.postits.get(id).and_then(|p| p.parent_id);
            next.check_parent(*id, parent)?;
        }
        *self = next;
        Ok(())
    }

    /// Insert or replace a post-it.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Cycle`] if `postit.parent_id` would make the
    /// post-it its own ancestor.
    pub fn insert_postit(&mut self, postit: Postit) -> Result<(), DocError> {
        self.check_parent(postit.id, postit.parent_id)?;
        self.postits.insert(postit.id, postit);
        Ok(())
    }

    /// Point a post-it at a new parent (or detach it with `None`).
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnknownPostit`] if `id` is not in the store and
    /// [`DocError::Cycle`] if the link would create a cycle.
    pub fn reparent(&mut self, id: &PostitId, parent: Option<PostitId>) -> Result<(), DocError> {
        if !self.postits.contains_key(id) {
            return Err(DocError::UnknownPostit(*id));
        }
        self.check_parent(*id, parent)?;
        if let Some(postit) = self.postits.get_mut(id) {
            postit.parent_id = parent;
        }
        Ok(())
    }

    /// Remove a post-it. Its children keep their (now dangling) parent link.
    pub fn remove_postit(&mut self, id: &PostitId) -> Option<Postit> {
        self.postits.shift_remove(id)
    }

    /// Update a post-it's logical coordinates. Returns false if it doesn't exist.
    pub fn move_postit(&mut self, id: &PostitId, coordinates: Point) -> bool {
        let Some(postit) = self.postits.get_mut(id) else {
            return false;
        };
        postit.coordinates = coordinates;
        true
    }

    /// Set a post-it's dimension and section. Returns false if it doesn't exist.
    pub fn relabel_postit(&mut self, id: &PostitId, dimension: &str, section: &str) -> bool {
        let Some(postit) = self.postits.get_mut(id) else {
            return false;
        };
        dimension.clone_into(&mut postit.dimension);
        section.clone_into(&mut postit.section);
        true
    }

    #[must_use]
    pub fn postit(&self, id: &PostitId) -> Option<&Postit> {
        self.postits.get(id)
    }

    /// All post-its in insertion order.
    pub fn postits(&self) -> impl Iterator<Item = &Postit> {
        self.postits.values()
    }

    pub fn postit_ids(&self) -> impl Iterator<Item = PostitId> + '_ {
        self.postits.keys().copied()
    }

    /// Post-its with no parent, or whose parent is no longer in the store.
    pub fn roots(&self) -> impl Iterator<Item = &Postit> {
        self.postits.values().filter(|p| self.is_root(p))
    }

    #[must_use]
    pub fn is_root(&self, postit: &Postit) -> bool {
        postit.parent_id.is_none_or(|parent| !self.postits.contains_key(&parent))
    }

    /// Direct children of `parent`, in insertion order.
    #[must_use]
    pub fn children_of(&self, parent: &PostitId) -> Vec<PostitId> {
        self.postits
            .values()
            .filter(|p| p.parent_id.as_ref() == Some(parent))
            .map(|p| p.id)
            .collect()
    }

    /// Ancestors of `id`, nearest first. Stops at the first missing parent.
    #[must_use]
    pub fn ancestors(&self, id: &PostitId) -> Vec<PostitId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.postits.get(id).and_then(|p| p.parent_id);
        while let Some(parent) = cursor {
            if !self.postits.contains_key(&parent) || !seen.insert(parent) {
                break;
            }
            out.push(parent);
            cursor = self.postits.get(&parent).and_then(|p| p.parent_id);
        }
        out
    }

    pub fn insert_image(&mut self, image: MandalaImage) {
        self.images.insert(image.id, image);
    }

    pub fn remove_image(&mut self, id: &ImageId) -> Option<MandalaImage> {
        self.images.shift_remove(id)
    }

    /// Update an image's logical coordinates. Returns false if it doesn't exist.
    pub fn move_image(&mut self, id: &ImageId, coordinates: Point) -> bool {
        let Some(image) = self.images.get_mut(id) else {
            return false;
        };
        image.coordinates = coordinates;
        true
    }

    #[must_use]
    pub fn image(&self, id: &ImageId) -> Option<&MandalaImage> {
        self.images.get(id)
    }

    pub fn images(&self) -> impl Iterator<Item = &MandalaImage> {
        self.images.values()
    }

    pub fn image_ids(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.images.keys().copied()
    }

    pub fn insert_character(&mut self, character: Character) {
        self.characters.insert(character.id, character);
    }

    pub fn remove_character(&mut self, id: &CharacterId) -> Option<Character> {
        self.characters.shift_remove(id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Number of placeable items (post-its and images) in the store.
    ///
    /// Characters are not placed on the mandala and are not counted, so a
    /// store holding only characters has no items but is not empty.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.postits.len() + self.images.len()
    }

    /// Returns `true` if the store holds no post-its, images, or characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.postits.is_empty() && self.images.is_empty() && self.characters.is_empty()
    }

    /// Reject `parent` if walking up from it reaches `id`.
    fn check_parent(&self, id: PostitId, parent: Option<PostitId>) -> Result<(), DocError> {
        let mut seen = HashSet::new();
        let mut cursor = parent;
        while let Some(current) = cursor {
            if current == id {
                tracing::warn!(%id, "rejected parent link that would form a cycle");
                return Err(DocError::Cycle { id });
            }
            if !seen.insert(current) {
                break;
            }
            cursor = self.postits.get(&current).and_then(|p| p.parent_id);
        }
        Ok(())
    }
}
