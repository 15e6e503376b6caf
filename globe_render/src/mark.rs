// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable-identity path marks and the diffs that move them between scenes.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{BezPath, Rect, Shape};
use peniko::Brush;

/// Stable identifier for a drawn element.
///
/// The sphere background is always id `0`; features follow in source order starting at `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(u64);

impl MarkId {
    /// The sphere background.
    pub const SPHERE: Self = Self(0);

    /// Creates an id from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The id of the feature at `index` in its collection.
    #[must_use]
    pub fn feature(index: usize) -> Self {
        Self(index as u64 + 1)
    }

    /// The raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a mark draws, used as the SVG `class` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkClass {
    /// The ocean disk behind everything.
    Sphere,
    /// One country outline.
    Country,
}

impl MarkClass {
    /// Returns the class name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Country => "country",
        }
    }
}

/// A filled and stroked path.
///
/// A mark whose geometry is entirely hidden keeps its identity with an empty `path`, so
/// rotating it back into view is an update rather than a re-insert.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Element class.
    pub class: MarkClass,
    /// Screen-space outline; empty when nothing is visible.
    pub path: BezPath,
    /// Interior paint.
    pub fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width in pixels.
    pub stroke_width: f64,
}

impl PathMark {
    /// Returns `true` when the mark has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Bounds of the path, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| self.path.bounding_box())
    }
}

/// A change to the set of drawn marks.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark was created.
    Enter {
        /// Mark id.
        id: MarkId,
        /// The new mark.
        new: Arc<PathMark>,
        /// Bounds of the new mark.
        bounds: Option<Rect>,
    },
    /// A mark changed in place.
    Update {
        /// Mark id.
        id: MarkId,
        /// The mark before the change.
        old: Arc<PathMark>,
        /// The mark after the change.
        new: Arc<PathMark>,
        /// Bounds before the change.
        old_bounds: Option<Rect>,
        /// Bounds after the change.
        new_bounds: Option<Rect>,
    },
    /// A mark was removed.
    Exit {
        /// Mark id.
        id: MarkId,
        /// The removed mark.
        old: Arc<PathMark>,
        /// Bounds of the removed mark.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// The id of the affected mark.
    #[must_use]
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// The area that needs repainting: the union of old and new bounds.
    #[must_use]
    pub fn damage(&self) -> Option<Rect> {
        match self {
            Self::Enter { bounds, .. } | Self::Exit { bounds, .. } => *bounds,
            Self::Update {
                old_bounds,
                new_bounds,
                ..
            } => match (old_bounds, new_bounds) {
                (Some(a), Some(b)) => Some(a.union(*b)),
                (a, b) => a.or(*b),
            },
        }
    }
}

/// Marks keyed by id, kept in insertion order.
///
/// Insertion order is draw order: the sphere goes in first and every country after it, so no
/// z-index sorting is needed.
#[derive(Clone, Debug, Default)]
pub struct MarkScene {
    marks: HashMap<MarkId, Arc<PathMark>>,
    order: Vec<MarkId>,
}

impl MarkScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when the scene holds no marks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The mark with `id`.
    #[must_use]
    pub fn get(&self, id: MarkId) -> Option<&Arc<PathMark>> {
        self.marks.get(&id)
    }

    /// Marks in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkId, &Arc<PathMark>)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.marks.get(id).map(|mark| (*id, mark)))
    }

    /// Inserts a mark, or replaces it if `id` is already present.
    pub fn enter(&mut self, id: MarkId, mark: PathMark) -> MarkDiff {
        let new = Arc::new(mark);
        let new_bounds = new.bounds();
        match self.marks.insert(id, Arc::clone(&new)) {
            Some(old) => MarkDiff::Update {
                id,
                old_bounds: old.bounds(),
                old,
                new,
                new_bounds,
            },
            None => {
                self.order.push(id);
                MarkDiff::Enter {
                    id,
                    new,
                    bounds: new_bounds,
                }
            }
        }
    }

    /// Replaces the path of an existing mark.
    ///
    /// Returns `None` when `id` is unknown or the path did not change.
    pub fn set_path(&mut self, id: MarkId, path: BezPath) -> Option<MarkDiff> {
        let slot = self.marks.get_mut(&id)?;
        if slot.path == path {
            return None;
        }
        let old = Arc::clone(slot);
        let new = Arc::new(PathMark {
            path,
            ..(*old).clone()
        });
        *slot = Arc::clone(&new);
        Some(MarkDiff::Update {
            id,
            old_bounds: old.bounds(),
            new_bounds: new.bounds(),
            old,
            new,
        })
    }

    /// Removes every mark, returning exits in draw order.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        let order = core::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|id| {
                let old = self.marks.remove(&id)?;
                Some(MarkDiff::Exit {
                    id,
                    bounds: old.bounds(),
                    old,
                })
            })
            .collect()
    }

    /// Applies diffs produced by another scene, mirroring its contents.
    pub fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter { id, new, .. } | MarkDiff::Update { id, new, .. } => {
                    if self.marks.insert(*id, Arc::clone(new)).is_none() {
                        self.order.push(*id);
                    }
                }
                MarkDiff::Exit { id, .. } => {
                    if self.marks.remove(id).is_some() {
                        self.order.retain(|other| other != id);
                    }
                }
            }
        }
    }
}
