use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;
use use_model_schema::{compile, CompileError, CompiledSchema, FieldError, Schema};
use use_model_util::{canonical_json, clone_value};

use crate::events::{ChangeNotice, ChangeOrigin};
use crate::view::{SharedState, TrackedView};

/// Controller for one reactive model: a mutable working copy of an
/// original value, with dirty checking, field-scoped validation, and
/// reset-to-original.
///
/// The original is the caller's source of truth and is never mutated here.
/// Edits go through the [`TrackedView`] returned by [`Model::view`] and
/// land in a private snapshot derived from the original by deep clone.
/// [`Model::is_dirty`] compares the snapshot's canonical serialization
/// against the original's, so property insertion order matters by design.
///
/// Originals are expected to be objects; behavior for non-object originals
/// is unspecified rather than guarded. Everything is single-threaded and
/// synchronous.
pub struct Model {
    original: Value,
    original_json: String,
    validator: Option<CompiledSchema>,
    shared: Rc<SharedState>,
    root: RefCell<Option<(u64, Rc<TrackedView>)>>,
    derive_gen: Cell<u64>,
    applied_gen: Cell<u64>,
}

impl Model {
    /// Creates a controller over `original`, compiling `schema` once.
    ///
    /// Compilation is the expensive step; it happens here and on
    /// [`Model::set_schema`], never per validation query.
    pub fn new(original: Value, schema: Option<&Schema>) -> Result<Self, CompileError> {
        let validator = schema.map(compile).transpose()?;
        let original_json = canonical_json(&original);
        let shared = SharedState::new(clone_value(&original));
        Ok(Self {
            original,
            original_json,
            validator,
            shared,
            root: RefCell::new(None),
            derive_gen: Cell::new(0),
            applied_gen: Cell::new(0),
        })
    }

    /// Root view of the current snapshot.
    ///
    /// Materializes any pending re-derivation first. The root view is
    /// recreated whenever the snapshot changed since it was last handed
    /// out, so caches built over stale data are left behind with the old
    /// root; until then the same root (and its memoized children) is
    /// returned.
    pub fn view(&self) -> Rc<TrackedView> {
        if self.derive_gen.get() != self.applied_gen.get() {
            self.materialize();
        }
        let generation = self.shared.refresh_gen.get();
        let mut root = self.root.borrow_mut();
        match root.as_ref() {
            Some((root_generation, view)) if *root_generation == generation => Rc::clone(view),
            _ => {
                let view = TrackedView::root(Rc::clone(&self.shared));
                *root = Some((generation, Rc::clone(&view)));
                view
            }
        }
    }

    /// Validation errors for the current snapshot, optionally scoped to
    /// one field path. Recomputed on every call, never cached.
    ///
    /// With a `field_path`, an error is included when its field equals the
    /// path or continues it with `.` or `[`: `children` matches
    /// `children[2].age` but not `childrenX`. Without a schema the result
    /// is always empty.
    pub fn find_errors(&self, field_path: Option<&str>) -> Vec<FieldError> {
        let Some(validator) = &self.validator else {
            return Vec::new();
        };
        let errors = validator.validate(&self.shared.data.borrow());
        match field_path {
            None => errors,
            Some(path) => errors
                .into_iter()
                .filter(|error| field_matches(&error.field, path))
                .collect(),
        }
    }

    /// Whether the snapshot has diverged from the original.
    ///
    /// Compares canonical serializations, so two objects holding the same
    /// pairs in different insertion order count as different. A pure
    /// observer: it never re-derives anything, which is why it reports
    /// dirty between [`Model::set_original`] and the next [`Model::view`]
    /// when the new original serializes differently from the snapshot.
    pub fn is_dirty(&self) -> bool {
        canonical_json(&self.shared.data.borrow()) != self.original_json
    }

    /// Discards all edits: the snapshot is re-derived from the current
    /// original immediately and subscribers are notified.
    pub fn reset(&mut self) {
        self.derive_gen.set(self.derive_gen.get().wrapping_add(1));
        self.materialize();
        self.shared.notify(ChangeNotice {
            path: Vec::new(),
            origin: ChangeOrigin::Reset,
        });
    }

    /// Replaces the original.
    ///
    /// Always schedules a fresh snapshot derivation for the next
    /// [`Model::view`] or [`Model::reset`], even when the new original's
    /// content is unchanged: an identity change must guarantee that a
    /// later reset observes upstream edits.
    pub fn set_original(&mut self, original: Value) {
        self.original_json = canonical_json(&original);
        self.original = original;
        self.derive_gen.set(self.derive_gen.get().wrapping_add(1));
        self.shared.notify(ChangeNotice {
            path: Vec::new(),
            origin: ChangeOrigin::OriginalChange,
        });
    }

    /// Replaces or clears the validation schema, recompiling once.
    pub fn set_schema(&mut self, schema: Option<&Schema>) -> Result<(), CompileError> {
        self.validator = schema.map(compile).transpose()?;
        Ok(())
    }

    /// Registers a change listener; returns its id.
    ///
    /// Listeners fire synchronously, at least once per effective mutation,
    /// in registration order. No debouncing: the embedding decides when
    /// and how to re-render. Listeners must not write back into the model
    /// from inside a notification.
    pub fn subscribe<F>(&mut self, listener: F) -> u64
    where
        F: FnMut(ChangeNotice) + 'static,
    {
        self.shared.subscribe(Box::new(listener))
    }

    /// Removes a listener; `false` when the id is unknown.
    pub fn unsubscribe(&mut self, listener_id: u64) -> bool {
        self.shared.unsubscribe(listener_id)
    }

    fn materialize(&self) {
        *self.shared.data.borrow_mut() = clone_value(&self.original);
        self.applied_gen.set(self.derive_gen.get());
        self.shared.bump_refresh();
    }
}

fn field_matches(field: &str, path: &str) -> bool {
    if field == path {
        return true;
    }
    field
        .strip_prefix(path)
        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_matching_requires_a_path_boundary() {
        assert!(field_matches("name", "name"));
        assert!(field_matches("children[2].age", "children"));
        assert!(field_matches("children[2].age", "children[2]"));
        assert!(field_matches("a.b.c", "a.b"));
        assert!(!field_matches("childrenX", "children"));
        assert!(!field_matches("name", "names"));
    }
}
