use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use use_model_util::{canonical_json, clone_normalize, NormalizeError};

use crate::events::{ChangeNotice, ChangeOrigin};
use crate::path::{get_path_mut, value_at_path, PathStep};

/// State shared by the controller and every view of one snapshot.
pub(crate) struct SharedState {
    pub(crate) data: RefCell<Value>,
    pub(crate) refresh_gen: Cell<u64>,
    listeners: RefCell<BTreeMap<u64, Box<dyn FnMut(ChangeNotice)>>>,
    next_listener_id: Cell<u64>,
}

impl SharedState {
    pub(crate) fn new(data: Value) -> Rc<Self> {
        Rc::new(Self {
            data: RefCell::new(data),
            refresh_gen: Cell::new(0),
            listeners: RefCell::new(BTreeMap::new()),
            next_listener_id: Cell::new(1),
        })
    }

    pub(crate) fn subscribe(&self, listener: Box<dyn FnMut(ChangeNotice)>) -> u64 {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id.saturating_add(1));
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    pub(crate) fn unsubscribe(&self, listener_id: u64) -> bool {
        self.listeners.borrow_mut().remove(&listener_id).is_some()
    }

    pub(crate) fn bump_refresh(&self) {
        self.refresh_gen.set(self.refresh_gen.get().wrapping_add(1));
    }

    pub(crate) fn notify(&self, notice: ChangeNotice) {
        for listener in self.listeners.borrow_mut().values_mut() {
            listener(notice.clone());
        }
    }
}

/// Result of reading one property through a [`TrackedView`].
#[derive(Clone)]
pub enum Read {
    /// Property is not present on the target.
    Absent,
    /// Property is present and null; passes through unwrapped.
    Null,
    /// Scalar property, by value.
    Scalar(Value),
    /// Object- or array-typed property, wrapped in a child view.
    Node(Rc<TrackedView>),
}

/// JSON type of the value a [`TrackedView`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Absent,
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl Read {
    pub fn node(self) -> Option<Rc<TrackedView>> {
        match self {
            Read::Node(view) => Some(view),
            _ => None,
        }
    }

    pub fn scalar(self) -> Option<Value> {
        match self {
            Read::Scalar(value) => Some(value),
            Read::Null => Some(Value::Null),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Read::Absent)
    }
}

/// One node of the change-tracking view hierarchy over a model snapshot.
///
/// A view owns no data; it is a path-bound cursor over the snapshot shared
/// with its controller. Object- and array-typed children come back wrapped
/// in child views, memoized per property key so identity is stable across
/// repeated reads (compare with [`Rc::ptr_eq`]); the cached child for a key
/// is dropped when that key is written. Scalars come back by value, so no
/// raw reference into the snapshot ever escapes.
///
/// Writes normalize the incoming value through a serialize/deserialize
/// round trip and notify subscribers; a write whose normalized value
/// serializes identically to the stored one is a no-op. In-place array
/// mutators compare the target's canonical serialization before and after
/// the call and notify only on effective change.
pub struct TrackedView {
    shared: Rc<SharedState>,
    path: Vec<PathStep>,
    cache: RefCell<HashMap<PathStep, Rc<TrackedView>>>,
}

impl TrackedView {
    pub(crate) fn root(shared: Rc<SharedState>) -> Rc<Self> {
        Rc::new(Self {
            shared,
            path: Vec::new(),
            cache: RefCell::new(HashMap::new()),
        })
    }

    fn child(&self, step: PathStep) -> Rc<TrackedView> {
        let mut path = self.path.clone();
        path.push(step);
        Rc::new(Self {
            shared: Rc::clone(&self.shared),
            path,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Path of this view from the model root.
    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    /// Reads an object property.
    pub fn get(&self, key: &str) -> Read {
        self.read_step(PathStep::Key(key.to_owned()))
    }

    /// Reads an array element.
    pub fn at(&self, index: usize) -> Read {
        self.read_step(PathStep::Index(index))
    }

    fn read_step(&self, step: PathStep) -> Read {
        if let Some(child) = self.cache.borrow().get(&step) {
            return Read::Node(Rc::clone(child));
        }
        {
            let data = self.shared.data.borrow();
            let Some(target) = value_at_path(&data, &self.path) else {
                return Read::Absent;
            };
            let value = match (&step, target) {
                (PathStep::Key(key), Value::Object(map)) => map.get(key),
                (PathStep::Index(index), Value::Array(arr)) => arr.get(*index),
                _ => None,
            };
            match value {
                None => return Read::Absent,
                Some(Value::Null) => return Read::Null,
                Some(Value::Object(_) | Value::Array(_)) => {}
                Some(scalar) => return Read::Scalar(scalar.clone()),
            }
        }
        let child = self.child(step.clone());
        self.cache.borrow_mut().insert(step, Rc::clone(&child));
        Read::Node(child)
    }

    /// Writes an object property.
    ///
    /// The value is stored as its serialize/deserialize round trip, so the
    /// snapshot only ever holds plain data. Writes always succeed; the
    /// `Err` case covers only values with no JSON representation.
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<(), NormalizeError> {
        let normalized = clone_normalize(&value)?;
        self.write_step(PathStep::Key(key.to_owned()), normalized);
        Ok(())
    }

    /// Writes an array element. Indexes past the end extend the array with
    /// nulls.
    pub fn set_index<T: Serialize>(&self, index: usize, value: T) -> Result<(), NormalizeError> {
        let normalized = clone_normalize(&value)?;
        self.write_step(PathStep::Index(index), normalized);
        Ok(())
    }

    fn write_step(&self, step: PathStep, value: Value) {
        let changed = {
            let mut data = self.shared.data.borrow_mut();
            let Some(target) = get_path_mut(&mut data, &self.path) else {
                return;
            };
            match (&step, target) {
                (PathStep::Key(key), Value::Object(map)) => {
                    let same = map
                        .get(key)
                        .is_some_and(|current| canonical_json(current) == canonical_json(&value));
                    if same {
                        false
                    } else {
                        map.insert(key.clone(), value);
                        true
                    }
                }
                (PathStep::Index(index), Value::Array(arr)) => {
                    let same = arr
                        .get(*index)
                        .is_some_and(|current| canonical_json(current) == canonical_json(&value));
                    if same {
                        false
                    } else {
                        if *index >= arr.len() {
                            arr.resize(*index + 1, Value::Null);
                        }
                        arr[*index] = value;
                        true
                    }
                }
                // Type-mismatched write: caller contract violation, no-op.
                _ => false,
            }
        };
        if changed {
            self.cache.borrow_mut().remove(&step);
            self.shared.bump_refresh();
            let mut path = self.path.clone();
            path.push(step);
            self.shared.notify(ChangeNotice {
                path,
                origin: ChangeOrigin::Write,
            });
        }
    }

    /// Removes an object property. No-op when the key is absent.
    pub fn remove(&self, key: &str) {
        let step = PathStep::Key(key.to_owned());
        let changed = {
            let mut data = self.shared.data.borrow_mut();
            let Some(target) = get_path_mut(&mut data, &self.path) else {
                return;
            };
            match target {
                Value::Object(map) => map.shift_remove(key).is_some(),
                _ => false,
            }
        };
        if changed {
            self.cache.borrow_mut().remove(&step);
            self.shared.bump_refresh();
            let mut path = self.path.clone();
            path.push(step);
            self.shared.notify(ChangeNotice {
                path,
                origin: ChangeOrigin::Write,
            });
        }
    }

    /// Runs an in-place mutation against an array target.
    ///
    /// Snapshots the target's canonical serialization before the call,
    /// applies the mutation, compares afterwards, and fires a refresh
    /// notification iff the target actually changed. The mutation's own
    /// result is returned unchanged, so non-mutating calls through this
    /// path stay observation-only.
    fn mutate<R>(&self, f: impl FnOnce(&mut Vec<Value>) -> Option<R>) -> Option<R> {
        let (changed, result) = {
            let mut data = self.shared.data.borrow_mut();
            let before;
            let result;
            {
                let target = get_path_mut(&mut data, &self.path)?;
                before = canonical_json(target);
                let Value::Array(arr) = target else {
                    return None;
                };
                result = f(arr);
            }
            let after = match value_at_path(&data, &self.path) {
                Some(target) => canonical_json(target),
                None => before.clone(),
            };
            (before != after, result)
        };
        if changed {
            // Element indexes shifted; every cached child is stale.
            self.cache.borrow_mut().clear();
            self.shared.bump_refresh();
            self.shared.notify(ChangeNotice {
                path: self.path.clone(),
                origin: ChangeOrigin::Mutate,
            });
        }
        result
    }

    /// Appends an element to an array target.
    pub fn push<T: Serialize>(&self, value: T) -> Result<(), NormalizeError> {
        let normalized = clone_normalize(&value)?;
        let _ = self.mutate(move |arr| {
            arr.push(normalized);
            Some(())
        });
        Ok(())
    }

    /// Inserts an element at `index` (clamped to the array length).
    pub fn insert<T: Serialize>(&self, index: usize, value: T) -> Result<(), NormalizeError> {
        let normalized = clone_normalize(&value)?;
        let _ = self.mutate(move |arr| {
            let at = index.min(arr.len());
            arr.insert(at, normalized);
            Some(())
        });
        Ok(())
    }

    /// Removes and returns an array element; `None` when out of bounds or
    /// the target is not an array.
    pub fn remove_index(&self, index: usize) -> Option<Value> {
        self.mutate(move |arr| {
            if index < arr.len() {
                Some(arr.remove(index))
            } else {
                None
            }
        })
    }

    /// Removes and returns the last element of an array target.
    pub fn pop(&self) -> Option<Value> {
        self.mutate(|arr| arr.pop())
    }

    /// Sorts an array of objects in place by the string value under `key`.
    ///
    /// Elements without a string at `key` sort after those with one; ties
    /// keep their relative order. A sort that leaves the order unchanged
    /// is a no-op like any other non-effective mutation.
    pub fn sort_by_key_str(&self, key: &str) {
        let key = key.to_owned();
        let _ = self.mutate(move |arr| {
            arr.sort_by(|a, b| {
                let a = a.get(&key).and_then(Value::as_str);
                let b = b.get(&key).and_then(Value::as_str);
                match (a, b) {
                    (Some(a), Some(b)) => a.cmp(b),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
            Some(())
        });
    }

    /// Empties an array target.
    pub fn clear(&self) {
        let _ = self.mutate(|arr| {
            arr.clear();
            Some(())
        });
    }

    /// Number of elements (arrays) or properties (objects) of the target.
    pub fn len(&self) -> usize {
        let data = self.shared.data.borrow();
        match value_at_path(&data, &self.path) {
            Some(Value::Array(arr)) => arr.len(),
            Some(Value::Object(map)) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Property keys of an object target, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        let data = self.shared.data.borrow();
        match value_at_path(&data, &self.path) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// JSON type of the target, [`ValueKind::Absent`] when the view's
    /// path no longer resolves.
    pub fn kind(&self) -> ValueKind {
        let data = self.shared.data.borrow();
        match value_at_path(&data, &self.path) {
            None => ValueKind::Absent,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Bool,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Object(_)) => ValueKind::Object,
            Some(Value::Array(_)) => ValueKind::Array,
        }
    }

    pub fn is_array(&self) -> bool {
        self.kind() == ValueKind::Array
    }

    pub fn is_object(&self) -> bool {
        self.kind() == ValueKind::Object
    }

    /// Plain deep copy of the target subtree, by value: mutating the
    /// returned data does not touch the snapshot.
    pub fn to_value(&self) -> Value {
        let data = self.shared.data.borrow();
        value_at_path(&data, &self.path)
            .cloned()
            .unwrap_or(Value::Null)
    }
}
